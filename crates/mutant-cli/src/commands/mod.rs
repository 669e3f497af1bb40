//! CLI command implementations.

pub mod common;
pub mod curves;
pub mod params;
pub mod render;
