//! Mutant Core - fixed-point DSP primitives for small synth voices
//!
//! Everything here runs on integers sized for 8-bit oscillators and 16-bit
//! output, with zero allocation and bounded time per call, so it can sit in an
//! audio interrupt on a microcontroller as well as in a desktop render loop.
//!
//! # Building Blocks
//!
//! ## Oscillators
//!
//! - [`Phasor`] - 32-bit phase accumulator; its top byte is an 8-bit saw
//!
//! ## Filters
//!
//! - [`ResonantLowPass`] - two-pole resonant low-pass with 1/256 coefficients
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - index-addressed integer parameter access
//! - [`ParamDescriptor`] - range, default, stable IDs and flags for a slot
//!
//! ## Utilities
//!
//! - [`Xorshift32`] - deterministic PRNG for patch randomization
//! - [`RangeMeter`] - min/max/clip tracking for headroom checks
//! - Math: [`midi_to_freq`], [`rescale_bits`], [`saturate_i16`], [`saturate_bits`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! mutant-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod lowpass;
pub mod math;
pub mod meter;
pub mod param_info;
pub mod phasor;
pub mod rng;

pub use lowpass::{MAX_STABLE_CUTOFF, MAX_STABLE_RESONANCE, ResonantLowPass};
pub use math::{midi_to_freq, rescale_bits, saturate_bits, saturate_i16};
pub use meter::RangeMeter;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use phasor::Phasor;
pub use rng::{DEFAULT_SEED, Xorshift32};
