//! Error types for rendering and file I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from WAV I/O, render-config handling, and offline rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Parameter name or index that matches no slot
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Render settings that cannot be played
    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    /// WAV layout this crate does not read
    #[error("unsupported WAV format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid config error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidConfig(reason.into())
    }
}

/// Convenience result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
