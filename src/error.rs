//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Wraps decoder, encoder, resampler and filesystem failures, and provides semantic
//! variants for argument validation and path handling.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Path does not exist: {0:?}")]
    PathNotFound(PathBuf),

    #[error("Unsupported file format ({extension}): {path:?}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to create output directory {path:?}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode JPEG {path:?}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory {path:?}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Image too large for JPEG output: {width}x{height} (max 65535)")]
    ImageTooLarge { width: usize, height: usize },

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }

    pub fn invalid(arg: &'static str, value: impl std::fmt::Display) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }
}
