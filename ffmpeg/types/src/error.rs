/*!
    Error types for the ffmpeg scaling crates.
*/

use std::collections::TryReserveError;

use thiserror::Error;

use crate::ImageGeometry;

/**
    Error type for the ffmpeg scaling crates.
*/
#[derive(Debug, Error)]
pub enum Error {
    /// Zero or out-of-range image dimensions
    #[error("invalid geometry: {message}")]
    InvalidGeometry { message: String },
    /// Row stride shorter than one row of pixels
    #[error("invalid stride: {stride} bytes is shorter than a {row_bytes} byte row")]
    InvalidStride { stride: usize, row_bytes: usize },
    /// Buffer shorter than its declared layout
    #[error("buffer too small: need {needed} bytes, have {have}")]
    BufferTooSmall { needed: usize, have: usize },
    /// Pixel format not handled by the requested operation
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },
    /// Frame or buffer does not match the geometry a context was created for
    #[error("geometry mismatch: expected {expected}, got {actual}")]
    GeometryMismatch {
        expected: ImageGeometry,
        actual: ImageGeometry,
    },
    /// Frame has no plane buffers
    #[error("frame has no allocated planes")]
    FrameNotAllocated,
    /// Native context construction returned null
    #[error("failed to create scaling context: {message}")]
    ContextCreation { message: String },
    /// Frame buffer allocation failed
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
    /// Name that does not match any known format or method
    #[error("unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },
    /// Native scaler failure
    #[error("scaler error: {message}")]
    Scaler { message: String },
}

impl Error {
    /**
        Create an invalid geometry error with the given message.
    */
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    /**
        Create an unsupported format error with the given message.
    */
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /**
        Create a context creation error with the given message.
    */
    pub fn context_creation(message: impl Into<String>) -> Self {
        Self::ContextCreation {
            message: message.into(),
        }
    }

    /**
        Create an unknown name error for a value of the given kind.
    */
    pub fn unknown_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }

    /**
        Create a scaler error with the given message.
    */
    pub fn scaler(message: impl Into<String>) -> Self {
        Self::Scaler {
            message: message.into(),
        }
    }
}

/**
    Result type alias for the ffmpeg scaling crates.
*/
pub type Result<T> = std::result::Result<T, Error>;
