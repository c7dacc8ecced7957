//! Error types for segviz-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core container error
    #[error("core error: {0}")]
    Core(#[from] segviz_core::Error),

    /// Brick structuring element with a zero dimension
    #[error("invalid brick size: {width}x{height}")]
    InvalidBrick { width: u32, height: u32 },
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
