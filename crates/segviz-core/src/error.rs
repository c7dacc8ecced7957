//! Error types for segviz-core
//!
//! Provides a unified error type for container construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal representation details.

use thiserror::Error;

/// segviz-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Grid dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Zero masks supplied where at least one is required
    #[error("empty mask set: at least one mask is required")]
    EmptyMaskSet,

    /// Input buffer has the wrong number of elements
    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Result type alias for segviz-core operations
pub type Result<T> = std::result::Result<T, Error>;
