//! Error types for segviz-render

use thiserror::Error;

/// Errors that can occur while rendering an overlay
#[derive(Debug, Error)]
pub enum RenderError {
    /// Core container error
    #[error("core error: {0}")]
    Core(#[from] segviz_core::Error),

    /// Morphology error during mask cleanup
    #[error("morphology error: {0}")]
    Morph(#[from] segviz_morph::MorphError),

    /// Caller-supplied color table does not cover every mask
    #[error("color table too small: {actual} colors for {expected} masks")]
    ColorCount { expected: usize, actual: usize },
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
