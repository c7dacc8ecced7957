//! Segviz - instance segmentation overlay rendering
//!
//! Turns sets of binary instance masks into translucent RGBA overlays
//! ready to composite over an image.
//!
//! # Overview
//!
//! The pipeline covers:
//!
//! - Bit-packed binary masks and float RGBA canvases
//! - Per-pixel ownership resolution (smallest mask wins overlaps)
//! - Random per-instance fill colors
//! - Morphological mask cleanup and boundary tracing
//! - Outline stamping and nearest-neighbor resizing
//!
//! # Example
//!
//! ```
//! use segviz::{Bitmap, MaskSet};
//! use segviz::render::{RenderOptions, render};
//!
//! let mask = Bitmap::from_fn(64, 48, |x, y| x > 10 && y > 10).unwrap();
//! let masks = MaskSet::new(vec![mask]).unwrap();
//! let overlay = render(&masks, &RenderOptions::default()).unwrap();
//! assert_eq!(overlay.dimensions(), (64, 48));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use segviz_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use segviz_morph as morph;
pub use segviz_render as render;
