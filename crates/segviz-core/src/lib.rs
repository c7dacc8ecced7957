//! segviz-core - Basic data structures for mask overlay rendering
//!
//! This crate provides the containers shared by the segviz pipeline:
//!
//! - [`Bitmap`] - bit-packed binary mask (one detected object)
//! - [`MaskSet`] - validated, ordered collection of equal-shaped masks
//! - [`Canvas`] / [`Rgba`] - float RGBA output layer in [0, 1]
//!
//! All structures are plain owned values created fresh per rendering call;
//! nothing here carries cross-call state.

pub mod bitmap;
pub mod canvas;
pub mod error;
pub mod maskset;

pub use bitmap::Bitmap;
pub use canvas::{Canvas, Rgba};
pub use error::{Error, Result};
pub use maskset::MaskSet;
