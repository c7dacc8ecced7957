//! segviz-morph - Binary morphology for mask cleanup
//!
//! Word-level brick dilation, erosion, opening, and closing over
//! [`segviz_core::Bitmap`]. The overlay pipeline uses these to fill small
//! holes (closing) and drop speckle noise (opening) before tracing mask
//! boundaries.

pub mod binary;
mod error;

pub use binary::{close_brick, dilate_brick, erode_brick, open_brick};
pub use error::{MorphError, MorphResult};
