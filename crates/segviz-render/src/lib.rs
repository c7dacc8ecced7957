//! Overlay rendering for instance segmentation masks
//!
//! Turns a set of binary instance masks into one translucent RGBA overlay:
//! overlaps are resolved so the smallest mask owns each contested pixel,
//! every instance gets a random fill color, and (optionally) cleaned mask
//! boundaries are stamped on top in blue before the overlay is resized to
//! the display resolution.
//!
//! [`render`] runs the whole pipeline; the stages are public for callers
//! that need only part of it.

pub mod color;
pub mod composite;
pub mod contour;
pub mod error;
pub mod ownership;
pub mod rasterize;

pub use color::{ColorTable, FILL_ALPHA, OUTLINE_COLOR};
pub use composite::{Backend, composite};
pub use contour::{Contour, clean_mask, outline_stamp, stamp_outlines, trace_contours};
pub use error::{RenderError, RenderResult};
pub use ownership::{NO_OWNER, OwnershipMap};
pub use rasterize::resize_nearest;

use segviz_core::{Canvas, MaskSet};

/// Settings for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output (width, height); `None` keeps the mask resolution.
    pub target_size: Option<(u32, u32)>,
    /// Stamp cleaned mask boundaries over the fills.
    pub high_quality: bool,
    /// Compositing execution backend.
    pub backend: Backend,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            target_size: None,
            high_quality: true,
            backend: Backend::Auto,
        }
    }
}

/// Render an overlay with a fresh random color per mask.
///
/// # Errors
///
/// Propagates container, morphology, and resize errors from the stages.
pub fn render(masks: &MaskSet, options: &RenderOptions) -> RenderResult<Canvas> {
    let colors = ColorTable::random(masks.len());
    render_with(masks, &colors, options)
}

/// Render an overlay with a caller-supplied color table.
///
/// Colors are indexed by priority rank (ascending mask area), not by the
/// caller's mask order.
pub fn render_with(
    masks: &MaskSet,
    colors: &ColorTable,
    options: &RenderOptions,
) -> RenderResult<Canvas> {
    let map = OwnershipMap::resolve(masks);
    let mut canvas = composite(&map, colors, options.backend)?;
    if options.high_quality {
        let stamp = outline_stamp(masks)?;
        stamp_outlines(&mut canvas, &stamp);
    }
    if let Some((width, height)) = options.target_size {
        if (width, height) != masks.dimensions() {
            canvas = resize_nearest(&canvas, width, height)?;
        }
    }
    Ok(canvas)
}
