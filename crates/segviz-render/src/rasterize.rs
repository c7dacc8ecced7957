//! Canvas resampling
//!
//! Overlays are rendered at mask resolution and resized to the display
//! size as a last step. Nearest-neighbor sampling keeps instance colors
//! exact: the output contains no channel value absent from the input.

use crate::error::RenderResult;
use segviz_core::Canvas;

/// Resize a canvas with nearest-neighbor sampling.
///
/// Output pixel (x, y) reads input pixel
/// `(x * src_w / dst_w, y * src_h / dst_h)`. Resizing to the source
/// dimensions returns a plain copy.
///
/// # Errors
///
/// Returns an error if either target dimension is zero.
pub fn resize_nearest(canvas: &Canvas, width: u32, height: u32) -> RenderResult<Canvas> {
    let (src_w, src_h) = canvas.dimensions();
    if (width, height) == (src_w, src_h) {
        return Ok(canvas.clone());
    }
    let mut out = Canvas::new(width, height)?;
    let src = canvas.data();
    let dst = out.data_mut();
    let row_len = width as usize * 4;
    for y in 0..height as usize {
        let sy = y * src_h as usize / height as usize;
        let src_row = &src[sy * src_w as usize * 4..(sy + 1) * src_w as usize * 4];
        let dst_row = &mut dst[y * row_len..(y + 1) * row_len];
        for x in 0..width as usize {
            let sx = x * src_w as usize / width as usize;
            dst_row[x * 4..x * 4 + 4].copy_from_slice(&src_row[sx * 4..sx * 4 + 4]);
        }
    }
    Ok(out)
}
