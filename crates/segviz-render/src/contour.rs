//! Mask boundary extraction and outline stamping
//!
//! Each mask is cleaned up before tracing: a 3x3 closing seals pinhole
//! gaps, then an 8x8 opening drops speckles and thin filaments that would
//! produce noisy borders. Boundaries of the cleaned mask are traced with
//! Moore neighborhood following, one outer contour per 8-connected
//! foreground component and one contour per interior hole. Contour points
//! are stamped into a coverage buffer with a 2-pixel pen, which the
//! renderer blends over the fill canvas in the outline color.

use crate::color::OUTLINE_COLOR;
use crate::error::RenderResult;
use segviz_core::{Bitmap, Canvas, MaskSet, Rgba};
use segviz_morph::{close_brick, open_brick};

/// Brick size of the gap-sealing closing.
pub const CLOSING_BRICK: u32 = 3;

/// Brick size of the speckle-removing opening.
pub const OPENING_BRICK: u32 = 8;

/// Stamped outline thickness in pixels.
pub const PEN_WIDTH: u32 = 2;

/// Neighbor x offsets in clockwise order starting east.
const DX: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
/// Neighbor y offsets in clockwise order starting east.
const DY: [i32; 8] = [0, 1, 1, 1, 0, -1, -1, -1];

/// Direction index for a unit offset, indexed as `[1 + dy][1 + dx]`.
const DIRTAB: [[i8; 3]; 3] = [[5, 6, 7], [4, -1, 0], [3, 2, 1]];

const WEST: usize = 4;
const SOUTH: usize = 2;

/// A closed boundary of one foreground component or one interior hole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<(i32, i32)>,
    hole: bool,
}

impl Contour {
    /// Boundary pixels in traversal order. The start pixel appears once.
    #[inline]
    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    /// Whether this boundary encloses a hole rather than a component.
    #[inline]
    pub fn is_hole(&self) -> bool {
        self.hole
    }
}

/// Regularize a mask for boundary tracing: close with a
/// [`CLOSING_BRICK`] square, then open with an [`OPENING_BRICK`] square.
///
/// The result can be empty when the mask had no feature that survives the
/// opening.
pub fn clean_mask(mask: &Bitmap) -> RenderResult<Bitmap> {
    let closed = close_brick(mask, CLOSING_BRICK, CLOSING_BRICK)?;
    Ok(open_brick(&closed, OPENING_BRICK, OPENING_BRICK)?)
}

/// Trace all boundaries of a mask.
///
/// Outer contours are found by scanning for unvisited 8-connected
/// foreground components; hole contours by scanning for 4-connected
/// background components that do not touch the image edge. Every contour
/// is a closed pixel chain in clockwise order.
pub fn trace_contours(mask: &Bitmap) -> Vec<Contour> {
    let mut contours = outer_contours(mask);
    contours.extend(hole_contours(mask));
    contours
}

fn outer_contours(mask: &Bitmap) -> Vec<Contour> {
    let (w, h) = (mask.width(), mask.height());
    let mut visited = match Bitmap::new(w, h) {
        Ok(bm) => bm,
        Err(_) => return Vec::new(),
    };
    let mut contours = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if !mask.get(x, y) || visited.get(x, y) {
                continue;
            }
            // Scan-order-first pixel of a new component: nothing above or
            // to the left, so the backtrack cell sits to the west
            let points = moore_trace(mask, (x, y), WEST);
            contours.push(Contour {
                points,
                hole: false,
            });
            flood_component(mask, &mut visited, x, y);
        }
    }
    contours
}

fn hole_contours(mask: &Bitmap) -> Vec<Contour> {
    let (w, h) = (mask.width(), mask.height());
    let mut visited = match Bitmap::new(w, h) {
        Ok(bm) => bm,
        Err(_) => return Vec::new(),
    };
    let mut contours = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if mask.get(x, y) || visited.get(x, y) {
                continue;
            }
            let touches_edge = flood_background(mask, &mut visited, x, y);
            if touches_edge || y == 0 {
                continue;
            }
            // The pixel above the hole's scan-order-first background
            // pixel is foreground: tracing from it with the backtrack
            // pointing south (into the hole) walks the hole's border
            let points = moore_trace(mask, (x, y - 1), SOUTH);
            contours.push(Contour { points, hole: true });
        }
    }
    contours
}

/// Moore boundary following with the stopping criterion of Jacob
/// Eliosoff: terminate on re-entering the start pixel via the same move
/// that left it the first time.
///
/// `back` is the direction from `start` to a known background cell; the
/// neighborhood scan proceeds clockwise from just past it.
fn moore_trace(mask: &Bitmap, start: (u32, u32), back: usize) -> Vec<(i32, i32)> {
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    let start = (start.0 as i32, start.1 as i32);
    let mut points = vec![start];
    let mut cur = start;
    let mut back = back;
    let mut first_move: Option<usize> = None;

    let fg = |x: i32, y: i32| x >= 0 && x < w && y >= 0 && y < h && mask.get(x as u32, y as u32);

    // A closed chain visits each boundary pixel at most four times
    let cap = 4 * (w as usize) * (h as usize) + 8;
    for _ in 0..cap {
        let mut prev_bg = (cur.0 + DX[back], cur.1 + DY[back]);
        let mut found = None;
        for k in 1..=8 {
            let d = (back + k) % 8;
            let (nx, ny) = (cur.0 + DX[d], cur.1 + DY[d]);
            if fg(nx, ny) {
                found = Some((d, nx, ny));
                break;
            }
            prev_bg = (nx, ny);
        }
        let Some((d, nx, ny)) = found else {
            // Isolated pixel
            break;
        };
        if cur == start {
            if first_move == Some(d) {
                break;
            }
            if first_move.is_none() {
                first_move = Some(d);
            }
        }
        // Backtrack for the next step: the background cell scanned just
        // before the move, seen from the new pixel. Consecutive ring
        // cells are 8-adjacent, so the offset is always within the table.
        let (bx, by) = (prev_bg.0 - nx, prev_bg.1 - ny);
        back = DIRTAB[(1 + by) as usize][(1 + bx) as usize] as usize;
        cur = (nx, ny);
        if cur != start {
            points.push(cur);
        }
    }
    points
}

/// Mark the 8-connected foreground component containing (x, y).
fn flood_component(mask: &Bitmap, visited: &mut Bitmap, x: u32, y: u32) {
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    let mut stack = vec![(x as i32, y as i32)];
    visited.set(x, y, true);
    while let Some((cx, cy)) = stack.pop() {
        for d in 0..8 {
            let (nx, ny) = (cx + DX[d], cy + DY[d]);
            if nx < 0 || nx >= w || ny < 0 || ny >= h {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if mask.get(ux, uy) && !visited.get(ux, uy) {
                visited.set(ux, uy, true);
                stack.push((nx, ny));
            }
        }
    }
}

/// Mark the 4-connected background component containing (x, y); returns
/// whether it touches the image edge.
fn flood_background(mask: &Bitmap, visited: &mut Bitmap, x: u32, y: u32) -> bool {
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    let mut stack = vec![(x as i32, y as i32)];
    visited.set(x, y, true);
    let mut touches_edge = false;
    while let Some((cx, cy)) = stack.pop() {
        if cx == 0 || cx == w - 1 || cy == 0 || cy == h - 1 {
            touches_edge = true;
        }
        for (dx, dy) in [(1, 0), (0, 1), (-1, 0), (0, -1)] {
            let (nx, ny) = (cx + dx, cy + dy);
            if nx < 0 || nx >= w || ny < 0 || ny >= h {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if !mask.get(ux, uy) && !visited.get(ux, uy) {
                visited.set(ux, uy, true);
                stack.push((nx, ny));
            }
        }
    }
    touches_edge
}

/// Build the outline coverage buffer for a mask set: one `u8` per pixel,
/// 255 where any cleaned mask boundary lands under the 2-pixel pen.
///
/// Masks emptied by cleanup are logged and skipped; their fill is still
/// rendered, they just carry no outline.
pub fn outline_stamp(masks: &MaskSet) -> RenderResult<Vec<u8>> {
    let (width, height) = masks.dimensions();
    let mut stamp = vec![0u8; width as usize * height as usize];
    for (index, mask) in masks.iter().enumerate() {
        let cleaned = clean_mask(mask)?;
        if cleaned.count() == 0 {
            log::warn!("mask {index} vanished during cleanup, skipping its outline");
            continue;
        }
        for contour in trace_contours(&cleaned) {
            stamp_contour(&mut stamp, width, height, &contour);
        }
    }
    Ok(stamp)
}

/// Stamp one contour with a `PEN_WIDTH` square pen anchored at each point.
fn stamp_contour(stamp: &mut [u8], width: u32, height: u32, contour: &Contour) {
    let pen = PEN_WIDTH as i32;
    for &(px, py) in contour.points() {
        for dy in 0..pen {
            for dx in 0..pen {
                let (x, y) = (px + dx, py + dy);
                if x < 0 || x >= width as i32 || y < 0 || y >= height as i32 {
                    continue;
                }
                stamp[y as usize * width as usize + x as usize] = 255;
            }
        }
    }
}

/// Blend the outline buffer over the fill canvas in [`OUTLINE_COLOR`],
/// with the coverage value scaling the outline alpha.
pub fn stamp_outlines(canvas: &mut Canvas, stamp: &[u8]) {
    let (width, height) = canvas.dimensions();
    for y in 0..height {
        for x in 0..width {
            let v = stamp[y as usize * width as usize + x as usize];
            if v == 0 {
                continue;
            }
            let alpha = OUTLINE_COLOR.a * (v as f32 / 255.0);
            let color = Rgba::new(OUTLINE_COLOR.r, OUTLINE_COLOR.g, OUTLINE_COLOR.b, alpha);
            canvas.blend_over(x, y, color);
        }
    }
}
