//! Binary brick morphology
//!
//! Implements dilation, erosion, opening, and closing for [`Bitmap`]s with
//! rectangular (brick) structuring elements, the only shapes the overlay
//! pipeline needs (3x3 closing, 8x8 opening).
//!
//! All horizontal work happens at 32-bit word granularity: each brick
//! column offset becomes one shift-and-OR (dilation) or shift-and-AND
//! (erosion) pass over a row, and the vertical extent is applied as a
//! second separable pass over whole rows.
//!
//! # Boundary convention
//!
//! Pixels outside the image read as background for dilation and as
//! foreground for erosion. This makes closing extensive everywhere,
//! including at the image border: a mask touching the edge is not eaten
//! by the erosion half of a close.

use crate::error::{MorphError, MorphResult};
use segviz_core::Bitmap;

/// Dilate with a brick structuring element.
///
/// `out(x, y)` is foreground iff any pixel of the brick neighborhood of
/// (x, y) is foreground. The anchor sits at `(hsize / 2, vsize / 2)`.
pub fn dilate_brick(mask: &Bitmap, hsize: u32, vsize: u32) -> MorphResult<Bitmap> {
    check_brick(hsize, vsize)?;
    if hsize == 1 && vsize == 1 {
        return Ok(mask.clone());
    }
    let tmp = if hsize > 1 {
        dilate_horizontal(mask, hsize)
    } else {
        mask.clone()
    };
    let mut out = if vsize > 1 {
        dilate_vertical(&tmp, vsize)
    } else {
        tmp
    };
    out.clear_padding();
    Ok(out)
}

/// Erode with a brick structuring element.
///
/// `out(x, y)` is foreground iff every pixel of the brick neighborhood of
/// (x, y) is foreground, with out-of-image pixels counting as foreground.
pub fn erode_brick(mask: &Bitmap, hsize: u32, vsize: u32) -> MorphResult<Bitmap> {
    check_brick(hsize, vsize)?;
    if hsize == 1 && vsize == 1 {
        return Ok(mask.clone());
    }
    let tmp = if hsize > 1 {
        erode_horizontal(mask, hsize)
    } else {
        mask.clone()
    };
    let mut out = if vsize > 1 {
        erode_vertical(&tmp, vsize)
    } else {
        tmp
    };
    out.clear_padding();
    Ok(out)
}

/// Open with a brick: erosion followed by dilation.
///
/// Removes foreground features smaller than the brick.
pub fn open_brick(mask: &Bitmap, hsize: u32, vsize: u32) -> MorphResult<Bitmap> {
    let eroded = erode_brick(mask, hsize, vsize)?;
    dilate_brick(&eroded, hsize, vsize)
}

/// Close with a brick: dilation followed by erosion.
///
/// Fills holes and gaps smaller than the brick.
pub fn close_brick(mask: &Bitmap, hsize: u32, vsize: u32) -> MorphResult<Bitmap> {
    let dilated = dilate_brick(mask, hsize, vsize)?;
    erode_brick(&dilated, hsize, vsize)
}

fn check_brick(hsize: u32, vsize: u32) -> MorphResult<()> {
    if hsize == 0 || vsize == 0 {
        return Err(MorphError::InvalidBrick {
            width: hsize,
            height: vsize,
        });
    }
    Ok(())
}

/// Column/row offsets covered by a brick of `size` with the anchor at
/// `size / 2` (for size 8: -4..=3).
fn brick_offsets(size: u32) -> impl Iterator<Item = i32> {
    let anchor = (size / 2) as i32;
    (0..size as i32).map(move |i| i - anchor)
}

/// Word `i` of a row after moving its pixel content `shift` pixels toward
/// higher x. Bits moved in from outside the row read as `fill` bits.
///
/// Rows are MSB-first, so moving content right is a logical right shift of
/// the whole row bit-string.
#[inline]
fn shifted_word(row: &[u32], i: usize, shift: i32, fill: u32) -> u32 {
    let wpl = row.len() as i32;
    let word_shift = shift.div_euclid(32);
    let bit_shift = shift.rem_euclid(32) as u32;
    let word_at = |j: i32| -> u32 {
        if (0..wpl).contains(&j) {
            row[j as usize]
        } else {
            fill
        }
    };
    let hi = i as i32 - word_shift;
    if bit_shift == 0 {
        word_at(hi)
    } else {
        (word_at(hi) >> bit_shift) | (word_at(hi - 1) << (32 - bit_shift))
    }
}

fn dilate_horizontal(mask: &Bitmap, size: u32) -> Bitmap {
    let mut out = mask.blank_like();
    let wpl = mask.wpl() as usize;
    for y in 0..mask.height() {
        let src = mask.row(y);
        let dst = out.row_mut(y);
        for i in 0..wpl {
            let mut acc = 0u32;
            // out(x) |= src(x + dx): content moved right by -dx
            for dx in brick_offsets(size) {
                acc |= shifted_word(src, i, -dx, 0);
            }
            dst[i] = acc;
        }
    }
    out
}

fn erode_horizontal(mask: &Bitmap, size: u32) -> Bitmap {
    // Padding bits must read as foreground while shifting
    let mut padded = mask.clone();
    set_padding_ones(&mut padded);
    let mut out = mask.blank_like();
    let wpl = mask.wpl() as usize;
    for y in 0..mask.height() {
        let src = padded.row(y);
        let dst = out.row_mut(y);
        for i in 0..wpl {
            let mut acc = !0u32;
            for dx in brick_offsets(size) {
                acc &= shifted_word(src, i, -dx, !0);
            }
            dst[i] = acc;
        }
    }
    out
}

fn dilate_vertical(mask: &Bitmap, size: u32) -> Bitmap {
    let mut out = mask.blank_like();
    let h = mask.height() as i32;
    let wpl = mask.wpl() as usize;
    for y in 0..mask.height() {
        let dst = out.row_mut(y);
        for dy in brick_offsets(size) {
            let sy = y as i32 + dy;
            if sy < 0 || sy >= h {
                continue;
            }
            let src_start = sy as usize * wpl;
            for i in 0..wpl {
                dst[i] |= mask.data()[src_start + i];
            }
        }
    }
    out
}

fn erode_vertical(mask: &Bitmap, size: u32) -> Bitmap {
    let mut out = mask.blank_like();
    let h = mask.height() as i32;
    let wpl = mask.wpl() as usize;
    for y in 0..mask.height() {
        let dst = out.row_mut(y);
        dst.fill(!0);
        for dy in brick_offsets(size) {
            let sy = y as i32 + dy;
            // Rows outside the image are all foreground: AND is a no-op
            if sy < 0 || sy >= h {
                continue;
            }
            let src_start = sy as usize * wpl;
            for i in 0..wpl {
                dst[i] &= mask.data()[src_start + i];
            }
        }
    }
    out
}

/// Set the padding bits past the image width to 1 in every row.
fn set_padding_ones(mask: &mut Bitmap) {
    let fill = !mask.tail_mask();
    if fill == 0 {
        return;
    }
    let wpl = mask.wpl() as usize;
    let height = mask.height() as usize;
    let data = mask.data_mut();
    for y in 0..height {
        data[y * wpl + wpl - 1] |= fill;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image() -> Bitmap {
        // 5x5 image with a 3x3 square in the center
        Bitmap::from_fn(5, 5, |x, y| (1..4).contains(&x) && (1..4).contains(&y)).unwrap()
    }

    /// 50x37 image with patterns crossing the 32-bit word boundary.
    fn create_pattern_image() -> Bitmap {
        let mut bm = Bitmap::new(50, 37).unwrap();
        // Rectangle spanning words 0 and 1
        for y in 3..15 {
            for x in 28..37 {
                bm.set(x, y, true);
            }
        }
        // Diagonal across the boundary
        for i in 0..30u32 {
            let (x, y) = (i + 10, i + 5);
            if x < 50 && y < 37 {
                bm.set(x, y, true);
            }
        }
        // Pixels at word boundaries and corners
        bm.set(0, 0, true);
        bm.set(31, 0, true);
        bm.set(32, 0, true);
        bm.set(49, 0, true);
        // Bottom-right cluster
        for y in 30..37 {
            for x in 40..50 {
                bm.set(x, y, true);
            }
        }
        bm
    }

    /// Pixel-by-pixel dilation reference (ground truth for the word-level
    /// implementation).
    fn dilate_reference(mask: &Bitmap, hsize: u32, vsize: u32) -> Bitmap {
        let (w, h) = (mask.width() as i32, mask.height() as i32);
        Bitmap::from_fn(mask.width(), mask.height(), |x, y| {
            brick_offsets(vsize).any(|dy| {
                brick_offsets(hsize).any(|dx| {
                    let (sx, sy) = (x as i32 + dx, y as i32 + dy);
                    sx >= 0 && sx < w && sy >= 0 && sy < h && mask.get(sx as u32, sy as u32)
                })
            })
        })
        .unwrap()
    }

    /// Pixel-by-pixel erosion reference; out-of-image pixels are
    /// foreground.
    fn erode_reference(mask: &Bitmap, hsize: u32, vsize: u32) -> Bitmap {
        let (w, h) = (mask.width() as i32, mask.height() as i32);
        Bitmap::from_fn(mask.width(), mask.height(), |x, y| {
            brick_offsets(vsize).all(|dy| {
                brick_offsets(hsize).all(|dx| {
                    let (sx, sy) = (x as i32 + dx, y as i32 + dy);
                    if sx < 0 || sx >= w || sy < 0 || sy >= h {
                        true
                    } else {
                        mask.get(sx as u32, sy as u32)
                    }
                })
            })
        })
        .unwrap()
    }

    const BRICK_SIZES: &[(u32, u32)] = &[(3, 3), (8, 8), (5, 7), (1, 5), (5, 1), (9, 9), (2, 2)];

    #[test]
    fn test_dilate_matches_reference() {
        let mask = create_pattern_image();
        for &(w, h) in BRICK_SIZES {
            let fast = dilate_brick(&mask, w, h).unwrap();
            let reference = dilate_reference(&mask, w, h);
            assert_eq!(fast, reference, "dilate_brick({w}, {h}) != reference");
        }
    }

    #[test]
    fn test_erode_matches_reference() {
        let mask = create_pattern_image();
        for &(w, h) in BRICK_SIZES {
            let fast = erode_brick(&mask, w, h).unwrap();
            let reference = erode_reference(&mask, w, h);
            assert_eq!(fast, reference, "erode_brick({w}, {h}) != reference");
        }
    }

    #[test]
    fn test_dilate_expands_square() {
        let mask = create_test_image();
        let dilated = dilate_brick(&mask, 3, 3).unwrap();
        // The 3x3 center square grows to cover the whole 5x5 image
        assert_eq!(dilated.count(), 25);
    }

    #[test]
    fn test_erode_shrinks_square_to_center() {
        let mask = create_test_image();
        let eroded = erode_brick(&mask, 3, 3).unwrap();
        assert!(eroded.get(2, 2));
        assert_eq!(eroded.count(), 1);
    }

    #[test]
    fn test_erode_keeps_full_mask_full() {
        // Out-of-image pixels count as foreground, so a full mask is stable
        let full = Bitmap::from_fn(50, 9, |_, _| true).unwrap();
        let eroded = erode_brick(&full, 3, 3).unwrap();
        assert_eq!(eroded.count(), full.count());
    }

    #[test]
    fn test_close_is_extensive() {
        let mask = create_pattern_image();
        let closed = close_brick(&mask, 3, 3).unwrap();
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if mask.get(x, y) {
                    assert!(closed.get(x, y), "close lost pixel ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_close_fills_small_hole() {
        let mut mask = Bitmap::from_fn(9, 9, |x, y| (2..7).contains(&x) && (2..7).contains(&y))
            .unwrap();
        mask.set(4, 4, false);
        let closed = close_brick(&mask, 3, 3).unwrap();
        assert!(closed.get(4, 4));
    }

    #[test]
    fn test_open_removes_interior_speckle() {
        // A 2x2 blob in the interior disappears under a 3x3 opening
        let mask =
            Bitmap::from_fn(20, 20, |x, y| (9..11).contains(&x) && (9..11).contains(&y)).unwrap();
        let opened = open_brick(&mask, 3, 3).unwrap();
        assert_eq!(opened.count(), 0);
    }

    #[test]
    fn test_open_preserves_large_block() {
        let mask =
            Bitmap::from_fn(30, 30, |x, y| (5..25).contains(&x) && (5..25).contains(&y)).unwrap();
        // An even brick anchored at size / 2 shifts the opening by one
        // pixel toward higher x and y; the block itself survives intact
        let opened = open_brick(&mask, 8, 8).unwrap();
        let expected =
            Bitmap::from_fn(30, 30, |x, y| (6..26).contains(&x) && (6..26).contains(&y)).unwrap();
        assert_eq!(opened, expected);
    }

    #[test]
    fn test_odd_opening_is_anti_extensive() {
        let mask =
            Bitmap::from_fn(30, 30, |x, y| (5..25).contains(&x) && (5..25).contains(&y)).unwrap();
        let opened = open_brick(&mask, 9, 9).unwrap();
        assert_eq!(opened, mask);
    }

    #[test]
    fn test_single_pixel_dies_under_8x8_opening() {
        let mut mask = Bitmap::new(16, 16).unwrap();
        mask.set(8, 8, true);
        let closed = close_brick(&mask, 3, 3).unwrap();
        assert!(closed.get(8, 8));
        let opened = open_brick(&closed, 8, 8).unwrap();
        assert_eq!(opened.count(), 0);
    }

    #[test]
    fn test_identity_brick() {
        let mask = create_pattern_image();
        assert_eq!(dilate_brick(&mask, 1, 1).unwrap(), mask);
        assert_eq!(erode_brick(&mask, 1, 1).unwrap(), mask);
    }

    #[test]
    fn test_zero_brick_rejected() {
        let mask = create_test_image();
        assert!(dilate_brick(&mask, 0, 3).is_err());
        assert!(erode_brick(&mask, 3, 0).is_err());
    }

    #[test]
    fn test_padding_stays_clear_through_morphology() {
        // Width 50: dilation pushes content toward the row tail; padding
        // bits must not leak into the area count
        let mask = create_pattern_image();
        let dilated = dilate_brick(&mask, 9, 1).unwrap();
        let reference = dilate_reference(&mask, 9, 1);
        assert_eq!(dilated.count(), reference.count());
    }
}
