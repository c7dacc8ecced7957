//! Ordered collections of equal-shaped masks
//!
//! `MaskSet` is the validated boundary between the upstream detector and
//! the rendering pipeline: whatever representation the masks arrive in,
//! they are normalized into [`Bitmap`]s here, once, and the core algorithm
//! only ever sees boolean grids.

use crate::bitmap::Bitmap;
use crate::error::{Error, Result};

/// An ordered, non-empty sequence of masks sharing one (width, height).
///
/// Insertion order is preserved but carries no priority; overlap priority
/// is recomputed from mask areas during ownership resolution.
#[derive(Debug, Clone)]
pub struct MaskSet {
    masks: Vec<Bitmap>,
    width: u32,
    height: u32,
}

impl MaskSet {
    /// Build from prepared bitmaps.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyMaskSet`] if `masks` is empty
    /// - [`Error::DimensionMismatch`] if any mask disagrees with the first
    ///   one's shape
    pub fn new(masks: Vec<Bitmap>) -> Result<Self> {
        let first = masks.first().ok_or(Error::EmptyMaskSet)?;
        let (width, height) = first.dimensions();
        for mask in &masks[1..] {
            if !mask.same_shape(first) {
                return Err(Error::DimensionMismatch {
                    expected: (width, height),
                    actual: mask.dimensions(),
                });
            }
        }
        Ok(Self {
            masks,
            width,
            height,
        })
    }

    /// Build from row-major byte planes, one per mask, non-zero meaning
    /// foreground.
    pub fn from_byte_planes(width: u32, height: u32, planes: &[&[u8]]) -> Result<Self> {
        if planes.is_empty() {
            return Err(Error::EmptyMaskSet);
        }
        let masks = planes
            .iter()
            .map(|plane| Bitmap::from_bytes(width, height, plane))
            .collect::<Result<Vec<_>>>()?;
        Self::new(masks)
    }

    /// Build from row-major boolean planes, one per mask.
    pub fn from_bool_planes(width: u32, height: u32, planes: &[&[bool]]) -> Result<Self> {
        if planes.is_empty() {
            return Err(Error::EmptyMaskSet);
        }
        let masks = planes
            .iter()
            .map(|plane| Bitmap::from_bools(width, height, plane))
            .collect::<Result<Vec<_>>>()?;
        Self::new(masks)
    }

    /// Shared mask width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Shared mask height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Shared (width, height) pair.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of masks. Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// The masks in insertion order.
    #[inline]
    pub fn masks(&self) -> &[Bitmap] {
        &self.masks
    }

    /// Mask at `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Bitmap> {
        self.masks.get(index)
    }

    /// Iterate over the masks in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bitmap> {
        self.masks.iter()
    }

    /// Foreground pixel count per mask, in insertion order. These are the
    /// sort keys for overlap priority.
    pub fn areas(&self) -> Vec<u64> {
        self.masks.iter().map(Bitmap::count).collect()
    }
}

impl<'a> IntoIterator for &'a MaskSet {
    type Item = &'a Bitmap;
    type IntoIter = std::slice::Iter<'a, Bitmap>;

    fn into_iter(self) -> Self::IntoIter {
        self.masks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(MaskSet::new(Vec::new()), Err(Error::EmptyMaskSet)));
        assert!(matches!(
            MaskSet::from_byte_planes(4, 4, &[]),
            Err(Error::EmptyMaskSet)
        ));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = Bitmap::new(4, 4).unwrap();
        let b = Bitmap::new(4, 5).unwrap();
        let result = MaskSet::new(vec![a, b]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: (4, 4),
                actual: (4, 5)
            })
        ));
    }

    #[test]
    fn test_order_and_areas() {
        let mut a = Bitmap::new(3, 3).unwrap();
        a.set(0, 0, true);
        a.set(1, 0, true);
        let mut b = Bitmap::new(3, 3).unwrap();
        b.set(2, 2, true);
        let set = MaskSet::new(vec![a, b]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.dimensions(), (3, 3));
        assert_eq!(set.areas(), vec![2, 1]);
    }

    #[test]
    fn test_from_byte_planes() {
        let plane0 = [1u8, 0, 0, 1];
        let plane1 = [0u8, 255, 0, 0];
        let set = MaskSet::from_byte_planes(2, 2, &[&plane0, &plane1]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get(0).unwrap().get(0, 0));
        assert!(set.get(1).unwrap().get(1, 0));
    }
}
