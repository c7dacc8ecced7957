//! Bit-packed binary grid
//!
//! `Bitmap` is the canonical boolean-mask container used throughout the
//! pipeline.
//!
//! # Pixel layout
//!
//! - Data is stored in 32-bit words
//! - Every row starts on a 32-bit word boundary (`wpl = ceil(width / 32)`)
//! - Pixels are packed MSB to LSB within each word: pixel `x` lives at bit
//!   `31 - (x % 32)` of word `x / 32`
//! - Padding bits past the image width are kept zero, so word-level
//!   operations (area counts, ownership claims) never see stray pixels

use crate::error::{Error, Result};

/// A binary image: one bit per pixel, word-aligned rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    wpl: u32,
    data: Vec<u32>,
}

impl Bitmap {
    /// Create an all-background bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = width.div_ceil(32);
        Ok(Self {
            width,
            height,
            wpl,
            data: vec![0; (wpl * height) as usize],
        })
    }

    /// Create an all-background bitmap with the same shape as `self`.
    pub fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            wpl: self.wpl,
            data: vec![0; self.data.len()],
        }
    }

    /// Build from a row-major slice of booleans.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `values.len() != width * height`.
    pub fn from_bools(width: u32, height: u32, values: &[bool]) -> Result<Self> {
        Self::from_indexed(width, height, values.len(), |i| values[i])
    }

    /// Build from a row-major slice of bytes, treating non-zero as
    /// foreground. This is the normalization point for detectors that emit
    /// 0/1 or 0/255 mask planes.
    pub fn from_bytes(width: u32, height: u32, values: &[u8]) -> Result<Self> {
        Self::from_indexed(width, height, values.len(), |i| values[i] != 0)
    }

    /// Build by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut bitmap = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    bitmap.set(x, y, true);
                }
            }
        }
        Ok(bitmap)
    }

    fn from_indexed<F>(width: u32, height: u32, len: usize, value: F) -> Result<Self>
    where
        F: Fn(usize) -> bool,
    {
        let expected = width as usize * height as usize;
        if len != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: len,
            });
        }
        Self::from_fn(width, height, |x, y| {
            value(y as usize * width as usize + x as usize)
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height) pair.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Words per row.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.wpl
    }

    /// Raw word data, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Mutable raw word data. Callers that set bits directly must restore
    /// the zero-padding invariant with [`Bitmap::clear_padding`].
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// The words of row `y`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = (y * self.wpl) as usize;
        &self.data[start..start + self.wpl as usize]
    }

    /// The words of row `y`, mutable.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.wpl) as usize;
        let wpl = self.wpl as usize;
        &mut self.data[start..start + wpl]
    }

    /// Read pixel (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < self.width && y < self.height);
        let word = self.data[(y * self.wpl + x / 32) as usize];
        (word >> (31 - (x % 32))) & 1 != 0
    }

    /// Write pixel (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        debug_assert!(x < self.width && y < self.height);
        let idx = (y * self.wpl + x / 32) as usize;
        let bit = 0x8000_0000u32 >> (x % 32);
        if on {
            self.data[idx] |= bit;
        } else {
            self.data[idx] &= !bit;
        }
    }

    /// Number of foreground pixels. Exact because padding bits are kept
    /// clear; this is the area used as the ownership sort key.
    pub fn count(&self) -> u64 {
        self.data.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Bit mask selecting the valid (non-padding) bits of the last word in
    /// each row. All ones when the width is a multiple of 32.
    #[inline]
    pub fn tail_mask(&self) -> u32 {
        let extra = self.width % 32;
        if extra == 0 { !0 } else { !0u32 << (32 - extra) }
    }

    /// Zero the padding bits past the image width in every row.
    pub fn clear_padding(&mut self) {
        let mask = self.tail_mask();
        if mask == !0 {
            return;
        }
        let wpl = self.wpl as usize;
        for y in 0..self.height as usize {
            self.data[y * wpl + wpl - 1] &= mask;
        }
    }

    /// Whether `other` has the same width and height.
    #[inline]
    pub fn same_shape(&self, other: &Bitmap) -> bool {
        self.width == other.width && self.height == other.height
    }
}
