//! Float RGBA canvas
//!
//! The rendered output layer: height x width x 4 `f32` channels in [0, 1],
//! row-major, RGBA order. A fresh canvas is fully transparent; unowned
//! pixels stay that way through compositing.

use crate::error::{Error, Result};

/// A non-premultiplied RGBA color with float channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Compose a color from channel values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Source-over compositing of `self` on top of `under`.
    ///
    /// Standard non-premultiplied "over": the result alpha is
    /// `a_s + a_u * (1 - a_s)` and each channel is the alpha-weighted
    /// average renormalized by the result alpha.
    pub fn over(self, under: Rgba) -> Rgba {
        let a = self.a + under.a * (1.0 - self.a);
        if a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let blend = |s: f32, u: f32| (s * self.a + u * under.a * (1.0 - self.a)) / a;
        Rgba {
            r: blend(self.r, under.r),
            g: blend(self.g, under.g),
            b: blend(self.b, under.b),
            a,
        }
    }
}

/// Row-major RGBA float buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Canvas {
    /// Create a fully transparent canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize * 4],
        })
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height) pair.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw channel data: `height * width * 4` floats, RGBA interleaved.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw channel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Read pixel (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        let o = self.offset(x, y);
        Rgba {
            r: self.data[o],
            g: self.data[o + 1],
            b: self.data[o + 2],
            a: self.data[o + 3],
        }
    }

    /// Write pixel (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        let o = self.offset(x, y);
        self.data[o] = color.r;
        self.data[o + 1] = color.g;
        self.data[o + 2] = color.b;
        self.data[o + 3] = color.a;
    }

    /// Alpha-composite `color` on top of the existing pixel (x, y).
    #[inline]
    pub fn blend_over(&mut self, x: u32, y: u32, color: Rgba) {
        let under = self.get(x, y);
        self.set(x, y, color.over(under));
    }
}
