//! Per-instance color assignment
//!
//! Each mask gets an independent random RGB color with a fixed fill alpha.
//! Colors are indexed by priority rank, consistent with the ownership map,
//! so the compositor can gather rank -> color directly. There is no
//! seeding contract: colors differ across calls, and tests assert only
//! channel ranges and counts.

use rand::{Rng, RngExt};
use segviz_core::Rgba;

/// Alpha applied to every instance fill color.
pub const FILL_ALPHA: f32 = 0.6;

/// Color used for stamped boundary outlines: pure blue, alpha 0.8.
pub const OUTLINE_COLOR: Rgba = Rgba::new(0.0, 0.0, 1.0, 0.8);

/// Rank-indexed table of instance colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    colors: Vec<Rgba>,
}

impl ColorTable {
    /// Draw `count` random colors from the thread-local RNG.
    pub fn random(count: usize) -> Self {
        Self::random_with(&mut rand::rng(), count)
    }

    /// Draw `count` random colors from a caller-supplied RNG.
    ///
    /// RGB channels are uniform in [0, 1); alpha is [`FILL_ALPHA`].
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        let colors = (0..count)
            .map(|_| Rgba::new(rng.random(), rng.random(), rng.random(), FILL_ALPHA))
            .collect();
        Self { colors }
    }

    /// Wrap an explicit palette (e.g. for reproducible output).
    pub fn from_colors(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for `rank`, if present.
    #[inline]
    pub fn get(&self, rank: usize) -> Option<Rgba> {
        self.colors.get(rank).copied()
    }

    /// All colors in rank order.
    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_count_and_ranges() {
        let table = ColorTable::random(64);
        assert_eq!(table.len(), 64);
        for color in table.colors() {
            assert!((0.0..=1.0).contains(&color.r));
            assert!((0.0..=1.0).contains(&color.g));
            assert!((0.0..=1.0).contains(&color.b));
            assert_eq!(color.a, FILL_ALPHA);
        }
    }

    #[test]
    fn test_outline_color_channels() {
        assert_eq!(OUTLINE_COLOR.r, 0.0);
        assert_eq!(OUTLINE_COLOR.g, 0.0);
        assert_eq!(OUTLINE_COLOR.b, 1.0);
        assert_eq!(OUTLINE_COLOR.a, 0.8);
    }

    #[test]
    fn test_from_colors_preserves_order() {
        let red = Rgba::new(1.0, 0.0, 0.0, FILL_ALPHA);
        let green = Rgba::new(0.0, 1.0, 0.0, FILL_ALPHA);
        let table = ColorTable::from_colors(vec![red, green]);
        assert_eq!(table.get(0), Some(red));
        assert_eq!(table.get(1), Some(green));
        assert_eq!(table.get(2), None);
    }
}
