//! Canvas compositing backends
//!
//! Compositing is a single gather pass: for every pixel, look up the
//! owning rank and write that rank's color; unowned pixels stay fully
//! transparent. There is deliberately no inner loop over masks.
//!
//! Two execution paths share the algorithm. The dense path runs the
//! gather sequentially and works anywhere; the parallel path splits the
//! canvas into rows and gathers them on the rayon pool. Their outputs are
//! bit-identical.

use rayon::prelude::*;

use crate::color::ColorTable;
use crate::error::{RenderError, RenderResult};
use crate::ownership::{NO_OWNER, OwnershipMap};
use segviz_core::{Canvas, Rgba};

/// Execution backend for the composite gather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Pick [`Backend::Parallel`] when more than one thread is available,
    /// [`Backend::Dense`] otherwise.
    #[default]
    Auto,
    /// Sequential gather.
    Dense,
    /// Row-parallel gather on the rayon pool. Falls back to the dense
    /// path transparently when only one thread is available.
    Parallel,
}

/// Produce the fill canvas from an ownership map and a color table.
///
/// # Errors
///
/// Returns [`RenderError::ColorCount`] if the table has fewer colors than
/// there are masks.
pub fn composite(
    map: &OwnershipMap,
    colors: &ColorTable,
    backend: Backend,
) -> RenderResult<Canvas> {
    if colors.len() < map.order().len() {
        return Err(RenderError::ColorCount {
            expected: map.order().len(),
            actual: colors.len(),
        });
    }
    let mut canvas = Canvas::new(map.width(), map.height())?;
    match effective_backend(backend) {
        Backend::Parallel => fill_parallel(&mut canvas, map, colors),
        _ => fill_dense(&mut canvas, map, colors),
    }
    Ok(canvas)
}

fn effective_backend(requested: Backend) -> Backend {
    match requested {
        Backend::Dense => Backend::Dense,
        Backend::Parallel if parallel_available() => Backend::Parallel,
        Backend::Parallel => {
            log::debug!("parallel backend unavailable, falling back to dense gather");
            Backend::Dense
        }
        Backend::Auto if parallel_available() => Backend::Parallel,
        Backend::Auto => Backend::Dense,
    }
}

fn parallel_available() -> bool {
    rayon::current_num_threads() > 1
}

/// Gather one row: rank -> color, skipping unowned pixels.
fn fill_row(row: &mut [f32], ranks: &[u32], colors: &[Rgba]) {
    for (px, &rank) in ranks.iter().enumerate() {
        if rank == NO_OWNER {
            continue;
        }
        let color = colors[rank as usize];
        let o = px * 4;
        row[o] = color.r;
        row[o + 1] = color.g;
        row[o + 2] = color.b;
        row[o + 3] = color.a;
    }
}

fn fill_dense(canvas: &mut Canvas, map: &OwnershipMap, colors: &ColorTable) {
    let width = map.width() as usize;
    for (row, ranks) in canvas
        .data_mut()
        .chunks_exact_mut(width * 4)
        .zip(map.ranks().chunks_exact(width))
    {
        fill_row(row, ranks, colors.colors());
    }
}

fn fill_parallel(canvas: &mut Canvas, map: &OwnershipMap, colors: &ColorTable) {
    let width = map.width() as usize;
    canvas
        .data_mut()
        .par_chunks_exact_mut(width * 4)
        .zip(map.ranks().par_chunks_exact(width))
        .for_each(|(row, ranks)| fill_row(row, ranks, colors.colors()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::FILL_ALPHA;
    use segviz_core::{Bitmap, MaskSet};

    fn two_mask_map() -> OwnershipMap {
        let a = Bitmap::from_fn(6, 4, |x, _| x < 4).unwrap();
        let b = Bitmap::from_fn(6, 4, |x, _| (3..5).contains(&x)).unwrap();
        let masks = MaskSet::new(vec![a, b]).unwrap();
        OwnershipMap::resolve(&masks)
    }

    fn palette(n: usize) -> ColorTable {
        let colors = (0..n)
            .map(|i| Rgba::new(i as f32 / n as f32, 0.5, 0.25, FILL_ALPHA))
            .collect();
        ColorTable::from_colors(colors)
    }

    #[test]
    fn test_owner_color_and_transparency() {
        let map = two_mask_map();
        let colors = palette(2);
        let canvas = composite(&map, &colors, Backend::Dense).unwrap();
        // x=3 is contested; mask b (smaller) wins rank 0
        assert_eq!(canvas.get(3, 0), colors.get(0).unwrap());
        assert_eq!(canvas.get(0, 0), colors.get(1).unwrap());
        // x=5 is uncovered
        assert_eq!(canvas.get(5, 0).a, 0.0);
    }

    #[test]
    fn test_backends_agree() {
        let map = two_mask_map();
        let colors = palette(2);
        let dense = composite(&map, &colors, Backend::Dense).unwrap();
        let parallel = composite(&map, &colors, Backend::Parallel).unwrap();
        let auto = composite(&map, &colors, Backend::Auto).unwrap();
        assert_eq!(dense, parallel);
        assert_eq!(dense, auto);
    }

    #[test]
    fn test_short_color_table_rejected() {
        let map = two_mask_map();
        let colors = palette(1);
        let result = composite(&map, &colors, Backend::Dense);
        assert!(matches!(
            result,
            Err(RenderError::ColorCount {
                expected: 2,
                actual: 1
            })
        ));
    }
}
