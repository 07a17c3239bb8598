use bevy::tasks::TaskPool;

use crate::{board::Grid, prelude::*};

/// The aging life rule for a single cell.
#[inline]
pub fn next_age(age: u8, live_neighbours: u8) -> u8 {
    if age > 0 {
        if SURVIVAL.contains(&live_neighbours) {
            age.saturating_add(1).min(MAX_AGE)
        } else {
            0
        }
    } else if BIRTH.contains(&live_neighbours) {
        1
    } else {
        0
    }
}

/// Computes the generation after `front` into `back`, one cell at a time.
///
/// Every cell of `back` is overwritten. Both grids must have the same dimensions.
pub fn step_into(front: &Grid, back: &mut Grid) {
    debug_assert_eq!(front.size(), back.size());
    let width = front.width();
    for (idx, out) in back.cells_mut().iter_mut().enumerate() {
        let (row, col) = (idx / width, idx % width);
        *out = next_age(front.age(row, col), front.live_neighbours(row, col));
    }
}

/// Same result as [`step_into`], with `back` split into row bands that are computed
/// concurrently on `pool`.
pub fn step_into_par(front: &Grid, back: &mut Grid, pool: &TaskPool) {
    debug_assert_eq!(front.size(), back.size());
    let (width, height) = front.size();
    if width == 0 || height == 0 {
        return;
    }
    let rows_per_band = height.div_ceil(pool.thread_num().max(1));
    let bands = back.cells_mut().chunks_mut(rows_per_band * width);

    pool.scope(|scope| {
        for (band, cells) in bands.enumerate() {
            scope.spawn(async move {
                let first_row = band * rows_per_band;
                for (i, out) in cells.iter_mut().enumerate() {
                    let (row, col) = (first_row + i / width, i % width);
                    *out = next_age(front.age(row, col), front.live_neighbours(row, col));
                }
            });
        }
    });
}
