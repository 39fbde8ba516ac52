use crate::{
    analysis::adjacency::OverlapTable,
    spatial::{
        Wave,
        tiles::{Direction, TileSet},
    },
};

/// Coordinate `coord + delta` wrapped onto `0..extent`
pub const fn wrap(coord: usize, delta: isize, extent: usize) -> usize {
    (coord as isize + delta).rem_euclid(extent as isize) as usize
}

/// Neighbor of `(x, y)` one step along `(dx, dy)`
///
/// Wraps around the grid when `periodic`; otherwise steps off the edge yield `None`.
pub fn step(
    x: usize,
    y: usize,
    (dx, dy): (isize, isize),
    (width, height): (usize, usize),
    periodic: bool,
) -> Option<(usize, usize)> {
    if periodic {
        return Some((wrap(x, dx, width), wrap(y, dy, height)));
    }
    let nx = x.checked_add_signed(dx).filter(|&nx| nx < width)?;
    let ny = y.checked_add_signed(dy).filter(|&ny| ny < height)?;
    Some((nx, ny))
}

/// Whether an N×N pattern anchored at `(x, y)` would overhang a non-periodic grid
pub const fn overlapping_on_boundary(
    x: usize,
    y: usize,
    n: usize,
    (width, height): (usize, usize),
    periodic: bool,
) -> bool {
    !periodic && (x + n > width || y + n > height)
}

/// One overlapping propagation sweep
///
/// Every dirty cell is cleared and re-checked against all cells within pattern
/// reach. A neighbor state survives only if some state of the dirty cell agrees
/// with it at their relative offset. Returns whether any state was removed.
pub fn propagate_overlapping(wave: &mut Wave, table: &OverlapTable, periodic: bool) -> bool {
    let dimensions = (wave.width(), wave.height());
    let n = table.pattern_size();
    let reach = n as isize - 1;
    let mut changed = false;

    for cell in 0..wave.cell_count() {
        if !wave.take_dirty(cell) {
            continue;
        }
        let (x1, y1) = wave.coordinates(cell);

        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let sx = wrap(x1, dx, dimensions.0);
                let sy = wrap(y1, dy, dimensions.1);
                if overlapping_on_boundary(sx, sy, n, dimensions, periodic) {
                    continue;
                }
                let neighbor = wave.cell_index(sx, sy);

                for t2 in 0..wave.state_count() {
                    if !wave.is_admissible(neighbor, t2) {
                        continue;
                    }
                    let supported = table
                        .compatible(t2, -dx, -dy)
                        .iter()
                        .any(|&t1| wave.is_admissible(cell, t1));
                    if !supported {
                        wave.forbid(neighbor, t2);
                        wave.mark_dirty(neighbor);
                        changed = true;
                    }
                }
            }
        }
    }

    changed
}

/// One tiled propagation sweep
///
/// The dirty set is snapshotted and cleared up front. Each cell then drops every
/// state that no admissible state of a snapshotted neighbor allows beside it.
/// Returns whether any state was removed.
pub fn propagate_tiled(wave: &mut Wave, tiles: &TileSet, periodic: bool) -> bool {
    let dirty = wave.take_dirty_set();
    if dirty.not_any() {
        return false;
    }

    let dimensions = (wave.width(), wave.height());
    let mut changed = false;
    let mut states = Vec::with_capacity(wave.state_count());

    for cell in 0..wave.cell_count() {
        let (x, y) = wave.coordinates(cell);

        for direction in Direction::ALL {
            // The cell sits `direction` of this neighbor
            let Some((nx, ny)) = step(x, y, direction.opposite().offset(), dimensions, periodic)
            else {
                continue;
            };
            let neighbor = wave.cell_index(nx, ny);
            if dirty.get(neighbor).as_deref() != Some(&true) {
                continue;
            }

            states.clear();
            states.extend(wave.admissible_states(cell));
            for &t2 in &states {
                let supported = wave
                    .admissible_states(neighbor)
                    .any(|t1| tiles.is_compatible(direction, t1, t2));
                if !supported {
                    wave.forbid(cell, t2);
                    wave.mark_dirty(cell);
                    changed = true;
                }
            }
        }
    }

    changed
}
