//! Wave grid: per-cell admissible state sets and dirty flags
//!
//! Both sets live in flat bit arrays. Admissibility of state `t` at cell `c` is
//! bit `c * state_count + t`; cells are numbered row-major, `y * width + x`.

use bitvec::prelude::*;

/// Mutable solving state for one collapse attempt
///
/// Every cell starts with all states admissible and no dirty flag. States are only
/// ever removed until the next [`Wave::reset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wave {
    admissible: BitVec,
    dirty: BitVec,
    width: usize,
    height: usize,
    state_count: usize,
}

impl Wave {
    /// Create a fully admissible wave
    pub fn new(width: usize, height: usize, state_count: usize) -> Self {
        let cells = width * height;
        Self {
            admissible: bitvec![1; cells * state_count],
            dirty: bitvec![0; cells],
            width,
            height,
            state_count,
        }
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of states per cell
    pub const fn state_count(&self) -> usize {
        self.state_count
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Flat index of the cell at `(x, y)`
    pub const fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Coordinates `(x, y)` of a flat cell index
    pub const fn coordinates(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    /// Make every state admissible and clear all dirty flags
    pub fn reset(&mut self) {
        self.admissible.fill(true);
        self.dirty.fill(false);
    }

    /// Admissibility flags of one cell
    pub fn states(&self, cell: usize) -> &BitSlice {
        let start = cell * self.state_count;
        self.admissible
            .get(start..start + self.state_count)
            .unwrap_or_else(BitSlice::empty)
    }

    /// Test whether `state` is still admissible at `cell`
    pub fn is_admissible(&self, cell: usize, state: usize) -> bool {
        state < self.state_count
            && self.admissible.get(cell * self.state_count + state).as_deref() == Some(&true)
    }

    /// Remove `state` from `cell`, returning whether it was admissible
    ///
    /// Does not touch the dirty flag; propagation strategies decide when to mark.
    pub fn forbid(&mut self, cell: usize, state: usize) -> bool {
        if !self.is_admissible(cell, state) {
            return false;
        }
        if let Some(mut bit) = self.admissible.get_mut(cell * self.state_count + state) {
            *bit = false;
        }
        true
    }

    /// Reduce `cell` to the singleton `{state}` and mark it dirty
    pub fn collapse(&mut self, cell: usize, state: usize) {
        let start = cell * self.state_count;
        if let Some(slice) = self.admissible.get_mut(start..start + self.state_count) {
            slice.fill(false);
            if let Some(mut bit) = slice.get_mut(state) {
                *bit = true;
            }
        }
        self.mark_dirty(cell);
    }

    /// Number of admissible states at `cell`
    pub fn admissible_count(&self, cell: usize) -> usize {
        self.states(cell).count_ones()
    }

    /// Admissible state indices at `cell` in ascending order
    pub fn admissible_states(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.states(cell).iter_ones()
    }

    /// The single remaining state, if `cell` is decided
    pub fn collapsed_state(&self, cell: usize) -> Option<usize> {
        let states = self.states(cell);
        (states.count_ones() == 1)
            .then(|| states.first_one())
            .flatten()
    }

    /// Test whether `cell` has no admissible state left
    pub fn is_contradicted(&self, cell: usize) -> bool {
        self.states(cell).not_any()
    }

    /// Admissible count of every cell, in cell order
    pub fn admissible_counts(&self) -> Vec<usize> {
        (0..self.cell_count())
            .map(|cell| self.admissible_count(cell))
            .collect()
    }

    /// Test whether `cell` awaits propagation
    pub fn is_dirty(&self, cell: usize) -> bool {
        self.dirty.get(cell).as_deref() == Some(&true)
    }

    /// Flag `cell` for propagation
    pub fn mark_dirty(&mut self, cell: usize) {
        if let Some(mut bit) = self.dirty.get_mut(cell) {
            *bit = true;
        }
    }

    /// Clear the dirty flag of `cell`, returning its previous value
    pub fn take_dirty(&mut self, cell: usize) -> bool {
        self.dirty
            .get_mut(cell)
            .is_some_and(|mut bit| std::mem::replace(&mut *bit, false))
    }

    /// Snapshot and clear every dirty flag
    pub fn take_dirty_set(&mut self) -> BitVec {
        let snapshot = self.dirty.clone();
        self.dirty.fill(false);
        snapshot
    }

    /// Test whether any cell awaits propagation
    pub fn any_dirty(&self) -> bool {
        self.dirty.any()
    }
}
