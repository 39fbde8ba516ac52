use crate::{
    algorithm::executor::Model,
    math::probability::{cell_entropy, weighted_index},
    spatial::Wave,
};
use bitvec::slice::BitSlice;
use rand::{Rng, rngs::StdRng};

/// Upper bound for the minimum-entropy search; real entropies stay far below
const ENTROPY_CEILING: f64 = 1e3;

/// Scale of the random jitter added to each entropy to break ties
pub const ENTROPY_NOISE: f64 = 1e-6;

/// Stationary weights with cached `w·ln(w)` terms
#[derive(Clone, Debug)]
pub struct StationaryWeights {
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
}

impl StationaryWeights {
    /// Precompute the entropy terms for a weight vector
    pub fn new(weights: &[f64]) -> Self {
        Self {
            weights: weights.to_vec(),
            weight_log_weights: weights.iter().map(|&w| w * w.ln()).collect(),
        }
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Test whether there are no states
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Raw weights in state order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Shannon entropy of one cell's admissible set
    ///
    /// Returns `None` when nothing is admissible.
    pub fn entropy(&self, states: &BitSlice) -> Option<f64> {
        let mut amount = 0;
        let mut weight_sum = 0.0;
        let mut weight_log_weight_sum = 0.0;
        for state in states.iter_ones() {
            amount += 1;
            weight_sum += self.weights.get(state).copied().unwrap_or(0.0);
            weight_log_weight_sum += self.weight_log_weights.get(state).copied().unwrap_or(0.0);
        }

        (amount > 0).then(|| {
            cell_entropy(amount, self.len(), weight_sum, weight_log_weight_sum)
        })
    }
}

/// Result of scanning the wave for the next cell to collapse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The undecided cell with the lowest jittered entropy
    Cell(usize),
    /// Every non-boundary cell is decided
    Saturated,
    /// This cell has no admissible state
    Contradiction(usize),
}

/// Find the undecided cell of minimum entropy
///
/// Scans non-boundary cells in index order, drawing one jitter value per scanned
/// cell, and stops at the first empty cell.
pub fn select_cell<M: Model + ?Sized>(
    model: &M,
    weights: &StationaryWeights,
    rng: &mut StdRng,
) -> Selection {
    let wave = model.wave();
    let mut minimum = ENTROPY_CEILING;
    let mut chosen = None;

    for cell in 0..wave.cell_count() {
        let (x, y) = wave.coordinates(cell);
        if model.on_boundary(x, y) {
            continue;
        }

        let Some(entropy) = weights.entropy(wave.states(cell)) else {
            return Selection::Contradiction(cell);
        };

        let noise = ENTROPY_NOISE * rng.random::<f64>();
        if entropy > 0.0 && entropy + noise < minimum {
            minimum = entropy + noise;
            chosen = Some(cell);
        }
    }

    chosen.map_or(Selection::Saturated, Selection::Cell)
}

/// Draw one admissible state of `cell` in proportion to its stationary weight
///
/// `distribution` is scratch space reused across draws.
pub fn draw_state(
    wave: &Wave,
    cell: usize,
    weights: &StationaryWeights,
    rng: &mut StdRng,
    distribution: &mut Vec<f64>,
) -> usize {
    distribution.clear();
    distribution.extend(
        weights
            .weights()
            .iter()
            .enumerate()
            .map(|(state, &w)| if wave.is_admissible(cell, state) { w } else { 0.0 }),
    );
    weighted_index(distribution, rng.random::<f64>())
}
