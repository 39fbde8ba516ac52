use crate::{
    algorithm::selection::{Selection, StationaryWeights, draw_state, select_cell},
    io::error::{AlgorithmError, Result},
    spatial::Wave,
};
use image::RgbaImage;
use rand::{SeedableRng, rngs::StdRng};

/// Model-specific half of the collapse: constraints, boundary rule and rendering
///
/// The driver only talks to models through this trait, so the overlapping and
/// tiled models plug into the same observe/propagate loop.
pub trait Model {
    /// Current wave
    fn wave(&self) -> &Wave;

    /// Mutable access to the wave
    fn wave_mut(&mut self) -> &mut Wave;

    /// Stationary weight of each state, fixed after construction
    fn weights(&self) -> &[f64];

    /// Whether the cell at `(x, y)` is excluded from observation
    fn on_boundary(&self, x: usize, y: usize) -> bool;

    /// One propagation sweep over the dirty cells; returns whether anything changed
    fn propagate(&mut self) -> bool;

    /// Reset the wave to fully admissible and re-apply model constraints
    fn clear(&mut self);

    /// Render the wave as an RGBA image
    ///
    /// # Errors
    ///
    /// Returns an error if a texture needed for rendering is unavailable
    fn render(&mut self) -> Result<RgbaImage>;
}

/// Outcome of the most recent attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// No attempt has finished yet
    Idle,
    /// The last attempt saturated or used up its round limit
    Succeeded,
    /// The last attempt hit an empty cell
    Contradicted,
}

/// One step of the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// `cell` was collapsed to `state` and marked dirty
    Collapsed {
        /// Collapsed cell
        cell: usize,
        /// State drawn for the cell
        state: usize,
    },
    /// Nothing is left to decide
    Saturated,
    /// `cell` has no admissible state
    Contradiction {
        /// The empty cell
        cell: usize,
    },
}

/// Generic observe/propagate loop over any [`Model`]
///
/// Each call to [`run`](Self::run) is an independent attempt: the random generator
/// is seeded afresh and the wave is cleared. Retrying with new seeds after a
/// contradiction is left to the caller.
pub struct CollapseDriver<M: Model> {
    model: M,
    weights: StationaryWeights,
    status: RunStatus,
    distribution: Vec<f64>,
}

impl<M: Model> CollapseDriver<M> {
    /// Wrap a model
    pub fn new(model: M) -> Self {
        let weights = StationaryWeights::new(model.weights());
        Self {
            distribution: Vec::with_capacity(weights.len()),
            model,
            weights,
            status: RunStatus::Idle,
        }
    }

    /// Run one attempt of at most `limit` rounds (0 = unbounded)
    ///
    /// Returns `false` on contradiction. Saturation counts as success, and so does
    /// an exhausted round limit as long as no observable cell has been emptied.
    pub fn run(&mut self, seed: u64, limit: usize) -> bool {
        let mut rng = StdRng::seed_from_u64(seed);
        self.model.clear();
        self.status = RunStatus::Idle;

        let mut round = 0;
        while limit == 0 || round < limit {
            match self.observe(&mut rng) {
                Observation::Saturated => return self.finish(true),
                Observation::Contradiction { .. } => return self.finish(false),
                Observation::Collapsed { .. } => {
                    self.propagate_to_fixpoint();
                }
            }
            round += 1;
        }

        let consistent = !self.has_empty_cell();
        self.finish(consistent)
    }

    // The last round's propagation may have emptied a cell without a following observe
    fn has_empty_cell(&self) -> bool {
        let wave = self.model.wave();
        (0..wave.cell_count()).any(|cell| {
            let (x, y) = wave.coordinates(cell);
            !self.model.on_boundary(x, y) && wave.is_contradicted(cell)
        })
    }

    /// Collapse the minimum-entropy cell, or report saturation or contradiction
    pub fn observe(&mut self, rng: &mut StdRng) -> Observation {
        match select_cell(&self.model, &self.weights, rng) {
            Selection::Saturated => Observation::Saturated,
            Selection::Contradiction(cell) => Observation::Contradiction { cell },
            Selection::Cell(cell) => {
                let state = draw_state(
                    self.model.wave(),
                    cell,
                    &self.weights,
                    rng,
                    &mut self.distribution,
                );
                self.model.wave_mut().collapse(cell, state);
                Observation::Collapsed { cell, state }
            }
        }
    }

    /// Sweep until the model reports no change; returns the number of changing sweeps
    pub fn propagate_to_fixpoint(&mut self) -> usize {
        let mut sweeps = 0;

        #[cfg(debug_assertions)]
        let mut before = self.model.wave().admissible_counts();

        while self.model.propagate() {
            sweeps += 1;

            #[cfg(debug_assertions)]
            {
                let after = self.model.wave().admissible_counts();
                debug_assert!(
                    before.iter().zip(&after).all(|(b, a)| a <= b),
                    "propagation re-admitted a state"
                );
                before = after;
            }
        }

        debug_assert!(!self.model.wave().any_dirty(), "fixpoint left dirty cells");
        sweeps
    }

    /// Render the result of the last attempt
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::NotCollapsed`] unless the last attempt succeeded,
    /// or the model's rendering error
    pub fn graphics(&mut self) -> Result<RgbaImage> {
        if self.status != RunStatus::Succeeded {
            return Err(AlgorithmError::NotCollapsed);
        }
        self.model.render()
    }

    /// Outcome of the last attempt
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// The wrapped model
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Unwrap the model
    pub fn into_model(self) -> M {
        self.model
    }

    const fn finish(&mut self, success: bool) -> bool {
        self.status = if success {
            RunStatus::Succeeded
        } else {
            RunStatus::Contradicted
        };
        success
    }
}
