//! Overlapping model: states are N×N patterns read from a sample bitmap

use crate::{
    algorithm::{
        executor::Model,
        propagation::{overlapping_on_boundary, propagate_overlapping},
    },
    analysis::{
        adjacency::OverlapTable,
        patterns::{PatternCatalog, Sample},
    },
    io::{
        configuration::{
            DEFAULT_OVERLAPPING_HEIGHT, DEFAULT_OVERLAPPING_WIDTH, DEFAULT_PATTERN_SIZE,
            DEFAULT_PERIODIC_INPUT, DEFAULT_SYMMETRY, MAX_GRID_DIMENSION,
        },
        error::{Result, invalid_parameter},
        visualization::render_overlapping,
    },
    spatial::{Wave, symmetry::Pattern},
};
use image::RgbaImage;
use std::path::Path;

/// Parameters of an overlapping model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlappingConfig {
    /// Pattern edge length N
    pub pattern_size: usize,
    /// Output width in cells
    pub width: usize,
    /// Output height in cells
    pub height: usize,
    /// Whether sample windows wrap around the sample edges
    pub periodic_input: bool,
    /// Whether the output grid is toroidal
    pub periodic_output: bool,
    /// Number of orientations taken from each window (1–8)
    pub symmetry: usize,
    /// Pattern forced along the bottom row, counted modulo the pattern count;
    /// values resolving to pattern 0 mean no ground
    pub ground: Option<isize>,
}

impl Default for OverlappingConfig {
    fn default() -> Self {
        Self {
            pattern_size: DEFAULT_PATTERN_SIZE,
            width: DEFAULT_OVERLAPPING_WIDTH,
            height: DEFAULT_OVERLAPPING_HEIGHT,
            periodic_input: DEFAULT_PERIODIC_INPUT,
            periodic_output: false,
            symmetry: DEFAULT_SYMMETRY,
            ground: None,
        }
    }
}

/// Overlapping model over a fixed pattern catalog
#[derive(Clone, Debug)]
pub struct OverlappingModel {
    catalog: PatternCatalog,
    palette: Vec<[u8; 4]>,
    table: OverlapTable,
    wave: Wave,
    ground: Option<usize>,
    config: OverlappingConfig,
}

impl OverlappingModel {
    /// Build the pattern catalog and overlap table for `sample`
    ///
    /// # Errors
    ///
    /// Returns an error if the output dimensions are zero or too large, a
    /// non-periodic output is smaller than one pattern, or pattern extraction fails
    pub fn new(sample: &Sample, config: OverlappingConfig) -> Result<Self> {
        validate_dimension("width", config.width)?;
        validate_dimension("height", config.height)?;
        if !config.periodic_output
            && (config.pattern_size > config.width || config.pattern_size > config.height)
        {
            return Err(invalid_parameter(
                "N",
                &config.pattern_size,
                &"a non-periodic output must fit at least one pattern",
            ));
        }

        let catalog = PatternCatalog::extract(
            sample,
            config.pattern_size,
            config.symmetry,
            config.periodic_input,
        )?;
        let table = OverlapTable::build(&catalog);
        let state_count = catalog.len();
        // Pattern 0 cannot serve as ground; a value resolving to it disables the constraint
        let ground = config
            .ground
            .map(|g| g.rem_euclid(state_count as isize) as usize)
            .filter(|&g| g != 0);

        Ok(Self {
            wave: Wave::new(config.width, config.height, state_count),
            palette: sample.palette().to_vec(),
            catalog,
            table,
            ground,
            config,
        })
    }

    /// Load a sample from disk and build the model
    ///
    /// # Errors
    ///
    /// Returns an error if the sample cannot be decoded or [`Self::new`] fails
    pub fn from_png_path<P: AsRef<Path>>(path: P, config: OverlappingConfig) -> Result<Self> {
        let sample = Sample::from_png_path(path)?;
        Self::new(&sample, config)
    }

    /// Distinct patterns in state order
    pub fn patterns(&self) -> &[Pattern] {
        self.catalog.patterns()
    }

    /// Sample palette the pattern entries index into
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Number of states
    pub fn state_count(&self) -> usize {
        self.catalog.len()
    }

    /// Pattern catalog
    pub const fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Overlap compatibility table
    pub const fn table(&self) -> &OverlapTable {
        &self.table
    }

    /// Resolved ground pattern, if any (never pattern 0)
    pub const fn ground(&self) -> Option<usize> {
        self.ground
    }

    /// Construction parameters
    pub const fn config(&self) -> &OverlappingConfig {
        &self.config
    }

    fn apply_ground(&mut self, ground: usize) {
        let (width, height) = (self.wave.width(), self.wave.height());
        let bottom = height - 1;

        for x in 0..width {
            let cell = self.wave.cell_index(x, bottom);
            self.wave.collapse(cell, ground);

            for y in 0..bottom {
                let cell = self.wave.cell_index(x, y);
                if self.wave.forbid(cell, ground) {
                    self.wave.mark_dirty(cell);
                }
            }
        }
    }
}

impl Model for OverlappingModel {
    fn wave(&self) -> &Wave {
        &self.wave
    }

    fn wave_mut(&mut self) -> &mut Wave {
        &mut self.wave
    }

    fn weights(&self) -> &[f64] {
        self.catalog.weights()
    }

    fn on_boundary(&self, x: usize, y: usize) -> bool {
        overlapping_on_boundary(
            x,
            y,
            self.config.pattern_size,
            (self.wave.width(), self.wave.height()),
            self.config.periodic_output,
        )
    }

    fn propagate(&mut self) -> bool {
        propagate_overlapping(&mut self.wave, &self.table, self.config.periodic_output)
    }

    fn clear(&mut self) {
        self.wave.reset();
        if let Some(ground) = self.ground {
            self.apply_ground(ground);
            while self.propagate() {}
        }
    }

    fn render(&mut self) -> Result<RgbaImage> {
        Ok(render_overlapping(
            &self.wave,
            self.catalog.patterns(),
            &self.palette,
            self.config.pattern_size,
            self.config.periodic_output,
        ))
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must lie in 1..={MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
