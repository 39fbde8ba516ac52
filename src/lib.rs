//! Wave function collapse image synthesis
//!
//! Two model families share one collapse driver: the overlapping model learns N×N
//! patterns from a sample bitmap, and the simple tiled model assembles oriented
//! tiles from a catalog of adjacency rules. Both repeatedly collapse the cell of
//! lowest entropy and propagate the consequences until the grid is decided or a
//! contradiction appears.

#![forbid(unsafe_code)]

/// Collapse driver, models, propagation and selection
pub mod algorithm;
/// Pattern extraction and overlap compatibility
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy and weighted sampling
pub mod math;
/// Wave storage, symmetry groups and tile sets
pub mod spatial;

pub use algorithm::executor::{CollapseDriver, Model, RunStatus};
pub use algorithm::overlapping::{OverlappingConfig, OverlappingModel};
pub use algorithm::tiled::{TiledConfig, TiledModel};
pub use io::error::{AlgorithmError, Result};
