//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - The wave grid of admissible states
//! - Pattern and tile symmetry transforms
//! - Tile set expansion and directional adjacency

/// Wave grid state
pub mod grid;
/// Dihedral transforms and tile symmetry classes
pub mod symmetry;
/// Tile set expansion and directional compatibility
pub mod tiles;

pub use grid::Wave;
