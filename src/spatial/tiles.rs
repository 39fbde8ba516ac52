//! Tile set expansion and directional compatibility
//!
//! Every catalog tile expands into one state per oriented variant of its symmetry
//! class. Neighbor rules are stated once, horizontally, and are spread to the
//! rotated and mirrored configurations through each tile's action table.

use crate::io::catalog::{NeighborRule, Subset, TileCatalog, TileRef};
use crate::io::error::{AlgorithmError, Result};
use ndarray::Array3;
use std::collections::HashMap;
use std::path::PathBuf;

/// Compass direction between two adjacent cells, with `y` growing downwards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards increasing `x`
    East,
    /// Towards decreasing `y`
    North,
    /// Towards decreasing `x`
    West,
    /// Towards increasing `y`
    South,
}

impl Direction {
    /// All directions in matrix order
    pub const ALL: [Self; 4] = [Self::East, Self::North, Self::West, Self::South];

    /// Matrix index of the direction
    pub const fn index(self) -> usize {
        match self {
            Self::East => 0,
            Self::North => 1,
            Self::West => 2,
            Self::South => 3,
        }
    }

    /// Grid step `(dx, dy)` one cell in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::East => (1, 0),
            Self::North => (0, -1),
            Self::West => (-1, 0),
            Self::South => (0, 1),
        }
    }

    /// The reverse direction
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::North => Self::South,
            Self::West => Self::East,
            Self::South => Self::North,
        }
    }
}

/// One oriented tile, i.e. one state of the tiled model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileVariant {
    /// Catalog tile this variant derives from
    pub tile: String,
    /// Variant index within the tile's symmetry class
    pub orientation: usize,
    /// Texture file name relative to the tileset directory
    pub texture: PathBuf,
    /// Counter-clockwise quarter turns applied to the texture
    pub rotation: usize,
}

/// Expanded tile states with weights and directional compatibility
#[derive(Clone, Debug)]
pub struct TileSet {
    variants: Vec<TileVariant>,
    weights: Vec<f64>,
    action: Vec<[usize; 8]>,
    first_occurrence: HashMap<String, usize>,
    compatibility: Array3<bool>,
    tile_size: usize,
}

impl TileSet {
    /// Expand a catalog, optionally restricted to a named subset
    ///
    /// # Errors
    ///
    /// Returns an error if the subset is unknown, no tile survives the subset, or
    /// a neighbor rule references an undeclared tile
    pub fn build(catalog: &TileCatalog, subset: Option<&str>) -> Result<Self> {
        let subset = subset.map(|name| catalog.subset(name)).transpose()?;
        let included = |name: &str| subset.is_none_or(|s: &Subset| s.contains(name));

        let mut variants = Vec::new();
        let mut weights = Vec::new();
        let mut action = Vec::new();
        let mut first_occurrence = HashMap::new();

        for tile in catalog.tiles.iter().filter(|tile| included(&tile.name)) {
            let base = action.len();
            let cardinality = tile.symmetry.cardinality();
            first_occurrence.insert(tile.name.clone(), base);
            action.extend(tile.symmetry.action_rows(base));

            for t in 0..cardinality {
                let (texture, rotation) = if catalog.unique {
                    (PathBuf::from(format!("{} {t}.png", tile.name)), 0)
                } else {
                    (PathBuf::from(format!("{}.png", tile.name)), t)
                };
                variants.push(TileVariant {
                    tile: tile.name.clone(),
                    orientation: t,
                    texture,
                    rotation,
                });
                weights.push(tile.weight);
            }
        }

        if variants.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "no tiles remain after subset filtering".to_string(),
            });
        }

        let mut tile_set = Self {
            compatibility: Array3::from_elem((4, variants.len(), variants.len()), false),
            variants,
            weights,
            action,
            first_occurrence,
            tile_size: catalog.size,
        };

        for rule in &catalog.neighbors {
            if included(&rule.left.name) && included(&rule.right.name) {
                tile_set.add_rule(rule)?;
            }
        }
        tile_set.mirror_transposes();

        Ok(tile_set)
    }

    /// Number of states
    pub fn state_count(&self) -> usize {
        self.variants.len()
    }

    /// Oriented variants in state order
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Stationary weight of each state
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Action table row of `state`
    pub fn action(&self, state: usize) -> Option<&[usize; 8]> {
        self.action.get(state)
    }

    /// State index of a tile reference
    pub fn state_of(&self, tile: &TileRef) -> Option<usize> {
        let base = self.first_occurrence.get(&tile.name)?;
        self.action_column(*base, tile.variant)
    }

    /// Test whether `to` may sit one cell in `direction` from `from`
    pub fn is_compatible(&self, direction: Direction, from: usize, to: usize) -> bool {
        self.compatibility
            .get([direction.index(), from, to])
            .copied()
            .unwrap_or(false)
    }

    fn action_column(&self, state: usize, column: usize) -> Option<usize> {
        self.action.get(state).and_then(|row| row.get(column)).copied()
    }

    fn resolve(&self, tile: &TileRef) -> Result<usize> {
        self.state_of(tile).ok_or_else(|| AlgorithmError::UnknownTile {
            name: tile.name.clone(),
        })
    }

    fn allow(&mut self, direction: Direction, from: usize, to: usize) {
        if let Some(cell) = self.compatibility.get_mut([direction.index(), from, to]) {
            *cell = true;
        }
    }

    // A horizontal rule also holds rotated half a turn and mirrored; a quarter
    // turn of both tiles yields the matching vertical rule.
    fn add_rule(&mut self, rule: &NeighborRule) -> Result<()> {
        let left = self.resolve(&rule.left)?;
        let right = self.resolve(&rule.right)?;
        let down = self.turned(left, 1)?;
        let up = self.turned(right, 1)?;

        let horizontal = [
            (left, right),
            (self.turned(left, 6)?, self.turned(right, 6)?),
            (self.turned(right, 4)?, self.turned(left, 4)?),
            (self.turned(right, 2)?, self.turned(left, 2)?),
        ];
        let vertical = [
            (down, up),
            (self.turned(up, 6)?, self.turned(down, 6)?),
            (self.turned(down, 4)?, self.turned(up, 4)?),
            (self.turned(up, 2)?, self.turned(down, 2)?),
        ];

        for (from, to) in horizontal {
            self.allow(Direction::East, from, to);
        }
        for (from, to) in vertical {
            self.allow(Direction::North, from, to);
        }
        Ok(())
    }

    fn turned(&self, state: usize, column: usize) -> Result<usize> {
        self.action_column(state, column)
            .ok_or_else(|| AlgorithmError::InvalidSourceData {
                reason: format!("state {state} has no action column {column}"),
            })
    }

    fn mirror_transposes(&mut self) {
        let count = self.state_count();
        for from in 0..count {
            for to in 0..count {
                if self.is_compatible(Direction::East, to, from) {
                    self.allow(Direction::West, from, to);
                }
                if self.is_compatible(Direction::North, to, from) {
                    self.allow(Direction::South, from, to);
                }
            }
        }
    }
}
