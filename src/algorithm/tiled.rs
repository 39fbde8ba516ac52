//! Simple tiled model: states are oriented tiles from a catalog

use crate::{
    algorithm::{cache::TextureCache, executor::Model, propagation::propagate_tiled},
    io::{
        catalog::TileCatalog,
        configuration::{
            DEFAULT_TILED_HEIGHT, DEFAULT_TILED_WIDTH, MAX_GRID_DIMENSION, TILESET_CATALOG_FILE,
        },
        error::{AlgorithmError, Result, invalid_parameter},
        visualization::render_tiled,
    },
    spatial::{
        Wave,
        tiles::{Direction, TileSet, TileVariant},
    },
};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Parameters of a tiled model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TiledConfig {
    /// Output width in tiles
    pub width: usize,
    /// Output height in tiles
    pub height: usize,
    /// Whether the output grid is toroidal
    pub periodic: bool,
    /// Leave fully ambiguous cells transparent when rendering
    pub black: bool,
    /// Restrict the catalog to a named subset
    pub subset: Option<String>,
}

impl Default for TiledConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_TILED_WIDTH,
            height: DEFAULT_TILED_HEIGHT,
            periodic: false,
            black: false,
            subset: None,
        }
    }
}

/// Tiled model over an expanded tile set and its textures
pub struct TiledModel {
    tiles: TileSet,
    textures: TextureCache,
    tileset_dir: PathBuf,
    wave: Wave,
    config: TiledConfig,
}

impl TiledModel {
    /// Expand `catalog` and load every variant's texture
    ///
    /// Textures are looked up in `tileset_dir`; images already in `textures` are
    /// reused without touching the disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid, the tile set cannot be
    /// built, or a texture is missing or not square at the catalog tile size
    pub fn new(
        catalog: &TileCatalog,
        config: TiledConfig,
        tileset_dir: impl Into<PathBuf>,
        mut textures: TextureCache,
    ) -> Result<Self> {
        for (parameter, value) in [("width", config.width), ("height", config.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must lie in 1..={MAX_GRID_DIMENSION}"),
                ));
            }
        }

        let tiles = TileSet::build(catalog, config.subset.as_deref())?;
        let tileset_dir = tileset_dir.into();
        let size = tiles.tile_size() as u32;

        for variant in tiles.variants() {
            let path = tileset_dir.join(&variant.texture);
            let texture = textures.load(&path)?;
            if texture.dimensions() != (size, size) {
                return Err(AlgorithmError::InvalidSourceData {
                    reason: format!(
                        "texture '{}' is {}x{}, expected {size}x{size}",
                        path.display(),
                        texture.width(),
                        texture.height()
                    ),
                });
            }
        }

        Ok(Self {
            wave: Wave::new(config.width, config.height, tiles.state_count()),
            tiles,
            textures,
            tileset_dir,
            config,
        })
    }

    /// Read `data.xml` from a tileset directory and build the model
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or [`Self::new`] fails
    pub fn from_directory<P: AsRef<Path>>(tileset_dir: P, config: TiledConfig) -> Result<Self> {
        let tileset_dir = tileset_dir.as_ref();
        let catalog = TileCatalog::from_path(tileset_dir.join(TILESET_CATALOG_FILE))?;
        Self::new(&catalog, config, tileset_dir, TextureCache::new())
    }

    /// Oriented variants in state order
    pub fn variants(&self) -> &[TileVariant] {
        self.tiles.variants()
    }

    /// Number of states
    pub fn state_count(&self) -> usize {
        self.tiles.state_count()
    }

    /// Test whether `to` may sit one cell in `direction` from `from`
    pub fn is_compatible(&self, direction: Direction, from: usize, to: usize) -> bool {
        self.tiles.is_compatible(direction, from, to)
    }

    /// Expanded tile set
    pub const fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Texture cache, including rotation statistics
    pub const fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Construction parameters
    pub const fn config(&self) -> &TiledConfig {
        &self.config
    }
}

impl Model for TiledModel {
    fn wave(&self) -> &Wave {
        &self.wave
    }

    fn wave_mut(&mut self) -> &mut Wave {
        &mut self.wave
    }

    fn weights(&self) -> &[f64] {
        self.tiles.weights()
    }

    fn on_boundary(&self, _x: usize, _y: usize) -> bool {
        false
    }

    fn propagate(&mut self) -> bool {
        propagate_tiled(&mut self.wave, &self.tiles, self.config.periodic)
    }

    fn clear(&mut self) {
        self.wave.reset();
    }

    fn render(&mut self) -> Result<RgbaImage> {
        render_tiled(
            &self.wave,
            &self.tiles,
            &mut self.textures,
            &self.tileset_dir,
            self.config.black,
        )
    }
}
