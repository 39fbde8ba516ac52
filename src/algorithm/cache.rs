use crate::io::error::{AlgorithmError, Result};
use image::{RgbaImage, imageops};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key for a texture in one orientation
///
/// Uniquely identifies a source image and the number of counter-clockwise quarter
/// turns applied to it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TextureKey {
    path: PathBuf,
    rotation: usize,
}

impl TextureKey {
    /// Create a key for `path` turned `rotation` quarter turns counter-clockwise
    pub fn new(path: impl Into<PathBuf>, rotation: usize) -> Self {
        Self {
            path: path.into(),
            rotation: rotation % 4,
        }
    }

    /// Source image path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Quarter turns, in `0..4`
    pub const fn rotation(&self) -> usize {
        self.rotation
    }
}

/// Texture store owned by one tiled model
///
/// Source images are loaded up front so missing files surface at construction;
/// rotated variants are derived on first use and memoised.
#[derive(Default)]
pub struct TextureCache {
    sources: HashMap<PathBuf, RgbaImage>,
    oriented: HashMap<TextureKey, RgbaImage>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already decoded source image
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: RgbaImage) {
        self.sources.insert(path.into(), image);
    }

    /// Test whether a source image is present
    pub fn contains(&self, path: &Path) -> bool {
        self.sources.contains_key(path)
    }

    /// Source image at `path`, decoding it from disk if not yet present
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded
    pub fn load(&mut self, path: &Path) -> Result<&RgbaImage> {
        use std::collections::hash_map::Entry;

        match self.sources.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let image = crate::io::image::load_rgba(path)?;
                Ok(entry.insert(image))
            }
        }
    }

    /// Retrieve an oriented texture, deriving it from its source on first use
    ///
    /// # Errors
    ///
    /// Returns an error if the source image was never loaded
    pub fn oriented(&mut self, key: TextureKey) -> Result<&RgbaImage> {
        use std::collections::hash_map::Entry;

        match self.oriented.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let source = self.sources.get(entry.key().path()).ok_or_else(|| {
                    AlgorithmError::InvalidSourceData {
                        reason: format!(
                            "texture '{}' was not loaded",
                            entry.key().path().display()
                        ),
                    }
                })?;
                self.stats.misses += 1;
                let turned = rotate_counter_clockwise(source, entry.key().rotation());
                Ok(entry.insert(turned))
            }
        }
    }
}

/// Turn an image `quarter_turns` times counter-clockwise
pub fn rotate_counter_clockwise(image: &RgbaImage, quarter_turns: usize) -> RgbaImage {
    match quarter_turns % 4 {
        1 => imageops::rotate270(image),
        2 => imageops::rotate180(image),
        3 => imageops::rotate90(image),
        _ => image.clone(),
    }
}
