//! Sample decoding and N×N pattern extraction

use crate::io::configuration::MAX_SYMMETRY;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::symmetry::{Pattern, orientations, pattern_from_fn};
use image::RgbaImage;
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// Sample bitmap reduced to palette indices
///
/// The palette lists distinct colors in first-seen row-major order, so the same
/// image always yields the same indices.
#[derive(Clone, Debug)]
pub struct Sample {
    pixels: Array2<usize>,
    palette: Vec<[u8; 4]>,
}

impl Sample {
    /// Index the colors of an RGBA image
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        if width == 0 || height == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "sample image is empty".to_string(),
            });
        }

        let mut palette: Vec<[u8; 4]> = Vec::new();
        let mut lookup: HashMap<[u8; 4], usize> = HashMap::new();
        let mut pixels = Array2::zeros((height, width));

        for (x, y, pixel) in image.enumerate_pixels() {
            let index = *lookup.entry(pixel.0).or_insert_with(|| {
                palette.push(pixel.0);
                palette.len() - 1
            });
            if let Some(cell) = pixels.get_mut((y as usize, x as usize)) {
                *cell = index;
            }
        }

        Ok(Self { pixels, palette })
    }

    /// Load and index a sample image from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be decoded or has no pixels
    pub fn from_png_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = crate::io::image::load_rgba(path)?;
        Self::from_image(&image)
    }

    /// Sample width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Sample height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Distinct colors in first-seen order
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Palette index at `(x, y)`, wrapping around the sample edges
    pub fn index_at(&self, x: usize, y: usize) -> usize {
        self.pixels
            .get((y % self.height(), x % self.width()))
            .copied()
            .unwrap_or(0)
    }
}

/// Deduplicated N×N patterns with occurrence counts
#[derive(Clone, Debug)]
pub struct PatternCatalog {
    n: usize,
    patterns: Vec<Pattern>,
    weights: Vec<f64>,
}

impl PatternCatalog {
    /// Extract every oriented N×N window of `sample`
    ///
    /// Windows wrap around the sample when `periodic_input` is set; otherwise only
    /// windows fully inside the sample are read. Each window contributes its first
    /// `symmetry` orientations. Identical patterns are merged and counted; the
    /// catalog keeps first-occurrence order.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero, `symmetry` lies outside `1..=8`, or the
    /// sample is too small to hold a single window
    pub fn extract(
        sample: &Sample,
        n: usize,
        symmetry: usize,
        periodic_input: bool,
    ) -> Result<Self> {
        if n == 0 {
            return Err(invalid_parameter("N", &n, &"pattern size must be positive"));
        }
        if !(1..=MAX_SYMMETRY).contains(&symmetry) {
            return Err(invalid_parameter(
                "symmetry",
                &symmetry,
                &"must lie between 1 and 8",
            ));
        }

        let (x_end, y_end) = if periodic_input {
            (sample.width(), sample.height())
        } else {
            (
                (sample.width() + 1).saturating_sub(n),
                (sample.height() + 1).saturating_sub(n),
            )
        };

        let mut counts: HashMap<Pattern, usize> = HashMap::new();
        let mut ordering: Vec<Pattern> = Vec::new();

        for y in 0..y_end {
            for x in 0..x_end {
                let window = pattern_from_fn(n, |dx, dy| sample.index_at(x + dx, y + dy));
                for oriented in orientations(&window, n).into_iter().take(symmetry) {
                    let count = counts.entry(oriented.clone()).or_insert(0);
                    if *count == 0 {
                        ordering.push(oriented);
                    }
                    *count += 1;
                }
            }
        }

        if ordering.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!(
                    "sample of {}x{} holds no {n}x{n} window",
                    sample.width(),
                    sample.height()
                ),
            });
        }

        let weights = ordering
            .iter()
            .map(|pattern| counts.get(pattern).copied().unwrap_or(0) as f64)
            .collect();

        Ok(Self {
            n,
            patterns: ordering,
            weights,
        })
    }

    /// Pattern edge length
    pub const fn pattern_size(&self) -> usize {
        self.n
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Test whether the catalog holds no pattern
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in first-occurrence order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Occurrence count of each pattern
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}
