//! Rendering of waves into RGBA images
//!
//! Both renderers accept partially collapsed waves: an undecided cell blends every
//! state it still admits.

use crate::algorithm::cache::{TextureCache, TextureKey};
use crate::algorithm::propagation::{overlapping_on_boundary, wrap};
use crate::io::error::Result;
use crate::spatial::Wave;
use crate::spatial::symmetry::Pattern;
use crate::spatial::tiles::TileSet;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Render an overlapping wave at one pixel per cell
///
/// Each pixel averages, unweighted, the color every admissible pattern of every
/// covering cell places on it. Pixels nothing covers stay transparent.
pub fn render_overlapping(
    wave: &Wave,
    patterns: &[Pattern],
    palette: &[[u8; 4]],
    n: usize,
    periodic: bool,
) -> RgbaImage {
    let dimensions = (wave.width(), wave.height());
    let mut img = RgbaImage::new(dimensions.0 as u32, dimensions.1 as u32);

    for y in 0..dimensions.1 {
        for x in 0..dimensions.0 {
            let mut sums = [0u32; 4];
            let mut contributors = 0u32;

            for dy in 0..n {
                for dx in 0..n {
                    let sx = wrap(x, -(dx as isize), dimensions.0);
                    let sy = wrap(y, -(dy as isize), dimensions.1);
                    if overlapping_on_boundary(sx, sy, n, dimensions, periodic) {
                        continue;
                    }

                    let cell = wave.cell_index(sx, sy);
                    for state in wave.admissible_states(cell) {
                        let color = patterns
                            .get(state)
                            .and_then(|pattern| pattern.get(dx + dy * n))
                            .and_then(|&index| palette.get(index));
                        if let Some(color) = color {
                            for (sum, &channel) in sums.iter_mut().zip(color) {
                                *sum += u32::from(channel);
                            }
                            contributors += 1;
                        }
                    }
                }
            }

            let pixel = if contributors == 0 {
                [0, 0, 0, 0]
            } else {
                sums.map(|sum| (sum / contributors) as u8)
            };
            img.put_pixel(x as u32, y as u32, Rgba(pixel));
        }
    }

    img
}

/// Render a tiled wave, one texture block per cell
///
/// Admissible tiles are blended by normalised stationary weight. With `black`
/// set, cells that still admit every tile are left transparent.
///
/// # Errors
///
/// Returns an error if a variant's texture is missing from the cache
pub fn render_tiled(
    wave: &Wave,
    tiles: &TileSet,
    textures: &mut TextureCache,
    tileset_dir: &Path,
    black: bool,
) -> Result<RgbaImage> {
    let size = tiles.tile_size();
    let mut img = RgbaImage::new((wave.width() * size) as u32, (wave.height() * size) as u32);
    let mut block = vec![0.0f64; size * size * 4];

    for cell in 0..wave.cell_count() {
        let (x, y) = wave.coordinates(cell);
        block.fill(0.0);

        let amount = wave.admissible_count(cell);
        if !black || amount != wave.state_count() {
            let total: f64 = wave
                .admissible_states(cell)
                .map(|state| tiles.weights().get(state).copied().unwrap_or(0.0))
                .sum();

            for state in wave.admissible_states(cell) {
                let (Some(variant), Some(&weight)) =
                    (tiles.variants().get(state), tiles.weights().get(state))
                else {
                    continue;
                };
                let key = TextureKey::new(tileset_dir.join(&variant.texture), variant.rotation);
                let texture = textures.oriented(key)?;
                let share = weight / total;

                for (accumulated, &channel) in block.iter_mut().zip(texture.as_raw()) {
                    *accumulated += f64::from(channel) * share;
                }
            }
        }

        for (i, pixel) in block.chunks_exact(4).enumerate() {
            let px = (x * size + i % size) as u32;
            let py = (y * size + i / size) as u32;
            let rgba: [u8; 4] =
                std::array::from_fn(|c| pixel.get(c).copied().unwrap_or(0.0) as u8);
            img.put_pixel(px, py, Rgba(rgba));
        }
    }

    Ok(img)
}
