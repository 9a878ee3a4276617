//! Edge-preserving smoothing ("simplicity").
//!
//! Posterization wants large flat tone regions, but a plain blur would soften
//! the silhouette edges the clustering step needs. The bilateral filter here
//! weights each neighbor by spatial distance *and* tonal distance, so texture
//! inside a region merges while strong edges survive.

use crate::raster::Raster;

/// Filter window diameter. Neighbors up to `DIAMETER / 2` pixels away in
/// each direction contribute.
const DIAMETER: usize = 9;
const RADIUS: usize = DIAMETER / 2;

/// Apply edge-preserving bilateral smoothing with the given strength.
///
/// A strength of 0 is a no-op and returns the input unchanged. For positive
/// strengths both the range sigma (tonal distance) and the space sigma
/// (pixel distance) are `strength * 10`, so higher values merge wider tonal
/// neighborhoods while edges with large tonal steps stay put.
///
/// The neighbor weight is
/// `exp(-dist² / (2·σ_space²)) · exp(-Δtone² / (2·σ_range²))`,
/// where `Δtone²` sums squared per-channel differences. Windows are clipped
/// at the image border and the accumulated weight renormalizes the result,
/// so border pixels average over their real neighbors only.
///
/// Works on 1- and 3-channel rasters; output dimensions equal input
/// dimensions.
///
/// # Example
///
/// ```
/// use tone_quant::{smooth, Channels, Raster};
///
/// let noisy = Raster::new(3, 1, Channels::Gray, vec![100, 110, 100]).unwrap();
/// let out = smooth::bilateral(noisy, 5);
/// assert_eq!((out.width(), out.height()), (3, 1));
/// ```
pub fn bilateral(raster: Raster, strength: u32) -> Raster {
    if strength == 0 {
        return raster;
    }

    let sigma = strength as f32 * 10.0;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let space_weights = space_weight_table(two_sigma_sq);

    let ch = raster.channels().count();
    let (width, height) = (raster.width(), raster.height());
    let data = raster.data();
    let mut out = vec![0u8; data.len()];
    let mut acc = [0f32; 3];

    for y in 0..height {
        for x in 0..width {
            let center = raster.pixel(x, y);

            let y_first = y.saturating_sub(RADIUS);
            let y_last = (y + RADIUS).min(height - 1);
            let x_first = x.saturating_sub(RADIUS);
            let x_last = (x + RADIUS).min(width - 1);

            acc[..ch].fill(0.0);
            let mut total_weight = 0f32;

            for ny in y_first..=y_last {
                let dy = ny.abs_diff(y);
                for nx in x_first..=x_last {
                    let dx = nx.abs_diff(x);
                    let neighbor = &data[(ny * width + nx) * ch..(ny * width + nx) * ch + ch];

                    let mut tone_dist_sq = 0f32;
                    for c in 0..ch {
                        let d = f32::from(neighbor[c]) - f32::from(center[c]);
                        tone_dist_sq += d * d;
                    }

                    let weight =
                        space_weights[dy][dx] * (-tone_dist_sq / two_sigma_sq).exp();
                    for c in 0..ch {
                        acc[c] += f32::from(neighbor[c]) * weight;
                    }
                    total_weight += weight;
                }
            }

            let base = (y * width + x) * ch;
            for c in 0..ch {
                out[base + c] = (acc[c] / total_weight).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Raster::from_raw(width, height, raster.channels(), out)
}

/// Precomputed spatial weights for every (dy, dx) offset inside the window.
fn space_weight_table(two_sigma_sq: f32) -> [[f32; RADIUS + 1]; RADIUS + 1] {
    let mut table = [[0f32; RADIUS + 1]; RADIUS + 1];
    for (dy, row) in table.iter_mut().enumerate() {
        for (dx, w) in row.iter_mut().enumerate() {
            let dist_sq = (dy * dy + dx * dx) as f32;
            *w = (-dist_sq / two_sigma_sq).exp();
        }
    }
    table
}
