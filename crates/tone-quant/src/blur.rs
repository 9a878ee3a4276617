//! Isotropic focus blur.
//!
//! Simulates depth-of-field softening ahead of posterization. The blur is a
//! separable Gaussian: one normalized 1-D kernel applied horizontally, then
//! vertically, which matches the 2-D convolution at a fraction of the work.

use crate::raster::{Channels, Raster};

/// Apply Gaussian blur with a kernel size derived from `radius`.
///
/// A radius of 0 is a no-op and returns the input unchanged. Otherwise the
/// kernel size is `radius` rounded up to the next odd value (a centered blur
/// needs an odd kernel), and sigma follows the standard derivation from the
/// kernel size: `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`. A radius of 1 yields
/// a single-tap kernel, which also leaves the samples unchanged.
///
/// Samples outside the image replicate the nearest edge sample. Works on
/// 1- and 3-channel rasters; output dimensions equal input dimensions.
///
/// # Example
///
/// ```
/// use tone_quant::{blur, Channels, Raster};
///
/// let spike = Raster::new(3, 3, Channels::Gray, vec![0, 0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
/// let out = blur::gaussian(spike, 3);
/// assert!(out.pixel(1, 1)[0] < 255, "the spike spreads to its neighbors");
/// ```
pub fn gaussian(raster: Raster, radius: u32) -> Raster {
    if radius == 0 {
        return raster;
    }

    let ksize = if radius % 2 == 0 { radius + 1 } else { radius } as usize;
    let kernel = gaussian_kernel(ksize);

    let (width, height) = (raster.width(), raster.height());
    let channels = raster.channels();
    let horizontal = convolve_rows(raster.data(), width, height, channels, &kernel);
    let vertical = convolve_columns(&horizontal, width, height, channels, &kernel);

    let data = vertical
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    Raster::from_raw(width, height, channels, data)
}

/// Normalized 1-D Gaussian kernel for an odd `ksize`.
fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = 0.3 * ((ksize - 1) as f32 * 0.5 - 1.0) + 0.8;
    let center = (ksize / 2) as isize;
    let mut kernel: Vec<f32> = (0..ksize)
        .map(|i| {
            let d = (i as isize - center) as f32;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for tap in &mut kernel {
        *tap /= sum;
    }
    kernel
}

fn convolve_rows(
    data: &[u8],
    width: usize,
    height: usize,
    channels: Channels,
    kernel: &[f32],
) -> Vec<f32> {
    let ch = channels.count();
    let reach = (kernel.len() / 2) as isize;
    let mut out = vec![0f32; data.len()];

    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            for c in 0..ch {
                let mut sum = 0f32;
                for (k, &tap) in kernel.iter().enumerate() {
                    let sx = clamp_index(x as isize + k as isize - reach, width);
                    sum += tap * f32::from(data[(row + sx) * ch + c]);
                }
                out[(row + x) * ch + c] = sum;
            }
        }
    }
    out
}

fn convolve_columns(
    data: &[f32],
    width: usize,
    height: usize,
    channels: Channels,
    kernel: &[f32],
) -> Vec<f32> {
    let ch = channels.count();
    let reach = (kernel.len() / 2) as isize;
    let mut out = vec![0f32; data.len()];

    for y in 0..height {
        for x in 0..width {
            for c in 0..ch {
                let mut sum = 0f32;
                for (k, &tap) in kernel.iter().enumerate() {
                    let sy = clamp_index(y as isize + k as isize - reach, height);
                    sum += tap * data[(sy * width + x) * ch + c];
                }
                out[(y * width + x) * ch + c] = sum;
            }
        }
    }
    out
}

/// Replicate-border index clamp.
#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
