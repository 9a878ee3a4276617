//! Bounded preview downscaling.
//!
//! Interactive edits run on a preview no larger than a fixed maximum
//! dimension. [`shrink_to_fit`] computes one scale factor from the longest
//! side, applies it to both dimensions with independent rounding, and
//! resamples by area averaging: each output pixel is the coverage-weighted
//! mean of the exact source rectangle it maps to. Images already inside the
//! bound move through untouched.

use crate::raster::Raster;

/// Downscale a raster so its longest side is at most `max_dimension`.
///
/// The scale factor is `max_dimension / max(width, height)`; when that is
/// 1 or more the input is returned unchanged. Otherwise both dimensions are
/// multiplied by the factor and rounded to the nearest integer independently
/// (never below 1), so the aspect ratio is preserved up to rounding. The
/// output is never larger than the input in either dimension.
///
/// # Example
///
/// ```
/// use tone_quant::{resample, Channels, Raster};
///
/// let wide = Raster::new(1000, 500, Channels::Gray, vec![0; 500_000]).unwrap();
/// let preview = resample::shrink_to_fit(wide, 384);
/// assert_eq!((preview.width(), preview.height()), (384, 192));
/// ```
pub fn shrink_to_fit(raster: Raster, max_dimension: u32) -> Raster {
    let longest = raster.width().max(raster.height());
    let bound = max_dimension as usize;
    if longest <= bound {
        return raster;
    }

    let scale = bound as f64 / longest as f64;
    let dst_w = ((raster.width() as f64 * scale).round() as usize).max(1);
    let dst_h = ((raster.height() as f64 * scale).round() as usize).max(1);
    area_average(&raster, dst_w, dst_h)
}

/// Resample by averaging the exact source area covered by each output pixel.
///
/// Source pixels that partially overlap an output pixel's footprint
/// contribute in proportion to the overlap, so detail is merged rather than
/// skipped even at large reduction ratios.
fn area_average(src: &Raster, dst_w: usize, dst_h: usize) -> Raster {
    let ch = src.channels().count();
    let (src_w, src_h) = (src.width(), src.height());
    let ratio_x = src_w as f64 / dst_w as f64;
    let ratio_y = src_h as f64 / dst_h as f64;
    let data = src.data();

    let mut out = vec![0u8; dst_w * dst_h * ch];
    let mut acc = vec![0f64; ch];

    for dy in 0..dst_h {
        let top = dy as f64 * ratio_y;
        let bottom = (dy + 1) as f64 * ratio_y;
        let y_first = top.floor() as usize;
        let y_last = (bottom.ceil() as usize).min(src_h);

        for dx in 0..dst_w {
            let left = dx as f64 * ratio_x;
            let right = (dx + 1) as f64 * ratio_x;
            let x_first = left.floor() as usize;
            let x_last = (right.ceil() as usize).min(src_w);

            acc.fill(0.0);
            let mut coverage = 0f64;

            for sy in y_first..y_last {
                let span_y = (bottom.min((sy + 1) as f64) - top.max(sy as f64)).max(0.0);
                if span_y == 0.0 {
                    continue;
                }
                let row_base = sy * src_w;
                for sx in x_first..x_last {
                    let span_x = (right.min((sx + 1) as f64) - left.max(sx as f64)).max(0.0);
                    if span_x == 0.0 {
                        continue;
                    }
                    let weight = span_x * span_y;
                    let base = (row_base + sx) * ch;
                    for (c, slot) in acc.iter_mut().enumerate() {
                        *slot += f64::from(data[base + c]) * weight;
                    }
                    coverage += weight;
                }
            }

            let out_base = (dy * dst_w + dx) * ch;
            for (c, slot) in acc.iter().enumerate() {
                out[out_base + c] = (slot / coverage).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Raster::from_raw(dst_w, dst_h, src.channels(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Channels;

    fn gradient_gray(width: usize, height: usize) -> Raster {
        let data = (0..width * height).map(|i| (i % 256) as u8).collect();
        Raster::new(width, height, Channels::Gray, data).unwrap()
    }

    // ===== No-op Tests =====

    #[test]
    fn test_small_image_unchanged() {
        let raster = gradient_gray(100, 80);
        let expected = raster.clone();
        let out = shrink_to_fit(raster, 384);
        assert_eq!(out, expected, "images inside the bound must move through untouched");
    }

    #[test]
    fn test_exact_bound_unchanged() {
        let raster = gradient_gray(384, 200);
        let out = shrink_to_fit(raster, 384);
        assert_eq!((out.width(), out.height()), (384, 200));
    }

    // ===== Scaling Tests =====

    #[test]
    fn test_landscape_scales_to_bound() {
        let raster = gradient_gray(1024, 768);
        let out = shrink_to_fit(raster, 256);
        assert_eq!((out.width(), out.height()), (256, 192));
    }

    #[test]
    fn test_portrait_scales_to_bound() {
        let raster = gradient_gray(768, 1024);
        let out = shrink_to_fit(raster, 256);
        assert_eq!((out.width(), out.height()), (192, 256));
    }

    #[test]
    fn test_dimensions_round_independently() {
        // scale = 384 / 1000; 700 * 0.384 = 268.8 rounds up to 269.
        let raster = gradient_gray(1000, 700);
        let out = shrink_to_fit(raster, 384);
        assert_eq!((out.width(), out.height()), (384, 269));
    }

    #[test]
    fn test_never_upsizes() {
        for (w, h) in [(10, 10), (383, 1), (1, 383), (384, 384), (385, 2)] {
            let out = shrink_to_fit(gradient_gray(w, h), 384);
            assert!(out.width() <= w, "width grew for {}x{}", w, h);
            assert!(out.height() <= h, "height grew for {}x{}", w, h);
        }
    }

    #[test]
    fn test_extreme_aspect_keeps_minimum_dimension() {
        let raster = gradient_gray(4000, 2);
        let out = shrink_to_fit(raster, 100);
        assert_eq!(out.width(), 100);
        assert_eq!(out.height(), 1, "rounded-to-zero dimensions clamp to 1");
    }

    // ===== Content Tests =====

    #[test]
    fn test_uniform_image_stays_uniform() {
        let raster = Raster::new(800, 600, Channels::Gray, vec![137; 480_000]).unwrap();
        let out = shrink_to_fit(raster, 200);
        assert!(
            out.data().iter().all(|&v| v == 137),
            "averaging a constant image must reproduce the constant"
        );
    }

    #[test]
    fn test_exact_2x_box_average() {
        // 2x2 blocks of known values collapse to their means.
        let data = vec![
            10, 10, 200, 200, //
            10, 10, 200, 200, //
        ];
        let raster = Raster::new(4, 2, Channels::Gray, data).unwrap();
        let out = shrink_to_fit(raster, 2);
        assert_eq!((out.width(), out.height()), (2, 1));
        assert_eq!(out.data(), &[10, 200]);
    }

    #[test]
    fn test_rgb_channels_average_independently() {
        let data = vec![
            255, 0, 0, /**/ 0, 0, 255, //
            255, 0, 0, /**/ 0, 0, 255, //
        ];
        let raster = Raster::new(2, 2, Channels::Rgb, data).unwrap();
        let out = shrink_to_fit(raster, 1);
        assert_eq!((out.width(), out.height()), (1, 1));
        assert_eq!(out.data(), &[128, 0, 128]);
    }

    #[test]
    fn test_average_preserves_total_brightness() {
        let raster = gradient_gray(512, 512);
        let src_mean = raster.data().iter().map(|&v| f64::from(v)).sum::<f64>()
            / raster.data().len() as f64;
        let out = shrink_to_fit(raster, 128);
        let dst_mean =
            out.data().iter().map(|&v| f64::from(v)).sum::<f64>() / out.data().len() as f64;
        assert!(
            (src_mean - dst_mean).abs() < 1.0,
            "area averaging should keep the mean stable: {} vs {}",
            src_mean,
            dst_mean
        );
    }
}
