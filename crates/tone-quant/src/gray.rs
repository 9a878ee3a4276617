//! Luminance extraction.
//!
//! One fixed weighting is used everywhere a color buffer is reduced to a
//! single channel, so the posterize, threshold, and histogram paths all see
//! identical gray values for the same source pixels.

use crate::raster::{Channels, Raster};

/// BT.601 luminance of one RGB pixel, rounded to the nearest integer.
///
/// `Y = 0.299 R + 0.587 G + 0.114 B`
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Reduce a raster to a single luminance channel.
///
/// A 3-channel buffer is converted pixel by pixel with [`luma`]; a buffer
/// that is already single-channel moves through unchanged.
///
/// # Example
///
/// ```
/// use tone_quant::{gray, Channels, Raster};
///
/// let rgb = Raster::new(1, 1, Channels::Rgb, vec![255, 0, 0]).unwrap();
/// let g = gray::to_luma(rgb);
/// assert_eq!(g.channels(), Channels::Gray);
/// assert_eq!(g.data(), &[76]); // 0.299 * 255
/// ```
pub fn to_luma(raster: Raster) -> Raster {
    match raster.channels() {
        Channels::Gray => raster,
        Channels::Rgb => {
            let (width, height) = (raster.width(), raster.height());
            let data: Vec<u8> = raster
                .data()
                .chunks_exact(3)
                .map(|px| luma(px[0], px[1], px[2]))
                .collect();
            Raster::from_raw(width, height, Channels::Gray, data)
        }
    }
}
