//! Test fixtures: small source images written to disk on demand.

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Write a horizontal grayscale ramp (0 at the left edge, 255 at the right).
pub fn write_gray_ramp(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = GrayImage::from_fn(width, height, |x, _| {
        Luma([(x * 255 / (width - 1).max(1)) as u8])
    });
    let path = dir.join(name);
    img.save(&path).expect("fixture image should save");
    path
}

/// Write a solid grayscale image.
pub fn write_solid_gray(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    let img = GrayImage::from_pixel(width, height, Luma([value]));
    let path = dir.join(name);
    img.save(&path).expect("fixture image should save");
    path
}

/// Write a 64x64 RGB image split into four flat quadrants:
/// red, green, blue and white.
pub fn write_color_quadrants(dir: &Path, name: &str) -> PathBuf {
    let img = RgbImage::from_fn(64, 64, |x, y| match (x < 32, y < 32) {
        (true, true) => Rgb([255, 0, 0]),
        (false, true) => Rgb([0, 255, 0]),
        (true, false) => Rgb([0, 0, 255]),
        (false, false) => Rgb([255, 255, 255]),
    });
    let path = dir.join(name);
    img.save(&path).expect("fixture image should save");
    path
}

/// Write a file with a `.png` extension that is not a PNG at all.
pub fn write_corrupt_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"these bytes are not an image").expect("fixture should write");
    path
}

/// Decode a stored result and return its dimensions and gray pixel values.
pub fn read_gray_png(path: &Path) -> (u32, u32, Vec<u8>) {
    let img = image::open(path).expect("stored result should decode");
    let gray = img.to_luma8();
    let (width, height) = (gray.width(), gray.height());
    (width, height, gray.into_raw())
}

/// Distinct pixel values in ascending order.
pub fn distinct_values(pixels: &[u8]) -> Vec<u8> {
    let mut values = pixels.to_vec();
    values.sort_unstable();
    values.dedup();
    values
}
