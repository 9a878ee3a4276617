//! Image decode/encode boundary.
//!
//! Decoding accepts whatever formats the `image` crate ships with (the
//! sources are camera photos, so JPEG and PNG in practice). Encoding always
//! produces 8-bit grayscale PNG: study outputs are hard-banded tonal images,
//! and a lossy encoder would ring around exactly the edges the transforms
//! worked to keep clean.

use std::io::Cursor;
use std::path::Path;

use image::DynamicImage;
use tone_quant::{Channels, Raster};

use crate::error::ProcessError;

/// Decode a source file into a raster.
///
/// Grayscale sources stay single-channel; everything else converts to
/// interleaved RGB8 with alpha dropped. The path must already be a plain
/// filesystem path (scheme stripping happens at the request boundary).
pub fn decode(path: &Path) -> Result<Raster, ProcessError> {
    let decoded = image::open(path).map_err(|source| ProcessError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    if width == 0 || height == 0 {
        return Err(ProcessError::EmptyDecode {
            path: path.to_path_buf(),
        });
    }

    let raster = match decoded {
        DynamicImage::ImageLuma8(gray) => {
            Raster::new(width, height, Channels::Gray, gray.into_raw())
        }
        other => Raster::new(width, height, Channels::Rgb, other.to_rgb8().into_raw()),
    };
    raster.map_err(|e| ProcessError::Processing(e.to_string()))
}

/// Encode a single-channel raster as an 8-bit grayscale PNG in memory.
pub fn encode_gray_png(raster: &Raster) -> Result<Vec<u8>, ProcessError> {
    if raster.channels() != Channels::Gray {
        return Err(ProcessError::Encode(
            "expected a single-channel raster".to_string(),
        ));
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder =
            png::Encoder::new(&mut buf, raster.width() as u32, raster.height() as u32);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
        writer
            .write_image_data(raster.data())
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
