//! Owned raster buffers shared by every pipeline stage.
//!
//! [`Raster`] is a contiguous, row-major, channel-interleaved grid of 8-bit
//! samples. Every transform in this crate consumes its input raster and
//! returns a fresh one, so a processing pipeline is a chain of moves: once a
//! buffer has been handed to a stage the previous owner can no longer touch
//! it, and a stage with nothing to do hands the buffer back untouched. The
//! float-typed sample plane used by clustering is internal to the posterizer;
//! pipeline buffers are always 8-bit.

use std::fmt;

/// Number of interleaved channels in a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Single luminance channel.
    Gray,
    /// Three interleaved channels in R, G, B order.
    Rgb,
}

impl Channels {
    /// Samples per pixel.
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

/// Errors from raster construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Width or height was zero.
    EmptyDimensions,
    /// Sample store length does not match width × height × channels.
    LengthMismatch {
        /// Length required by the dimensions.
        expected: usize,
        /// Length of the supplied store.
        actual: usize,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::EmptyDimensions => {
                write!(f, "raster dimensions must be at least 1x1")
            }
            RasterError::LengthMismatch { expected, actual } => write!(
                f,
                "sample store holds {} samples but the dimensions require {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for RasterError {}

/// An owned 2D grid of 8-bit pixel samples.
///
/// Samples are stored row-major and channel-interleaved: the pixel at
/// `(x, y)` starts at index `(y * width + x) * channels.count()`.
///
/// # Invariant
///
/// `data.len() == width * height * channels.count()`, with both dimensions
/// at least 1. [`Raster::new`] enforces this; transforms preserve it.
///
/// # Example
///
/// ```
/// use tone_quant::{Channels, Raster};
///
/// let raster = Raster::new(2, 2, Channels::Gray, vec![0, 64, 128, 255]).unwrap();
/// assert_eq!(raster.width(), 2);
/// assert_eq!(raster.pixel(1, 1), &[255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: Channels,
    data: Vec<u8>,
}

impl Raster {
    /// Create a raster from an existing sample store.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::EmptyDimensions`] if either dimension is zero,
    /// or [`RasterError::LengthMismatch`] if the store length does not equal
    /// `width * height * channels.count()`.
    pub fn new(
        width: usize,
        height: usize,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyDimensions);
        }
        let expected = width * height * channels.count();
        if data.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Crate-internal constructor for stages that produce stores of a known
    /// shape. The invariant is checked in debug builds only.
    pub(crate) fn from_raw(width: usize, height: usize, channels: Channels, data: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(data.len(), width * height * channels.count());
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Number of pixels (not samples).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// The full sample store, row-major and channel-interleaved.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster and take its sample store.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// All samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * self.channels.count();
        &self.data[y * stride..(y + 1) * stride]
    }

    /// The samples of the pixel at `(x, y)`, one per channel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let ch = self.channels.count();
        let base = (y * self.width + x) * ch;
        &self.data[base..base + ch]
    }
}
