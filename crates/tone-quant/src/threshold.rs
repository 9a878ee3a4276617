//! Multi-level thresholding.
//!
//! A [`ThresholdSet`] of B−1 ascending cutoffs splits the intensity range
//! into B bands; every sample is replaced by its band's evenly spaced output
//! level. The mapping depends only on the sample value, so it is built once
//! as a 256-entry table and applied with a lookup per sample.

use std::fmt;

use crate::raster::{Channels, Raster};

/// Errors from threshold configuration or application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdError {
    /// A cutoff was not strictly greater than its predecessor.
    NotAscending {
        /// Index of the offending cutoff.
        position: usize,
    },
    /// The input raster was not single-channel.
    NotGrayscale,
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdError::NotAscending { position } => write!(
                f,
                "cutoff at position {} does not exceed its predecessor",
                position
            ),
            ThresholdError::NotGrayscale => {
                write!(f, "thresholding requires a single-channel raster")
            }
        }
    }
}

impl std::error::Error for ThresholdError {}

/// A strictly ascending sequence of intensity cutoffs.
///
/// N cutoffs define N+1 bands. The empty set is valid and defines a single
/// band, which maps every sample to 0 (a degenerate but legal
/// configuration). Callers that accept arbitrary numbers normalize them
/// before constructing a set; the constructor only verifies the invariant.
///
/// # Example
///
/// ```
/// use tone_quant::ThresholdSet;
///
/// let set = ThresholdSet::new(vec![85, 170]).unwrap();
/// assert_eq!(set.bands(), 3);
/// assert!(ThresholdSet::new(vec![85, 85]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdSet {
    cutoffs: Vec<u8>,
}

impl ThresholdSet {
    /// Create a set, verifying that the cutoffs are strictly ascending.
    ///
    /// # Errors
    ///
    /// [`ThresholdError::NotAscending`] naming the first cutoff that is not
    /// strictly greater than its predecessor.
    pub fn new(cutoffs: Vec<u8>) -> Result<Self, ThresholdError> {
        for (i, pair) in cutoffs.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ThresholdError::NotAscending { position: i + 1 });
            }
        }
        Ok(Self { cutoffs })
    }

    /// The cutoffs, ascending.
    #[inline]
    pub fn cutoffs(&self) -> &[u8] {
        &self.cutoffs
    }

    /// Number of bands defined by the cutoffs.
    #[inline]
    pub fn bands(&self) -> usize {
        self.cutoffs.len() + 1
    }

    /// Output level for band `n` of `B`: `round(255 / B * n)`. Band 0 is
    /// always 0, so the darkest band renders black.
    #[inline]
    fn level(&self, band: usize) -> u8 {
        ((255.0 * band as f32) / self.bands() as f32).round() as u8
    }

    /// Per-value mapping table: index by sample value, get the band level.
    fn lookup_table(&self) -> [u8; 256] {
        let mut table = [0u8; 256];
        for (value, out) in table.iter_mut().enumerate() {
            let band = self
                .cutoffs
                .iter()
                .take_while(|&&cutoff| value as u8 > cutoff)
                .count();
            *out = self.level(band);
        }
        table
    }
}

/// Classify every sample of a grayscale raster into its band level.
///
/// A sample's band index is the number of cutoffs it exceeds (the cutoffs
/// are ascending, so that count is the length of the exceeded prefix). The
/// output contains at most `bands()` distinct values, each of the form
/// `round(255 * n / B)`. Dimensions are unchanged.
///
/// # Errors
///
/// [`ThresholdError::NotGrayscale`] if the raster has more than one channel.
///
/// # Example
///
/// ```
/// use tone_quant::{threshold, Channels, Raster, ThresholdSet};
///
/// let set = ThresholdSet::new(vec![128]).unwrap();
/// let raster = Raster::new(2, 1, Channels::Gray, vec![10, 240]).unwrap();
/// let out = threshold::apply(raster, &set).unwrap();
/// assert_eq!(out.data(), &[0, 128]);
/// ```
pub fn apply(raster: Raster, set: &ThresholdSet) -> Result<Raster, ThresholdError> {
    if raster.channels() != Channels::Gray {
        return Err(ThresholdError::NotGrayscale);
    }

    let table = set.lookup_table();
    let (width, height) = (raster.width(), raster.height());
    let data: Vec<u8> = raster
        .into_data()
        .into_iter()
        .map(|v| table[v as usize])
        .collect();
    Ok(Raster::from_raw(width, height, Channels::Gray, data))
}
