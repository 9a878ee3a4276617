//! Luminance histograms.

use crate::raster::{Channels, Raster};

/// Frequency counts of a grayscale buffer, one bin per 8-bit intensity.
///
/// A histogram is rebuilt from scratch for every measurement; there is no
/// incremental update path. The sum of all bins always equals the number of
/// pixels measured.
///
/// # Example
///
/// ```
/// use tone_quant::{Channels, Histogram, Raster};
///
/// let raster = Raster::new(2, 2, Channels::Gray, vec![0, 0, 50, 200]).unwrap();
/// let hist = Histogram::measure(&raster);
/// assert_eq!(hist.bin(0), 2);
/// assert_eq!(hist.bin(50), 1);
/// assert_eq!(hist.total(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u32; 256],
}

impl Histogram {
    /// Count sample frequencies over a whole single-channel raster.
    ///
    /// Callers reduce multi-channel buffers with [`crate::gray::to_luma`]
    /// first; the debug assertion catches pipelines that forget.
    pub fn measure(raster: &Raster) -> Self {
        debug_assert_eq!(raster.channels(), Channels::Gray);
        let mut bins = [0u32; 256];
        for &v in raster.data() {
            bins[v as usize] += 1;
        }
        Self { bins }
    }

    /// Count for one intensity value.
    #[inline]
    pub fn bin(&self, value: u8) -> u32 {
        self.bins[value as usize]
    }

    /// All 256 bins, indexed by intensity.
    #[inline]
    pub fn counts(&self) -> &[u32; 256] {
        &self.bins
    }

    /// Total number of samples counted.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| u64::from(c)).sum()
    }
}
