//! tone-quant: tonal quantization and filtering for photo value studies.
//!
//! This crate is the numeric core of a notan-study tool: it turns a photo
//! into a small number of flat tones so the light/dark structure of a
//! composition can be judged without detail getting in the way. Everything
//! here operates on plain in-memory buffers with no file or thread concerns,
//! so each stage is testable in isolation and the whole pipeline is
//! reproducible given a seed.
//!
//! # Quick Start
//!
//! ```
//! use tone_quant::{gray, posterize, resample, Channels, PosterizeOptions, Raster};
//!
//! // A small grayscale gradient standing in for a decoded photo.
//! let data: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
//! let raster = Raster::new(8, 8, Channels::Gray, data).unwrap();
//!
//! let preview = resample::shrink_to_fit(raster, 384);
//! let luma = gray::to_luma(preview);
//! let study = posterize(luma, 3, &PosterizeOptions::new().seed(7)).unwrap();
//!
//! let mut tones: Vec<u8> = study.data().to_vec();
//! tones.sort_unstable();
//! tones.dedup();
//! assert!(tones.len() <= 3);
//! ```
//!
//! # Pipeline
//!
//! The stages compose as a chain of buffer moves; each consumes its input
//! and returns a fresh raster (no-op stages hand the buffer back untouched):
//!
//! ```text
//! decoded raster (1 or 3 channels)
//!     |
//!     v
//! resample::shrink_to_fit      bound the working resolution (max side 384)
//!     |
//!     v
//! prep::PrepOptions::run       optional stages, planned per request:
//!     |                          smooth::bilateral  ("simplicity")
//!     |                          blur::gaussian     (focus blur)
//!     v
//! gray::to_luma                fixed BT.601 weights, one formula everywhere
//!     |
//!     +---> posterize           k-means tone levels        -> K-tone raster
//!     +---> threshold::apply    banded step function       -> B-tone raster
//!     +---> Histogram::measure  256-bin frequency counts   -> counts array
//! ```
//!
//! # Why bilateral smoothing before clustering
//!
//! Posterization rewards large, clean tone regions. A plain Gaussian blur
//! would merge texture *and* soften silhouette edges, and the clustering
//! step would then plant tone boundaries inside the blur gradients. The
//! bilateral filter suppresses texture while leaving strong edges sharp, so
//! clusters snap to real silhouettes. Focus blur is available separately for
//! deliberate depth-of-field softening and always runs after smoothing.
//!
//! # Determinism
//!
//! Thresholding, histograms, grayscale conversion, and resampling are pure
//! functions of their inputs. Posterization seeds its clustering randomly by
//! default (matching the behavior the tool shipped with); fixing
//! [`PosterizeOptions::seed`] makes it bit-reproducible. Tests therefore
//! assert structural properties such as distinct-value bounds and band
//! levels, and use pixel-exact comparisons only under a fixed seed.

pub mod blur;
pub mod gray;
pub mod histogram;
pub mod posterize;
pub mod prep;
pub mod raster;
pub mod resample;
pub mod smooth;
pub mod threshold;


pub use histogram::Histogram;
pub use posterize::{posterize, PosterizeError, PosterizeOptions};
pub use prep::{PrepOptions, PrepStage};
pub use raster::{Channels, Raster, RasterError};
pub use threshold::{ThresholdError, ThresholdSet};
