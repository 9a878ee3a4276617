//! Tonal quantization via iterative clustering.
//!
//! Posterization reduces a grayscale image to K representative intensities.
//! Rather than slicing the range into fixed bands, the tone levels are
//! learned from the image itself with k-means: the clusters settle on the
//! intensities that actually dominate the photo, which is what makes the
//! result read as a value study instead of a banding artifact.
//!
//! Seeding is random by default. Clustering over a 1-D intensity
//! distribution converges fast, but a single unlucky seeding can still land
//! in a poor local optimum, so the whole run is repeated a few times and the
//! attempt with the lowest within-cluster variance wins. Callers that need
//! bit-identical output across runs fix the seed via
//! [`PosterizeOptions::seed`].

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::raster::{Channels, Raster};

/// Configuration for the clustering loop.
///
/// The defaults mirror the tuning the pipeline was calibrated with; they are
/// rarely worth changing outside of tests.
///
/// # Example
///
/// ```
/// use tone_quant::PosterizeOptions;
///
/// // Defaults (nondeterministic seeding)
/// let options = PosterizeOptions::new();
///
/// // Reproducible runs for tests
/// let options = PosterizeOptions::new().seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct PosterizeOptions {
    /// Number of independent clustering attempts; the attempt with the
    /// lowest total within-cluster squared distance wins.
    ///
    /// Default: `3`
    pub attempts: u32,

    /// Iteration cap for one attempt's assign/update loop.
    ///
    /// Default: `10`
    pub max_iterations: u32,

    /// Convergence threshold: an attempt stops early once no center moved
    /// more than this between iterations.
    ///
    /// Default: `1.0`
    pub epsilon: f32,

    /// Fixed RNG seed for deterministic seeding, or `None` to draw entropy
    /// from the OS on every call.
    ///
    /// Default: `None`
    pub seed: Option<u64>,
}

impl Default for PosterizeOptions {
    fn default() -> Self {
        Self {
            attempts: 3,
            max_iterations: 10,
            epsilon: 1.0,
            seed: None,
        }
    }
}

impl PosterizeOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of clustering attempts (clamped to at least 1).
    #[inline]
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Set the iteration cap per attempt.
    #[inline]
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold.
    #[inline]
    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Fix the RNG seed for reproducible output.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Errors from [`posterize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterizeError {
    /// The tone count was zero; at least one tone level is required.
    InvalidToneCount,
    /// The input raster was not single-channel.
    NotGrayscale,
}

impl fmt::Display for PosterizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosterizeError::InvalidToneCount => {
                write!(f, "tone count must be at least 1")
            }
            PosterizeError::NotGrayscale => {
                write!(f, "posterization requires a single-channel raster")
            }
        }
    }
}

impl std::error::Error for PosterizeError {}

/// One finished clustering attempt.
struct Clustering {
    centers: Vec<f32>,
    labels: Vec<usize>,
    compactness: f64,
}

/// Quantize a grayscale raster to at most `tones` intensity levels.
///
/// Every sample is replaced by the center of its cluster, rounded to the
/// nearest integer in [0, 255]. The output therefore contains at most
/// `tones` distinct values; it may contain fewer when clusters end up empty
/// (a uniform input is the extreme case) or when two rounded centers
/// collide. Input and output dimensions are identical.
///
/// # Errors
///
/// [`PosterizeError::InvalidToneCount`] if `tones` is 0, and
/// [`PosterizeError::NotGrayscale`] if the raster has more than one channel.
///
/// # Example
///
/// ```
/// use tone_quant::{posterize, Channels, PosterizeOptions, Raster};
///
/// let ramp: Vec<u8> = (0..=255).collect();
/// let raster = Raster::new(16, 16, Channels::Gray, ramp).unwrap();
/// let out = posterize(raster, 4, &PosterizeOptions::new().seed(1)).unwrap();
///
/// let mut values: Vec<u8> = out.data().to_vec();
/// values.sort_unstable();
/// values.dedup();
/// assert!(values.len() <= 4);
/// ```
pub fn posterize(
    raster: Raster,
    tones: u32,
    options: &PosterizeOptions,
) -> Result<Raster, PosterizeError> {
    if tones == 0 {
        return Err(PosterizeError::InvalidToneCount);
    }
    if raster.channels() != Channels::Gray {
        return Err(PosterizeError::NotGrayscale);
    }

    let k = tones as usize;
    let samples: Vec<f32> = raster.data().iter().map(|&v| f32::from(v)).collect();

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut best = cluster(&samples, k, options, &mut rng);
    for _ in 1..options.attempts.max(1) {
        let attempt = cluster(&samples, k, options, &mut rng);
        if attempt.compactness < best.compactness {
            best = attempt;
        }
    }

    let levels: Vec<u8> = best
        .centers
        .iter()
        .map(|c| c.round().clamp(0.0, 255.0) as u8)
        .collect();
    let (width, height) = (raster.width(), raster.height());
    let data: Vec<u8> = best.labels.iter().map(|&label| levels[label]).collect();
    Ok(Raster::from_raw(width, height, Channels::Gray, data))
}

/// One full k-means run: seed, iterate to convergence or the cap, then take
/// a final assignment pass so labels match the final centers.
fn cluster(samples: &[f32], k: usize, options: &PosterizeOptions, rng: &mut StdRng) -> Clustering {
    let mut centers = seed_centers(samples, k, rng);
    let mut labels = vec![0usize; samples.len()];

    for _ in 0..options.max_iterations {
        assign(samples, &centers, &mut labels);
        let movement = update(samples, &labels, &mut centers);
        if movement <= options.epsilon {
            break;
        }
    }
    assign(samples, &centers, &mut labels);

    let compactness = samples
        .iter()
        .zip(&labels)
        .map(|(&s, &label)| f64::from(square(s - centers[label])))
        .sum();

    Clustering {
        centers,
        labels,
        compactness,
    }
}

/// k-means++ seeding: the first center is drawn uniformly, each further
/// center with probability proportional to its squared distance to the
/// nearest center chosen so far. Spreading the seeds this way avoids the
/// collapsed initializations plain uniform seeding produces on skewed
/// intensity distributions.
fn seed_centers(samples: &[f32], k: usize, rng: &mut StdRng) -> Vec<f32> {
    let mut centers = Vec::with_capacity(k);
    let first = samples[rng.gen_range(0..samples.len())];
    centers.push(first);

    let mut nearest_sq: Vec<f64> = samples
        .iter()
        .map(|&s| f64::from(square(s - first)))
        .collect();

    while centers.len() < k {
        let total: f64 = nearest_sq.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = samples.len() - 1;
            for (i, &d) in nearest_sq.iter().enumerate() {
                if target < d {
                    chosen = i;
                    break;
                }
                target -= d;
            }
            samples[chosen]
        } else {
            // Every sample already coincides with a center (uniform image
            // or k exceeds the distinct values); any draw is as good.
            samples[rng.gen_range(0..samples.len())]
        };

        centers.push(next);
        for (d, &s) in nearest_sq.iter_mut().zip(samples) {
            *d = d.min(f64::from(square(s - next)));
        }
    }
    centers
}

/// Assign every sample to its nearest center; ties go to the lowest index.
fn assign(samples: &[f32], centers: &[f32], labels: &mut [usize]) {
    for (label, &s) in labels.iter_mut().zip(samples) {
        let mut best = 0;
        let mut best_dist = square(s - centers[0]);
        for (i, &c) in centers.iter().enumerate().skip(1) {
            let dist = square(s - c);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        *label = best;
    }
}

/// Recompute each center as the mean of its members, returning the largest
/// center movement. An empty cluster keeps its previous center.
fn update(samples: &[f32], labels: &[usize], centers: &mut [f32]) -> f32 {
    let mut sums = vec![0f64; centers.len()];
    let mut counts = vec![0usize; centers.len()];
    for (&s, &label) in samples.iter().zip(labels) {
        sums[label] += f64::from(s);
        counts[label] += 1;
    }

    let mut movement = 0f32;
    for (i, center) in centers.iter_mut().enumerate() {
        if counts[i] == 0 {
            continue;
        }
        let mean = (sums[i] / counts[i] as f64) as f32;
        movement = movement.max((mean - *center).abs());
        *center = mean;
    }
    movement
}

#[inline]
fn square(v: f32) -> f32 {
    v * v
}
