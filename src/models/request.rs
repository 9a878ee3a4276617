use crate::error::ProcessError;
use serde::Deserialize;

/// Strip the `file://` scheme prefix mobile galleries attach to local paths.
///
/// Anything else (including other schemes) passes through untouched and is
/// treated as a filesystem path.
pub fn strip_file_scheme(source: &str) -> &str {
    source.strip_prefix("file://").unwrap_or(source)
}

/// Normalize caller-supplied cutoffs into a strictly ascending sequence.
///
/// Callers hand over whatever their slider UI produced: unsorted, duplicated,
/// out of the 0..=255 range. Rather than reject, repair:
///
/// 1. sort ascending
/// 2. bump each duplicate one step above its predecessor
/// 3. clamp into 0..=255
/// 4. drop any value the clamp pushed back down onto its predecessor
///
/// Step 4 only fires at the ceiling (or floor), so at most the tail is lost:
/// `[254, 255, 255]` becomes `[254, 255]`, and `[170, 170, 5]` becomes
/// `[5, 170, 171]` with nothing dropped.
pub fn sanitize_cutoffs(raw: &[i32]) -> Vec<u8> {
    let mut sorted: Vec<i64> = raw.iter().map(|&v| i64::from(v)).collect();
    sorted.sort_unstable();

    for i in 1..sorted.len() {
        if sorted[i] <= sorted[i - 1] {
            sorted[i] = sorted[i - 1] + 1;
        }
    }

    let mut cleaned: Vec<u8> = Vec::with_capacity(sorted.len());
    for value in sorted {
        let clamped = value.clamp(0, 255) as u8;
        if cleaned.last().map_or(true, |&prev| clamped > prev) {
            cleaned.push(clamped);
        }
    }
    cleaned
}

/// Parameters for a posterize run.
#[derive(Debug, Clone, Deserialize)]
pub struct PosterizeRequest {
    /// Source image path, optionally carrying a `file://` prefix.
    pub source: String,

    /// Requested tone count. Kept as `i32` because callers send raw slider
    /// values; validated before any file is touched.
    pub tones: i32,

    /// Bilateral smoothing strength, 0 disables.
    #[serde(default)]
    pub simplicity: u32,

    /// Gaussian blur radius, 0 disables.
    #[serde(default)]
    pub focus_blur: u32,
}

impl PosterizeRequest {
    /// Reject invalid parameters before the source file is opened.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.tones < 1 {
            return Err(ProcessError::InvalidToneCount(self.tones));
        }
        Ok(())
    }

    /// Source path with any `file://` prefix removed.
    pub fn clean_source(&self) -> &str {
        strip_file_scheme(&self.source)
    }
}

/// Parameters for a threshold run.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdRequest {
    /// Source image path, optionally carrying a `file://` prefix.
    pub source: String,

    /// Raw cutoff values as the caller sent them; sanitized before use.
    pub cutoffs: Vec<i32>,
}

impl ThresholdRequest {
    /// Source path with any `file://` prefix removed.
    pub fn clean_source(&self) -> &str {
        strip_file_scheme(&self.source)
    }

    /// Cutoffs after sorting, de-duplication and clamping.
    pub fn sanitized_cutoffs(&self) -> Vec<u8> {
        sanitize_cutoffs(&self.cutoffs)
    }
}
