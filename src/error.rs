use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the processing engine.
///
/// Every request either fully succeeds or fails with exactly one of these;
/// partial results are never returned. The bridge layer keys its user-facing
/// messaging off [`ProcessError::reason_code`].
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Invalid tone count: {0} (need at least 1)")]
    InvalidToneCount(i32),

    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image {} decoded to an empty raster", path.display())]
    EmptyDecode { path: PathBuf },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    /// Stable reason code for the mobile bridge.
    ///
    /// Validation failures and decode failures have their own codes so the
    /// app can message them specifically; everything downstream of a
    /// successful decode reports the generic processing code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ProcessError::InvalidToneCount(_) => "INVALID_TONES",
            ProcessError::Decode { .. } | ProcessError::EmptyDecode { .. } => "IMAGE_LOAD_FAILED",
            ProcessError::Processing(_) | ProcessError::Encode(_) | ProcessError::Io(_) => {
                "PROCESS_ERROR"
            }
        }
    }
}

impl From<tone_quant::PosterizeError> for ProcessError {
    fn from(e: tone_quant::PosterizeError) -> Self {
        ProcessError::Processing(e.to_string())
    }
}

impl From<tone_quant::ThresholdError> for ProcessError {
    fn from(e: tone_quant::ThresholdError) -> Self {
        ProcessError::Processing(e.to_string())
    }
}
