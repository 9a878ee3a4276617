use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::ProcessError;
use crate::models::{strip_file_scheme, EngineConfig, PosterizeRequest, ThresholdRequest};
use crate::services::ResultStore;
use tone_quant::{gray, posterize, resample, Histogram, PosterizeOptions, PrepOptions, Raster, ThresholdSet};

/// Orchestrates the full study pipeline: decode, downscale, filter,
/// quantize, encode, store.
///
/// One engine serves a whole app session. It holds no mutable state, so a
/// host can share it across threads and run requests from wherever its
/// bridge callbacks land.
pub struct StudyEngine {
    config: EngineConfig,
    store: ResultStore,
}

impl StudyEngine {
    /// Build an engine, creating the cache directory if needed.
    pub fn new(config: EngineConfig) -> Result<Self, ProcessError> {
        let store = ResultStore::new(&config.cache_dir, &config.output_prefix)?;
        Ok(Self { config, store })
    }

    /// Reduce a photo to a fixed number of flat tones and return the path
    /// of the stored preview.
    ///
    /// Parameters are validated before the source file is touched, so a bad
    /// tone count reports as such even when the path is also bad.
    pub fn posterize(&self, request: &PosterizeRequest) -> Result<PathBuf, ProcessError> {
        request.validate()?;

        let source = Path::new(request.clean_source());
        tracing::debug!(
            source = %source.display(),
            tones = request.tones,
            simplicity = request.simplicity,
            focus_blur = request.focus_blur,
            "Posterize requested"
        );

        let preview = self.load_preview(source)?;
        let prepared = PrepOptions::new()
            .simplicity(request.simplicity)
            .focus_blur(request.focus_blur)
            .run(preview);
        let grayscale = gray::to_luma(prepared);

        let mut options = PosterizeOptions::new();
        if let Some(seed) = self.config.clustering_seed {
            options = options.seed(seed);
        }
        let study = posterize(grayscale, request.tones as u32, &options)?;

        tracing::debug!(tones = request.tones, "Tonal clustering complete");
        self.write_result(&study)
    }

    /// Split a photo into brightness bands at the given cutoffs and return
    /// the path of the stored preview.
    ///
    /// Cutoffs are sanitized first, so any slider output maps to a valid
    /// band set rather than an error.
    pub fn threshold(&self, request: &ThresholdRequest) -> Result<PathBuf, ProcessError> {
        let source = Path::new(request.clean_source());
        let cutoffs = request.sanitized_cutoffs();
        tracing::debug!(
            source = %source.display(),
            cutoffs = ?cutoffs,
            "Threshold requested"
        );

        let preview = self.load_preview(source)?;
        let grayscale = gray::to_luma(preview);

        let set = ThresholdSet::new(cutoffs)?;
        let study = tone_quant::threshold::apply(grayscale, &set)?;

        tracing::debug!(bands = set.bands(), "Threshold mapping complete");
        self.write_result(&study)
    }

    /// Measure the brightness distribution of a photo.
    ///
    /// The histogram is taken on the downscaled grayscale preview, the same
    /// buffer the other operations work on, so its bins line up with what a
    /// posterize or threshold of the same source would see.
    pub fn histogram(&self, source: &str) -> Result<Histogram, ProcessError> {
        let source = Path::new(strip_file_scheme(source));
        tracing::debug!(source = %source.display(), "Histogram requested");

        let preview = self.load_preview(source)?;
        let grayscale = gray::to_luma(preview);

        Ok(Histogram::measure(&grayscale))
    }

    /// Engine configuration this instance was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decode the source and downscale it to the working preview size.
    fn load_preview(&self, source: &Path) -> Result<Raster, ProcessError> {
        let decoded = codec::decode(source)?;
        tracing::debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Decoded source image"
        );

        let preview = resample::shrink_to_fit(decoded, self.config.max_preview_dim);
        tracing::debug!(
            width = preview.width(),
            height = preview.height(),
            "Working preview ready"
        );
        Ok(preview)
    }

    /// Encode a finished study and store it, evicting prior results first
    /// when the configuration asks for that.
    fn write_result(&self, study: &Raster) -> Result<PathBuf, ProcessError> {
        let bytes = codec::encode_gray_png(study)?;

        if self.config.evict_previous {
            self.store.evict_previous();
        }

        let path = self.store.store_png(&bytes)?;
        tracing::info!(path = %path.display(), "Stored study preview");
        Ok(path)
    }
}
