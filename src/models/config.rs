use serde::Deserialize;
use std::path::PathBuf;

/// Engine configuration supplied by the host application.
///
/// The engine has no config file of its own; the mobile host (or the CLI)
/// builds one of these and hands it over at construction. Every field except
/// the cache directory has a serde default, so a host embedding this in its
/// own config only has to say where outputs go.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Directory processed previews are written into.
    pub cache_dir: PathBuf,

    /// Longest side of the working preview; larger sources are downscaled
    /// before any processing.
    #[serde(default = "default_max_preview_dim")]
    pub max_preview_dim: u32,

    /// Filename prefix shared by all outputs. Also how prior outputs are
    /// recognized for eviction.
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// Delete prior prefix-matching outputs before each write, so the cache
    /// holds at most one result per study session.
    #[serde(default = "default_evict_previous")]
    pub evict_previous: bool,

    /// Fixed clustering seed. `None` draws fresh entropy per request;
    /// tests and golden previews pin a value here.
    #[serde(default)]
    pub clustering_seed: Option<u64>,
}

fn default_max_preview_dim() -> u32 {
    384
}

fn default_output_prefix() -> String {
    "processed_".to_string()
}

fn default_evict_previous() -> bool {
    true
}

impl EngineConfig {
    /// Configuration with reference defaults, writing into `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            max_preview_dim: default_max_preview_dim(),
            output_prefix: default_output_prefix(),
            evict_previous: default_evict_previous(),
            clustering_seed: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join("notan-study"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_reference_defaults() {
        let config = EngineConfig::new("/data/cache");

        assert_eq!(config.cache_dir, PathBuf::from("/data/cache"));
        assert_eq!(config.max_preview_dim, 384);
        assert_eq!(config.output_prefix, "processed_");
        assert!(config.evict_previous);
        assert!(config.clustering_seed.is_none());
    }

    #[test]
    fn test_default_writes_under_temp_dir() {
        let config = EngineConfig::default();

        assert!(config.cache_dir.starts_with(std::env::temp_dir()));
        assert_eq!(config.max_preview_dim, 384);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "cache_dir": "/tmp/studies" }"#).unwrap();

        assert_eq!(config.cache_dir, PathBuf::from("/tmp/studies"));
        assert_eq!(config.max_preview_dim, 384);
        assert_eq!(config.output_prefix, "processed_");
        assert!(config.evict_previous);
        assert!(config.clustering_seed.is_none());
    }

    #[test]
    fn test_deserialize_overrides_everything() {
        let config: EngineConfig = serde_json::from_str(
            r#"{
                "cache_dir": "/tmp/studies",
                "max_preview_dim": 512,
                "output_prefix": "study_",
                "evict_previous": false,
                "clustering_seed": 9
            }"#,
        )
        .unwrap();

        assert_eq!(config.max_preview_dim, 512);
        assert_eq!(config.output_prefix, "study_");
        assert!(!config.evict_previous);
        assert_eq!(config.clustering_seed, Some(9));
    }

    #[test]
    fn test_default_max_preview_dim_function() {
        assert_eq!(default_max_preview_dim(), 384);
    }

    #[test]
    fn test_default_output_prefix_function() {
        assert_eq!(default_output_prefix(), "processed_");
    }
}
