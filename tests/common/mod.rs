//! Common test infrastructure for Notan Study integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]

pub mod fixtures;

use notan_study::models::EngineConfig;
use notan_study::services::StudyEngine;
use std::path::Path;

/// Engine writing into `cache_dir` with reference defaults.
pub fn engine_in(cache_dir: &Path) -> StudyEngine {
    StudyEngine::new(EngineConfig::new(cache_dir)).expect("engine construction failed")
}

/// Engine writing into `cache_dir` with a pinned clustering seed.
pub fn seeded_engine_in(cache_dir: &Path, seed: u64) -> StudyEngine {
    let mut config = EngineConfig::new(cache_dir);
    config.clustering_seed = Some(seed);
    StudyEngine::new(config).expect("engine construction failed")
}

/// Names of files in `dir` carrying the default output prefix.
pub fn stored_results(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("cache dir should be readable")
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.starts_with("processed_"))
        .collect();
    names.sort();
    names
}
