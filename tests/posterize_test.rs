//! End-to-end tests for the posterize pipeline.

mod common;

use common::fixtures;
use notan_study::models::{EngineConfig, PosterizeRequest};
use notan_study::services::StudyEngine;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn request(source: &std::path::Path, tones: i32) -> PosterizeRequest {
    PosterizeRequest {
        source: source.to_str().unwrap().to_string(),
        tones,
        simplicity: 0,
        focus_blur: 0,
    }
}

#[test]
fn test_posterize_stores_prefixed_png() {
    let cache = tempdir().unwrap();
    let sources = tempdir().unwrap();
    let engine = common::engine_in(cache.path());
    let source = fixtures::write_gray_ramp(sources.path(), "ramp.png", 256, 32);

    let result = engine.posterize(&request(&source, 4)).unwrap();

    let root = cache.path().canonicalize().unwrap();
    assert_eq!(result.parent(), Some(root.as_path()));
    let name = result.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("processed_"), "got {name}");
    assert!(name.ends_with(".png"), "got {name}");

    let (width, height, pixels) = fixtures::read_gray_png(&result);
    assert_eq!((width, height), (256, 32));
    assert!(
        fixtures::distinct_values(&pixels).len() <= 4,
        "study should hold at most 4 tones"
    );
}

#[test]
fn test_posterize_returns_absolute_path_for_relative_out_dir() {
    let cache = tempfile::tempdir_in(".").unwrap();
    let sources = tempdir().unwrap();
    assert!(cache.path().is_relative());

    let engine = common::engine_in(cache.path());
    let source = fixtures::write_gray_ramp(sources.path(), "ramp.png", 64, 32);

    let result = engine.posterize(&request(&source, 3)).unwrap();

    assert!(result.is_absolute(), "got {}", result.display());
    assert!(result.exists());
}

#[test]
fn test_posterize_never_exceeds_requested_tones() {
    let cache = tempdir().unwrap();
    let sources = tempdir().unwrap();
    let engine = common::engine_in(cache.path());
    let source = fixtures::write_color_quadrants(sources.path(), "blocks.png");

    let result = engine.posterize(&request(&source, 2)).unwrap();

    let (_, _, pixels) = fixtures::read_gray_png(&result);
    assert!(fixtures::distinct_values(&pixels).len() <= 2);
}

#[test]
fn test_single_tone_study_is_flat() {
    let cache = tempdir().unwrap();
    let sources = tempdir().unwrap();
    let engine = common::engine_in(cache.path());
    let source = fixtures::write_gray_ramp(sources.path(), "ramp.png", 256, 16);

    let result = engine.posterize(&request(&source, 1)).unwrap();

    let (_, _, pixels) = fixtures::read_gray_png(&result);
    assert_eq!(fixtures::distinct_values(&pixels).len(), 1);
}

#[test]
fn test_posterize_downscales_large_sources() {
    let cache = tempdir().unwrap();
    let sources = tempdir().unwrap();
    let engine = common::engine_in(cache.path());
    let source = fixtures::write_gray_ramp(sources.path(), "big.png", 1000, 700);

    let result = engine.posterize(&request(&source, 3)).unwrap();

    // 1000x700 capped at 384 on the long side, both axes rounded.
    let (width, height, _) = fixtures::read_gray_png(&result);
    assert_eq!((width, height), (384, 269));
}

#[test]
fn test_posterize_accepts_file_scheme() {
    let sources = tempdir().unwrap();
    let source = fixtures::write_gray_ramp(sources.path(), "ramp.png", 256, 32);

    let plain_cache = tempdir().unwrap();
    let scheme_cache = tempdir().unwrap();
    let plain_engine = common::seeded_engine_in(plain_cache.path(), 7);
    let scheme_engine = common::seeded_engine_in(scheme_cache.path(), 7);

    let plain = plain_engine.posterize(&request(&source, 4)).unwrap();
    let mut scheme_request = request(&source, 4);
    scheme_request.source = format!("file://{}", scheme_request.source);
    let scheme = scheme_engine.posterize(&scheme_request).unwrap();

    let (_, _, plain_pixels) = fixtures::read_gray_png(&plain);
    let (_, _, scheme_pixels) = fixtures::read_gray_png(&scheme);
    assert_eq!(plain_pixels, scheme_pixels);
}

#[test]
fn test_seeded_runs_reproduce_exactly() {
    let sources = tempdir().unwrap();
    let source = fixtures::write_color_quadrants(sources.path(), "blocks.png");

    let first_cache = tempdir().unwrap();
    let second_cache = tempdir().unwrap();
    let first_engine = common::seeded_engine_in(first_cache.path(), 42);
    let second_engine = common::seeded_engine_in(second_cache.path(), 42);

    let mut req = request(&source, 3);
    req.simplicity = 2;
    req.focus_blur = 3;

    let first = first_engine.posterize(&req).unwrap();
    let second = second_engine.posterize(&req).unwrap();

    let (_, _, first_pixels) = fixtures::read_gray_png(&first);
    let (_, _, second_pixels) = fixtures::read_gray_png(&second);
    assert_eq!(first_pixels, second_pixels);
}

#[test]
fn test_posterize_validates_tones_before_reading_source() {
    let cache = tempdir().unwrap();
    let engine = common::engine_in(cache.path());

    // The source does not exist, but the tone count is checked first.
    let bad = PosterizeRequest {
        source: "/no/such/file.png".to_string(),
        tones: 0,
        simplicity: 0,
        focus_blur: 0,
    };

    let err = engine.posterize(&bad).unwrap_err();
    assert_eq!(err.reason_code(), "INVALID_TONES");
}

#[test]
fn test_posterize_reports_unreadable_source() {
    let cache = tempdir().unwrap();
    let sources = tempdir().unwrap();
    let engine = common::engine_in(cache.path());

    let missing = PosterizeRequest {
        source: "/no/such/file.png".to_string(),
        tones: 3,
        simplicity: 0,
        focus_blur: 0,
    };
    assert_eq!(
        engine.posterize(&missing).unwrap_err().reason_code(),
        "IMAGE_LOAD_FAILED"
    );

    let corrupt = fixtures::write_corrupt_png(sources.path(), "corrupt.png");
    assert_eq!(
        engine.posterize(&request(&corrupt, 3)).unwrap_err().reason_code(),
        "IMAGE_LOAD_FAILED"
    );
}

#[test]
fn test_posterize_evicts_previous_results() {
    let cache = tempdir().unwrap();
    let sources = tempdir().unwrap();
    let engine = common::engine_in(cache.path());
    let source = fixtures::write_gray_ramp(sources.path(), "ramp.png", 128, 32);

    let first = engine.posterize(&request(&source, 3)).unwrap();
    let second = engine.posterize(&request(&source, 5)).unwrap();

    assert!(!first.exists(), "first result should be evicted");
    assert!(second.exists());
    assert_eq!(common::stored_results(cache.path()).len(), 1);
}

#[test]
fn test_posterize_keeps_previous_when_configured() {
    let cache = tempdir().unwrap();
    let sources = tempdir().unwrap();

    let mut config = EngineConfig::new(cache.path());
    config.evict_previous = false;
    let engine = StudyEngine::new(config).unwrap();
    let source = fixtures::write_gray_ramp(sources.path(), "ramp.png", 128, 32);

    engine.posterize(&request(&source, 3)).unwrap();
    engine.posterize(&request(&source, 5)).unwrap();

    assert_eq!(common::stored_results(cache.path()).len(), 2);
}
