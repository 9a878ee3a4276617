pub mod config;
pub mod request;

pub use config::EngineConfig;
pub use request::{sanitize_cutoffs, strip_file_scheme, PosterizeRequest, ThresholdRequest};
