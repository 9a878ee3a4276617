pub mod engine;
pub mod store;

pub use engine::StudyEngine;
pub use store::ResultStore;
