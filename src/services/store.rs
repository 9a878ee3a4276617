use crate::error::ProcessError;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem store for processed previews.
///
/// Every output lands in one cache directory under a shared filename prefix,
/// so results from earlier runs can be recognized and evicted. Each write
/// gets a fresh UUID in its name: mobile image views cache by path, and a
/// never-repeating name is what forces them to load the new preview.
pub struct ResultStore {
    cache_dir: PathBuf,
    prefix: String,
}

impl ResultStore {
    /// Create a store rooted at `cache_dir`, creating the directory if needed.
    ///
    /// The root is resolved to an absolute path here, so every path handed
    /// back by [`ResultStore::store_png`] is absolute even when the caller
    /// configured a relative directory.
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Result<Self, ProcessError> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir)?;
        let cache_dir = cache_dir.canonicalize()?;

        Ok(Self {
            cache_dir,
            prefix: prefix.into(),
        })
    }

    /// Delete prior outputs sharing this store's prefix.
    ///
    /// Best effort: a file that cannot be removed is logged and skipped,
    /// the current request still proceeds.
    pub fn evict_previous(&self) {
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    dir = %self.cache_dir.display(),
                    %e,
                    "Failed to scan cache directory for eviction"
                );
                return;
            }
        };

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(name) => name,
                None => continue,
            };
            if !name.starts_with(&self.prefix) {
                continue;
            }
            if let Err(e) = fs::remove_file(entry.path()) {
                tracing::warn!(file = name, %e, "Failed to evict previous result");
            } else {
                tracing::debug!(file = name, "Evicted previous result");
            }
        }
    }

    /// Write PNG bytes under a fresh prefixed name and return the full path.
    pub fn store_png(&self, bytes: &[u8]) -> Result<PathBuf, ProcessError> {
        let name = format!("{}{}.png", self.prefix, Uuid::new_v4());
        let path = self.cache_dir.join(name);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Directory outputs are written into.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}
