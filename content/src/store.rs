//! File persistence for the landing page document and the A/B test list.
//!
//! Two files, each read and written whole:
//!
//! ```text
//! data/landing-page.json   LandingPageContent
//! data/ab-tests.json       [AbTest, ...]
//! ```
//!
//! Reads never fail: a missing or unparseable file yields the defaults, and
//! a readable file missing a top-level section gets the default section.
//! Writes go through a `.tmp` sibling and a rename. There is no locking, so
//! two concurrent writers race and the last rename wins.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ab_test::AbTest;
use crate::defaults::default_content;
use crate::model::LandingPageContent;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Read and parse a JSON file, `None` (with a log line) on any failure.
fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file not found, using defaults");
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to read file, using defaults: {e}");
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to parse file, using defaults: {e}");
            None
        }
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path`.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json.as_bytes())?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Store for the landing page document.
#[derive(Debug, Clone)]
pub struct ContentStore {
    path: PathBuf,
}

impl ContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document, or the hardcoded defaults if the file can't be used.
    pub fn read(&self) -> LandingPageContent {
        read_json(&self.path).unwrap_or_else(default_content)
    }

    /// Stamp `metadata.lastUpdated` and overwrite the file with `doc`.
    pub fn write(&self, doc: &mut LandingPageContent) -> Result<(), StoreError> {
        doc.metadata.last_updated = Some(Utc::now());
        write_json(&self.path, doc)?;
        tracing::info!(path = %self.path.display(), "landing page content saved");
        Ok(())
    }
}

/// Store for the A/B test list.
#[derive(Debug, Clone)]
pub struct AbTestStore {
    path: PathBuf,
}

impl AbTestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tests, empty if the file is missing or unreadable.
    pub fn list(&self) -> Vec<AbTest> {
        read_json(&self.path).unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<AbTest> {
        self.list().into_iter().find(|t| t.id == id)
    }

    /// Overwrite the file with `tests`.
    pub fn save_all(&self, tests: &[AbTest]) -> Result<(), StoreError> {
        write_json(&self.path, tests)
    }
}
