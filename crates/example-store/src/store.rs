// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Writing and comparing stored examples.

use crate::key::ExampleKey;
use similar::TextDiff;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the store root holding examples
pub const EXAMPLES_DIR: &str = "examples";

/// Trailer appended to integration examples
pub const INTEGRATION_MARKER: &str = "\n\n# TRAVIS-BUILD INTEGRATION EXAMPLE MAGIC COMMENT\n";

/// Errors that can occur when storing or reading examples
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create example directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write example '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read example '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of comparing generated code with its stored example
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    Match,
    /// No example has been stored yet
    Missing,
    /// Unified diff from stored to actual
    Differs { diff: String },
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::Match)
    }
}

/// Example files rooted at a project directory.
#[derive(Clone, Debug)]
pub struct ExampleStore {
    root: PathBuf,
}

impl ExampleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn examples_dir(&self) -> PathBuf {
        self.root.join(EXAMPLES_DIR)
    }

    pub fn path_for(&self, key: &ExampleKey) -> PathBuf {
        self.examples_dir().join(key.file_name())
    }

    /// Write `code` as the example for `key`, replacing any previous content.
    pub fn store(&self, key: &ExampleKey, code: &str) -> Result<PathBuf, StoreError> {
        let dir = self.examples_dir();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = self.path_for(key);
        let mut content = code.to_string();
        if key.integration {
            content.push_str(INTEGRATION_MARKER);
        }
        std::fs::write(&path, content).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = code.len(), "stored example");
        Ok(path)
    }

    /// Read the stored example for `key` without its integration marker.
    ///
    /// Returns `Ok(None)` when nothing has been stored.
    pub fn load(&self, key: &ExampleKey) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        if key.integration {
            if let Some(code) = content.strip_suffix(INTEGRATION_MARKER) {
                return Ok(Some(code.to_string()));
            }
        }
        Ok(Some(content))
    }

    /// Compare `actual` against the stored example for `key`.
    pub fn compare(&self, key: &ExampleKey, actual: &str) -> Result<Comparison, StoreError> {
        let Some(expected) = self.load(key)? else {
            tracing::debug!(example = %key.file_name(), "no stored example");
            return Ok(Comparison::Missing);
        };
        if expected == actual {
            return Ok(Comparison::Match);
        }

        let file_name = key.file_name();
        let diff = TextDiff::from_lines(expected.as_str(), actual)
            .unified_diff()
            .context_radius(3)
            .header(&file_name, "actual")
            .to_string();
        Ok(Comparison::Differs { diff })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
