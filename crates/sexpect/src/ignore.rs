// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Attribute suppression keyed by tag.
//!
//! Some attributes are noise for comparison purposes. For example, in
//! `[:cmd, "rm -rf /", {echo: true, timing: true, event: "foo"}]` the `:event`
//! attribute is dropped before matching, so a pattern only needs to spell out
//! `{echo: true, timing: true}`.
//!
//! Tables can be loaded from TOML:
//!
//! ```toml
//! [ignore]
//! cmd = ["event"]
//! ```

use crate::sexp::{Sexp, ATTRS_INDEX};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading an ignore table
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// On-disk form of an ignore table
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    /// Tag name to attribute keys dropped before comparison
    #[serde(default)]
    pub ignore: BTreeMap<String, Vec<String>>,
}

/// Tag-keyed set of attribute keys that are never compared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreTable {
    keys: BTreeMap<String, BTreeSet<String>>,
}

impl Default for IgnoreTable {
    /// The standard table: `:event` is ignored on `:cmd` nodes.
    fn default() -> Self {
        Self::empty().with("cmd", ["event"])
    }
}

impl IgnoreTable {
    /// A table that suppresses nothing.
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Add ignored keys for `tag`.
    pub fn with<K: Into<String>>(
        mut self,
        tag: impl Into<String>,
        keys: impl IntoIterator<Item = K>,
    ) -> Self {
        self.keys
            .entry(tag.into())
            .or_default()
            .extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn from_config(config: IgnoreConfig) -> Self {
        config
            .ignore
            .into_iter()
            .fold(Self::empty(), |table, (tag, keys)| table.with(tag, keys))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: IgnoreConfig = toml::from_str(text)?;
        Ok(Self::from_config(config))
    }

    /// Load a table from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Ignored keys for `tag`, if the tag has any.
    pub fn keys_for(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.keys.get(tag)
    }

    /// Whether `tag` has suppressed keys.
    pub fn covers(&self, tag: &str) -> bool {
        self.keys.contains_key(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Return `node` with ignored attribute keys removed.
    ///
    /// Nodes whose tag is not in the table, that have no attrs slot, or whose
    /// attrs slot is not a non-empty map come back borrowed and unchanged.
    /// When removal empties the map, a trailing attrs slot is dropped; an
    /// attrs slot followed by other elements is kept as an empty map so the
    /// remaining positions do not shift.
    pub fn suppress<'a>(&self, node: &'a Sexp) -> Cow<'a, Sexp> {
        let Some(items) = node.as_list() else {
            return Cow::Borrowed(node);
        };
        match self.suppress_items(items) {
            Cow::Borrowed(_) => Cow::Borrowed(node),
            Cow::Owned(items) => Cow::Owned(Sexp::List(items)),
        }
    }

    /// Slice form of [`IgnoreTable::suppress`].
    pub fn suppress_items<'a>(&self, items: &'a [Sexp]) -> Cow<'a, [Sexp]> {
        let Some(ignored) = items
            .first()
            .and_then(Sexp::as_sym)
            .and_then(|tag| self.keys.get(tag))
        else {
            return Cow::Borrowed(items);
        };
        let Some(Sexp::Map(attrs)) = items.get(ATTRS_INDEX) else {
            return Cow::Borrowed(items);
        };
        if !attrs.keys().any(|key| ignored.contains(key)) {
            return Cow::Borrowed(items);
        }

        let kept: BTreeMap<String, Sexp> = attrs
            .iter()
            .filter(|(key, _)| !ignored.contains(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        tracing::trace!(
            tag = ?items.first(),
            dropped = attrs.len() - kept.len(),
            "suppressed attributes"
        );

        let mut out = items.to_vec();
        if kept.is_empty() && out.len() == ATTRS_INDEX + 1 {
            out.truncate(ATTRS_INDEX);
        } else {
            out[ATTRS_INDEX] = Sexp::Map(kept);
        }
        Cow::Owned(out)
    }
}

#[cfg(test)]
#[path = "ignore_tests.rs"]
mod tests;
