// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand implementations.

use anyhow::{Context, Result};
use sexpect::{IgnoreTable, Matcher, Pattern, Sexp};
use sexpect_example_store::{Comparison, ExampleKey, ExampleStore};
use std::path::{Path, PathBuf};

/// What a command printed and whether it succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }

    fn fail(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: false,
        }
    }
}

/// Build a matcher from an optional ignore table file.
pub fn matcher(config: Option<&Path>) -> Result<Matcher> {
    match config {
        Some(path) => Ok(Matcher::new(IgnoreTable::load(path)?)),
        None => Ok(Matcher::default()),
    }
}

pub async fn read_tree(path: &Path) -> Result<Sexp> {
    let text = read(path).await?;
    Sexp::from_json_str(&text).with_context(|| format!("Invalid tree in '{}'", path.display()))
}

pub async fn read_pattern(path: &Path) -> Result<Pattern> {
    let text = read(path).await?;
    Pattern::from_json_str(&text)
        .with_context(|| format!("Invalid pattern in '{}'", path.display()))
}

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))
}

/// Print `true` when the pattern occurs in the tree.
pub async fn contains(matcher: &Matcher, tree: &Path, pattern: &Path) -> Result<Outcome> {
    let tree = read_tree(tree).await?;
    let pattern = read_pattern(pattern).await?;
    matcher.check(&pattern)?;

    let found = matcher.contains(&tree, &pattern);
    tracing::debug!(pattern = %pattern, found, "contains");
    Ok(Outcome {
        output: found.to_string(),
        success: found,
    })
}

/// Print every node matching the pattern, one per line.
pub async fn filter(matcher: &Matcher, tree: &Path, pattern: &Path) -> Result<Outcome> {
    let tree = read_tree(tree).await?;
    let pattern = read_pattern(pattern).await?;
    matcher.check(&pattern)?;

    let found = matcher.filter_all(&tree, &pattern);
    tracing::debug!(pattern = %pattern, count = found.len(), "filter");
    let output = found
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Outcome {
        success: !found.is_empty(),
        output,
    })
}

/// Print the node at the end of a path of patterns.
pub async fn find(matcher: &Matcher, tree: &Path, patterns: &[PathBuf]) -> Result<Outcome> {
    let tree = read_tree(tree).await?;
    let mut path = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let pattern = read_pattern(pattern).await?;
        matcher.check(&pattern)?;
        path.push(pattern);
    }

    Ok(match matcher.find_path(&tree, &path) {
        Some(node) => Outcome::ok(node.to_string()),
        None => Outcome::fail(""),
    })
}

/// Print where the example for `key` lives.
pub fn example_path(store: &ExampleStore, key: &ExampleKey) -> Outcome {
    Outcome::ok(store.path_for(key).display().to_string())
}

/// Record the script in `code` as the example for `key`.
pub async fn store(store: &ExampleStore, key: &ExampleKey, code: &Path) -> Result<Outcome> {
    let code = read(code).await?;
    let path = store.store(key, &code)?;
    Ok(Outcome::ok(path.display().to_string()))
}

/// Compare the script in `actual` with the stored example for `key`.
pub async fn diff(store: &ExampleStore, key: &ExampleKey, actual: &Path) -> Result<Outcome> {
    let actual = read(actual).await?;
    Ok(match store.compare(key, &actual)? {
        Comparison::Match => Outcome::ok(""),
        Comparison::Missing => Outcome::fail(format!(
            "no stored example at {}",
            store.path_for(key).display()
        )),
        Comparison::Differs { diff } => Outcome::fail(diff),
    })
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
