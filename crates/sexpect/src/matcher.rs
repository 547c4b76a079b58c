// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural matching of patterns against script trees.
//!
//! The two traversals differ in reach:
//! - [`Matcher::contains`] only enters the slots listed in the descent table
//! - [`Matcher::filter_all`] scans every list in the tree
//!
//! A pattern nested inside an unlisted tag is therefore found by `filter_all`
//! but not by `contains`.
//!
//! The query methods never fail: a pattern that cannot go through attribute
//! suppression (a non-map attrs slot on a tag with ignored keys) simply does
//! not match. [`Matcher::check`] reports such patterns as
//! [`MatchError::AttrsNotMap`], and the `expect_*` helpers run it first.

use crate::descent::Descent;
use crate::ignore::IgnoreTable;
use crate::pattern::{Item, Pattern};
use crate::sexp::{Sexp, ATTRS_INDEX};
use thiserror::Error;

/// Errors reported by the assertion helpers
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("expected {tree} to include {pattern}")]
    NotFound { pattern: String, tree: String },

    #[error("no node matches {pattern} (step {step} of the path) in {tree}")]
    PathNotFound {
        pattern: String,
        step: usize,
        tree: String,
    },

    #[error("attrs of a :{tag} pattern must be a map, found {found}")]
    AttrsNotMap { tag: String, found: String },
}

/// Pattern matcher configured with an attribute ignore table.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    ignore: IgnoreTable,
}

impl Matcher {
    pub fn new(ignore: IgnoreTable) -> Self {
        Self { ignore }
    }

    pub fn ignore_table(&self) -> &IgnoreTable {
        &self.ignore
    }

    /// Check whether the leading `pattern.len()` elements of `candidate`
    /// match `pattern`, after suppressing ignored attributes.
    ///
    /// The candidate is never modified; suppression works on a copy. The
    /// pattern is not validated here; run [`Matcher::check`] on patterns
    /// from untrusted sources.
    pub fn matches(&self, candidate: &Sexp, pattern: &Pattern) -> bool {
        candidate
            .as_list()
            .is_some_and(|items| self.matches_items(items, pattern))
    }

    fn matches_items(&self, items: &[Sexp], pattern: &Pattern) -> bool {
        match items.first() {
            Some(Sexp::Sym(tag)) if tag == pattern.tag() => {}
            _ => return false,
        }
        let items = self.ignore.suppress_items(items);
        pattern
            .items()
            .iter()
            .enumerate()
            .skip(1)
            .all(|(index, item)| item_matches(item, items.get(index), index))
    }

    /// Check whether `pattern` occurs in `candidate`.
    ///
    /// True when the candidate itself matches, when a literal pattern is a
    /// direct element of the candidate, or when a descendant reachable through
    /// the descent table matches. Groups are searched sibling by sibling.
    pub fn contains(&self, candidate: &Sexp, pattern: &Pattern) -> bool {
        candidate
            .as_list()
            .is_some_and(|items| self.contains_items(items, pattern))
    }

    fn contains_items(&self, items: &[Sexp], pattern: &Pattern) -> bool {
        if self.matches_items(items, pattern) {
            return true;
        }
        if pattern
            .literal()
            .is_some_and(|literal| items.contains(literal))
        {
            return true;
        }

        match items.first() {
            Some(Sexp::List(_)) => items.iter().any(|item| self.contains(item, pattern)),
            Some(Sexp::Sym(tag)) => match Descent::for_tag(tag) {
                Some(Descent::Child(index)) => {
                    tracing::trace!(tag = %tag, index, "descending into child");
                    items
                        .get(index)
                        .is_some_and(|child| self.contains(child, pattern))
                }
                Some(Descent::Rest(index)) => {
                    tracing::trace!(tag = %tag, index, "descending into trailing elements");
                    items
                        .get(index..)
                        .is_some_and(|rest| self.contains_items(rest, pattern))
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Follow `patterns` left to right, each time taking the first node (in
    /// pre-order) matching the next pattern inside the previous result.
    ///
    /// Returns `None` when any step finds nothing, and for an empty path.
    pub fn find_path<'a>(&self, candidate: &'a Sexp, patterns: &[Pattern]) -> Option<&'a Sexp> {
        let (first, rest) = patterns.split_first()?;
        rest.iter()
            .try_fold(self.first_match(candidate, first)?, |node, pattern| {
                self.first_match(node, pattern)
            })
    }

    /// Collect every list in `candidate` whose prefix matches `pattern`, in
    /// pre-order. Unlike [`Matcher::contains`], this scans the whole tree.
    pub fn filter_all<'a>(&self, candidate: &'a Sexp, pattern: &Pattern) -> Vec<&'a Sexp> {
        let mut out = Vec::new();
        self.filter_into(candidate, pattern, &mut out);
        out
    }

    /// Accumulating form of [`Matcher::filter_all`]; matches are appended to
    /// `out`, so one vector can collect across several trees or patterns.
    pub fn filter_into<'a>(&self, candidate: &'a Sexp, pattern: &Pattern, out: &mut Vec<&'a Sexp>) {
        let Some(items) = candidate.as_list() else {
            return;
        };
        if self.matches_items(items, pattern) {
            out.push(candidate);
        }
        for item in items {
            self.filter_into(item, pattern, out);
        }
    }

    fn first_match<'a>(&self, candidate: &'a Sexp, pattern: &Pattern) -> Option<&'a Sexp> {
        let items = candidate.as_list()?;
        if self.matches_items(items, pattern) {
            return Some(candidate);
        }
        items
            .iter()
            .find_map(|item| self.first_match(item, pattern))
    }

    /// Reject patterns whose attrs can never go through suppression: a tag
    /// with ignored keys must carry a map (or the wildcard) in its attrs slot.
    pub fn check(&self, pattern: &Pattern) -> Result<(), MatchError> {
        if !self.ignore.covers(pattern.tag()) {
            return Ok(());
        }
        match pattern.exact_attrs() {
            None | Some(Sexp::Map(_)) => Ok(()),
            Some(other) => Err(MatchError::AttrsNotMap {
                tag: pattern.tag().to_string(),
                found: other.to_string(),
            }),
        }
    }

    /// Assert that `pattern` occurs in `candidate`.
    pub fn expect_contains(&self, candidate: &Sexp, pattern: &Pattern) -> Result<(), MatchError> {
        self.check(pattern)?;
        if self.contains(candidate, pattern) {
            return Ok(());
        }
        Err(MatchError::NotFound {
            pattern: pattern.to_string(),
            tree: candidate.to_string(),
        })
    }

    /// Assert that `patterns` lead to a node and return it.
    pub fn expect_path<'a>(
        &self,
        candidate: &'a Sexp,
        patterns: &[Pattern],
    ) -> Result<&'a Sexp, MatchError> {
        for pattern in patterns {
            self.check(pattern)?;
        }
        if patterns.is_empty() {
            return Err(MatchError::PathNotFound {
                pattern: "[]".to_string(),
                step: 0,
                tree: candidate.to_string(),
            });
        }

        let mut node = candidate;
        for (step, pattern) in patterns.iter().enumerate() {
            node = self
                .first_match(node, pattern)
                .ok_or_else(|| MatchError::PathNotFound {
                    pattern: pattern.to_string(),
                    step,
                    tree: candidate.to_string(),
                })?;
        }
        tracing::debug!(depth = patterns.len(), node = %node, "path resolved");
        Ok(node)
    }
}

fn item_matches(item: &Item, element: Option<&Sexp>, index: usize) -> bool {
    match (item, element) {
        (Item::AnyAttrs, _) => true,
        (Item::Regex(re), Some(Sexp::Str(s))) => re.is_match(s),
        (Item::Regex(_), _) => false,
        (Item::Exact(expected), actual) if index == ATTRS_INDEX => attrs_eq(expected, actual),
        (Item::Exact(expected), Some(actual)) => expected == actual,
        (Item::Exact(_), None) => false,
    }
}

/// An absent attrs slot and an empty map are equivalent.
fn attrs_eq(expected: &Sexp, actual: Option<&Sexp>) -> bool {
    match (expected, actual) {
        (expected, Some(actual)) if expected == actual => true,
        (Sexp::Map(map), None) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
