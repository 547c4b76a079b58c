// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Match patterns over script nodes.
//!
//! A pattern has the same shape as a node, with two extensions:
//! - the attrs slot may be a wildcard (`:any_options`) accepting any attributes
//! - any element after the tag may be a regex, searched in a string element
//!
//! JSON patterns use the tree encoding plus `{"$regex": "..."}` for regex
//! items and `"$any_options"` (or `{"$any": true}`) for the wildcard.

use crate::sexp::{self, Sexp, SexpError, ATTRS_INDEX};
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// JSON marker for the wildcard attrs item.
pub const ANY_OPTIONS: &str = "$any_options";
const REGEX_KEY: &str = "$regex";
const ANY_KEY: &str = "$any";

/// Errors that can occur when building a pattern
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Pattern is empty")]
    Empty,

    #[error("Pattern must start with a tag symbol, found {0}")]
    MissingTag(String),

    #[error("Wildcard attrs are only allowed in the attrs slot, found at index {0}")]
    MisplacedWildcard(usize),

    #[error("Pattern must be a JSON array, found {0}")]
    NotAList(String),

    #[error("Invalid marker object: {0}")]
    Marker(String),

    #[error("Invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sexp(#[from] SexpError),
}

/// One element of a pattern.
#[derive(Clone, Debug)]
pub enum Item {
    /// Must equal the candidate element
    Exact(Sexp),
    /// Searched in a string candidate element
    Regex(Regex),
    /// Accepts any attrs slot, including an absent one
    AnyAttrs,
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::Exact(a), Item::Exact(b)) => a == b,
            (Item::Regex(a), Item::Regex(b)) => a.as_str() == b.as_str(),
            (Item::AnyAttrs, Item::AnyAttrs) => true,
            _ => false,
        }
    }
}

impl From<Sexp> for Item {
    fn from(value: Sexp) -> Self {
        Item::Exact(value)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Exact(value) => write!(f, "{}", value),
            Item::Regex(re) => write!(f, "/{}/", re.as_str()),
            Item::AnyAttrs => f.write_str(":any_options"),
        }
    }
}

/// A validated pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    items: Vec<Item>,
    /// Set when every item is exact, for direct membership checks
    literal: Option<Sexp>,
}

impl Pattern {
    /// Validate and build a pattern from its items.
    pub fn new(items: Vec<Item>) -> Result<Self, PatternError> {
        match items.first() {
            None => return Err(PatternError::Empty),
            Some(Item::Exact(Sexp::Sym(_))) => {}
            Some(other) => return Err(PatternError::MissingTag(other.to_string())),
        }
        if let Some(index) = items
            .iter()
            .position(|item| matches!(item, Item::AnyAttrs))
            .filter(|&index| index != ATTRS_INDEX)
        {
            return Err(PatternError::MisplacedWildcard(index));
        }

        let literal = items
            .iter()
            .map(|item| match item {
                Item::Exact(value) => Some(value.clone()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Sexp::List);

        Ok(Self { items, literal })
    }

    /// Start building a pattern for `tag`.
    pub fn builder(tag: impl Into<String>) -> PatternBuilder {
        PatternBuilder {
            items: vec![Item::Exact(Sexp::Sym(tag.into()))],
            error: None,
        }
    }

    /// Use a literal node as a pattern.
    pub fn from_sexp(node: Sexp) -> Result<Self, PatternError> {
        match node {
            Sexp::List(items) => Self::new(items.into_iter().map(Item::Exact).collect()),
            other => Err(PatternError::NotAList(other.to_string())),
        }
    }

    /// Decode a pattern from JSON.
    pub fn from_json(value: serde_json::Value) -> Result<Self, PatternError> {
        let serde_json::Value::Array(elements) = value else {
            return Err(PatternError::NotAList(value.to_string()));
        };
        let items = elements
            .into_iter()
            .enumerate()
            .map(|(i, element)| decode_item(element, i == 0))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(items)
    }

    /// Parse a pattern from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, PatternError> {
        Self::from_json(serde_json::from_str(text)?)
    }

    pub fn tag(&self) -> &str {
        match self.items.first() {
            Some(Item::Exact(Sexp::Sym(tag))) => tag,
            _ => "",
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of leading candidate elements this pattern compares.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: construction rejects empty patterns.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The pattern as a plain value, when it has no regex or wildcard items.
    pub fn literal(&self) -> Option<&Sexp> {
        self.literal.as_ref()
    }

    /// The exact attrs item, if any.
    pub fn exact_attrs(&self) -> Option<&Sexp> {
        match self.items.get(ATTRS_INDEX) {
            Some(Item::Exact(value)) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

fn decode_item(element: serde_json::Value, head: bool) -> Result<Item, PatternError> {
    use serde_json::Value;

    match element {
        Value::String(s) if s == ANY_OPTIONS => Ok(Item::AnyAttrs),
        Value::Object(map) if map.len() == 1 && map.contains_key(REGEX_KEY) => {
            match map.get(REGEX_KEY) {
                Some(Value::String(re)) => Ok(Item::Regex(Regex::new(re)?)),
                _ => Err(PatternError::Marker(format!("{} must be a string", REGEX_KEY))),
            }
        }
        Value::Object(map) if map.len() == 1 && map.get(ANY_KEY) == Some(&Value::Bool(true)) => {
            Ok(Item::AnyAttrs)
        }
        Value::String(s) => Ok(Item::Exact(sexp::decode_str(s, head))),
        other => Ok(Item::Exact(sexp::decode(other, head)?)),
    }
}

/// Incremental pattern construction; errors surface from [`PatternBuilder::build`].
#[derive(Debug)]
pub struct PatternBuilder {
    items: Vec<Item>,
    error: Option<PatternError>,
}

impl PatternBuilder {
    pub fn payload(mut self, payload: impl Into<Sexp>) -> Self {
        self.items.push(Item::Exact(payload.into()));
        self
    }

    /// Match the payload by regex search.
    pub fn payload_regex(mut self, re: &str) -> Self {
        match Regex::new(re) {
            Ok(re) => self.items.push(Item::Regex(re)),
            Err(e) => {
                self.error.get_or_insert(PatternError::Regex(e));
            }
        }
        self
    }

    pub fn attrs(mut self, attrs: Sexp) -> Self {
        self.items.push(Item::Exact(attrs));
        self
    }

    pub fn any_attrs(mut self) -> Self {
        self.items.push(Item::AnyAttrs);
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn build(self) -> Result<Pattern, PatternError> {
        match self.error {
            Some(e) => Err(e),
            None => Pattern::new(self.items),
        }
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
