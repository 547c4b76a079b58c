// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Nested-list values describing generated build scripts.
//!
//! A script is a tree of nodes such as:
//!
//! ```text
//! [:script, [[:cmd, "rm -rf /", {echo: true, event: "foo"}],
//!            [:fold, "install", [:cmds, [[:cmd, "make"]]]]]]
//! ```
//!
//! A *node* is a list whose first element is a symbol (the tag). Index 1 holds
//! the payload and index 2, when present, the attribute map. A *group* is a
//! list whose first element is itself a list.
//!
//! In JSON, the head string of an array is its tag and `":name"` is a symbol
//! anywhere. Other symbols are written `{"$sym": "name"}`, and a leading `\`
//! keeps a string literal, so `"\\:noop"` is the string `":noop"`.

use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Position of the payload inside a node.
pub const PAYLOAD_INDEX: usize = 1;
/// Position of the attribute map inside a node.
pub const ATTRS_INDEX: usize = 2;

/// JSON marker object for symbols that cannot be written as `":name"`
const SYM_KEY: &str = "$sym";
/// Leading character marking a JSON string as a literal string
const ESCAPE: char = '\\';

/// Errors that can occur when decoding a tree from JSON
#[derive(Debug, Error)]
pub enum SexpError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported number '{0}': only integers are allowed")]
    Number(String),
}

/// A single value in a script tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sexp {
    /// Symbolic identifier, e.g. a tag such as `:cmd`
    Sym(String),
    /// Literal string
    Str(String),
    Int(i64),
    Bool(bool),
    Nil,
    /// Ordered sequence: a node, a group, or plain data
    List(Vec<Sexp>),
    /// Attribute map keyed by symbol name
    Map(BTreeMap<String, Sexp>),
}

impl Sexp {
    pub fn sym(name: impl Into<String>) -> Self {
        Sexp::Sym(name.into())
    }

    pub fn list(items: impl IntoIterator<Item = Sexp>) -> Self {
        Sexp::List(items.into_iter().collect())
    }

    /// Build a node `[:tag, items...]`.
    pub fn node(tag: impl Into<String>, items: impl IntoIterator<Item = Sexp>) -> Self {
        let mut list = vec![Sexp::Sym(tag.into())];
        list.extend(items);
        Sexp::List(list)
    }

    pub fn map<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Sexp)>) -> Self {
        Sexp::Map(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wrap `body` in a fold block: `[:fold, name, [:cmds, [body]]]`.
    pub fn fold(name: impl Into<String>, body: Sexp) -> Self {
        Sexp::node(
            "fold",
            [
                Sexp::Str(name.into()),
                Sexp::node("cmds", [Sexp::List(vec![body])]),
            ],
        )
    }

    /// Decode a tree from its JSON interchange form.
    pub fn from_json(value: serde_json::Value) -> Result<Self, SexpError> {
        decode(value, false)
    }

    /// Parse a tree from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SexpError> {
        Self::from_json(serde_json::from_str(text)?)
    }

    pub fn as_list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Sexp::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Sexp::Sym(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Sexp>> {
        match self {
            Sexp::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The tag of a node, `None` for groups and non-list values.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_sym()
    }

    pub fn payload(&self) -> Option<&Sexp> {
        self.tag()?;
        self.as_list()?.get(PAYLOAD_INDEX)
    }

    pub fn attrs(&self) -> Option<&BTreeMap<String, Sexp>> {
        self.tag()?;
        self.as_list()?.get(ATTRS_INDEX)?.as_map()
    }

    /// True for a list whose first element is itself a list.
    pub fn is_group(&self) -> bool {
        matches!(
            self.as_list().and_then(|items| items.first()),
            Some(Sexp::List(_))
        )
    }
}

impl From<&str> for Sexp {
    fn from(s: &str) -> Self {
        Sexp::Str(s.to_string())
    }
}

impl From<String> for Sexp {
    fn from(s: String) -> Self {
        Sexp::Str(s)
    }
}

impl From<bool> for Sexp {
    fn from(b: bool) -> Self {
        Sexp::Bool(b)
    }
}

impl From<i64> for Sexp {
    fn from(n: i64) -> Self {
        Sexp::Int(n)
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(items: Vec<Sexp>) -> Self {
        Sexp::List(items)
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Sym(s) => write!(f, ":{}", s),
            Sexp::Str(s) => write!(f, "{:?}", s),
            Sexp::Int(n) => write!(f, "{}", n),
            Sexp::Bool(b) => write!(f, "{}", b),
            Sexp::Nil => f.write_str("nil"),
            Sexp::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Sexp::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Decode one JSON value. `head` is true for the first element of an array,
/// where a bare string names the node's tag.
pub(crate) fn decode(value: serde_json::Value, head: bool) -> Result<Sexp, SexpError> {
    use serde_json::Value;

    Ok(match value {
        Value::Null => Sexp::Nil,
        Value::Bool(b) => Sexp::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Sexp::Int(i),
            None => return Err(SexpError::Number(n.to_string())),
        },
        Value::String(s) => decode_str(s, head),
        Value::Array(items) => Sexp::List(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| decode(item, i == 0))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => match map.get(SYM_KEY) {
            Some(Value::String(name)) if map.len() == 1 => Sexp::Sym(name.clone()),
            _ => Sexp::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((symbol_key(k), decode(v, false)?)))
                    .collect::<Result<_, SexpError>>()?,
            ),
        },
    })
}

/// Decode a JSON string.
///
/// A leading `\` marks a literal string and is dropped. Otherwise `:name`
/// is a symbol when `name` is a symbol name, a head string is a tag, and
/// anything else (including shell text such as `": > build.log"`) is a string.
pub(crate) fn decode_str(s: String, head: bool) -> Sexp {
    if let Some(literal) = s.strip_prefix(ESCAPE) {
        return Sexp::Str(literal.to_string());
    }
    if let Some(name) = s.strip_prefix(':').filter(|name| is_symbol_name(name)) {
        return Sexp::Sym(name.to_string());
    }
    if head {
        Sexp::Sym(s)
    } else {
        Sexp::Str(s)
    }
}

/// An ASCII letter or `_`, then letters, digits, `_`, `?` or `!`.
fn is_symbol_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '?' | '!'))
}

fn symbol_key(key: String) -> String {
    key.strip_prefix(':').map(str::to_string).unwrap_or(key)
}

/// Encode a string so that [`decode_str`] reads it back as a string.
fn encode_str(s: &str, head: bool) -> Cow<'_, str> {
    let ambiguous = head
        || s.starts_with(ESCAPE)
        || s.strip_prefix(':').is_some_and(is_symbol_name);
    if ambiguous {
        Cow::Owned(format!("{}{}", ESCAPE, s))
    } else {
        Cow::Borrowed(s)
    }
}

/// A value together with its position, since strings encode differently at
/// the head of a list.
struct Element<'a> {
    value: &'a Sexp,
    head: bool,
}

impl Serialize for Element<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Sexp::Sym(name) if is_symbol_name(name) => {
                serializer.serialize_str(&format!(":{}", name))
            }
            Sexp::Sym(name) => {
                let mut out = serializer.serialize_map(Some(1))?;
                out.serialize_entry(SYM_KEY, name)?;
                out.end()
            }
            Sexp::Str(s) => serializer.serialize_str(&encode_str(s, self.head)),
            Sexp::Int(n) => serializer.serialize_i64(*n),
            Sexp::Bool(b) => serializer.serialize_bool(*b),
            Sexp::Nil => serializer.serialize_unit(),
            Sexp::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for (i, value) in items.iter().enumerate() {
                    seq.serialize_element(&Element { value, head: i == 0 })?;
                }
                seq.end()
            }
            Sexp::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, &Element { value, head: false })?;
                }
                out.end()
            }
        }
    }
}

impl Serialize for Sexp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Element {
            value: self,
            head: false,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sexp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Sexp::from_json(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[path = "sexp_tests.rs"]
mod tests;
