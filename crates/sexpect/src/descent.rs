// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Closed table of block-structured tags a containment search may enter.
//!
//! Only these slots hold searchable commands. Other slots, such as raw option
//! values, are never interpreted as sub-trees.

/// Where a containment search continues inside a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descent {
    /// The single child at this index
    Child(usize),
    /// All elements from this index on, searched as a flat sequence
    Rest(usize),
}

const DESCENT_TABLE: &[(&str, Descent)] = &[
    ("script", Descent::Child(1)),
    ("cmds", Descent::Child(1)),
    ("then", Descent::Child(1)),
    ("else", Descent::Child(1)),
    ("fold", Descent::Child(2)),
    ("if", Descent::Rest(2)),
    ("elif", Descent::Rest(2)),
];

impl Descent {
    /// Look up the descent rule for `tag`; `None` ends the search at that node.
    pub fn for_tag(tag: &str) -> Option<Descent> {
        DESCENT_TABLE
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, descent)| *descent)
    }

    /// Tags with a descent rule, in table order.
    pub fn tags() -> impl Iterator<Item = &'static str> {
        DESCENT_TABLE.iter().map(|(name, _)| *name)
    }
}
