// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural matching over generated build-script S-expressions.
//!
//! Script generators describe their output as nested lists such as
//! `[:cmd, "rm -rf /", {echo: true}]`. This crate answers the questions test
//! suites ask about such trees: does a pattern occur, which node sits at the
//! end of a path of patterns, and which nodes match anywhere.
//!
//! ```
//! use sexpect::{Pattern, Sexp};
//!
//! let tree = Sexp::from_json_str(r#"["script", [["cmd", "rm -rf /tmp", {"echo": true}]]]"#)?;
//! let pattern = Pattern::builder("cmd").payload_regex("rm -rf").build()?;
//! assert!(sexpect::contains(&tree, &pattern));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The free functions answer `false` or nothing for malformed patterns. Use
//! [`Matcher::check`] or the `expect_*` helpers to have them reported.

mod descent;
mod ignore;
mod matcher;
mod pattern;
mod sexp;

pub use descent::Descent;
pub use ignore::{ConfigError, IgnoreConfig, IgnoreTable};
pub use matcher::{MatchError, Matcher};
pub use pattern::{Item, Pattern, PatternBuilder, PatternError, ANY_OPTIONS};
pub use sexp::{Sexp, SexpError, ATTRS_INDEX, PAYLOAD_INDEX};

use std::sync::OnceLock;

/// Matcher with the standard ignore table.
pub fn default_matcher() -> &'static Matcher {
    static MATCHER: OnceLock<Matcher> = OnceLock::new();
    MATCHER.get_or_init(Matcher::default)
}

/// [`Matcher::matches`] with the standard ignore table.
pub fn matches(candidate: &Sexp, pattern: &Pattern) -> bool {
    default_matcher().matches(candidate, pattern)
}

/// [`Matcher::contains`] with the standard ignore table.
pub fn contains(candidate: &Sexp, pattern: &Pattern) -> bool {
    default_matcher().contains(candidate, pattern)
}

/// [`Matcher::find_path`] with the standard ignore table.
pub fn find_path<'a>(candidate: &'a Sexp, patterns: &[Pattern]) -> Option<&'a Sexp> {
    default_matcher().find_path(candidate, patterns)
}

/// [`Matcher::filter_all`] with the standard ignore table.
pub fn filter_all<'a>(candidate: &'a Sexp, pattern: &Pattern) -> Vec<&'a Sexp> {
    default_matcher().filter_all(candidate, pattern)
}
