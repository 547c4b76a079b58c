// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Example identity and file naming.

use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// Static regex for runs of uppercase letters in a type name
static UPPER_RUN_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[A-Z]+").ok());

/// What kind of subject produced the script
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExampleKind {
    /// An addon contributing a script fragment
    #[default]
    Addon,
    /// A complete build script
    Build,
}

impl ExampleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExampleKind::Addon => "addon",
            ExampleKind::Build => "build",
        }
    }
}

impl fmt::Display for ExampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one stored example.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExampleKey {
    pub kind: ExampleKind,
    /// Type name of the subject, e.g. `addons::AptPackages`
    pub subject: String,
    /// Optional case label, e.g. `"with retries"`
    pub name: Option<String>,
    /// Integration examples carry an extra marker line
    pub integration: bool,
}

impl ExampleKey {
    pub fn new(kind: ExampleKind, subject: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            name: None,
            integration: false,
        }
    }

    /// Key for the subject type `T`.
    pub fn for_type<T: ?Sized>(kind: ExampleKind) -> Self {
        Self::new(kind, std::any::type_name::<T>())
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn integration(mut self, integration: bool) -> Self {
        self.integration = integration;
        self
    }

    /// File name: `<kind>-<const_name>[-<name>][-integration].bash.txt`.
    pub fn file_name(&self) -> String {
        let mut parts = vec![const_name(&self.subject)];
        parts.extend(self.name.clone());
        if self.integration {
            parts.push("integration".to_string());
        }
        format!("{}-{}.bash.txt", self.kind, parts.join("-").replace(' ', "_"))
    }
}

/// Snake-case the last path segment of a type name.
///
/// Generic arguments are ignored and every run of uppercase letters starts a
/// new word, so `addons::AptPackages` becomes `apt_packages` and `JDK`
/// becomes `jdk`.
pub fn const_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let last = base.rsplit("::").next().unwrap_or(base);
    let marked = match UPPER_RUN_REGEX.as_ref() {
        Some(re) => re.replace_all(last, "_$0"),
        None => Cow::Borrowed(last),
    };
    marked.strip_prefix('_').unwrap_or(&*marked).to_lowercase()
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
