// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command line front end for sexpect.
//!
//! Trees and patterns are read from JSON files; examples are stored under
//! `<root>/examples/`.

pub mod commands;
pub mod logging;

pub use commands::Outcome;
