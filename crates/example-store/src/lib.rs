// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical example recording for generated build scripts.
//!
//! Test suites write the script they generate for a subject to a
//! deterministically named file under `examples/`, so changes to the
//! generator show up as diffs against the stored baseline.

mod key;
mod store;

pub use key::{const_name, ExampleKey, ExampleKind};
pub use store::{Comparison, ExampleStore, StoreError, EXAMPLES_DIR, INTEGRATION_MARKER};
