// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use serde_json::json;

// =========================================================================
// Validation Tests
// =========================================================================

#[test]
fn test_empty_pattern_rejected() {
    assert!(matches!(Pattern::new(vec![]), Err(PatternError::Empty)));
}

#[test]
fn test_pattern_requires_tag() {
    let err = Pattern::new(vec![Item::Exact(Sexp::from("cmd"))]).unwrap_err();
    assert!(matches!(err, PatternError::MissingTag(ref found) if found == "\"cmd\""));
}

#[test]
fn test_wildcard_only_in_attrs_slot() {
    let err = Pattern::new(vec![Sexp::sym("cmd").into(), Item::AnyAttrs]).unwrap_err();
    assert!(matches!(err, PatternError::MisplacedWildcard(1)));

    let ok = Pattern::new(vec![
        Sexp::sym("cmd").into(),
        Sexp::from("ls").into(),
        Item::AnyAttrs,
    ]);
    assert!(ok.is_ok());
}

#[test]
fn test_invalid_regex_surfaces_from_build() {
    let err = Pattern::builder("cmd").payload_regex("(unclosed").build().unwrap_err();
    assert!(matches!(err, PatternError::Regex(_)));
}

// =========================================================================
// Builder Tests
// =========================================================================

#[test]
fn test_builder_shape() {
    let pattern = Pattern::builder("cmd")
        .payload("rm -rf /")
        .attrs(Sexp::map([("echo", Sexp::Bool(true))]))
        .build()
        .unwrap();
    assert_eq!(pattern.tag(), "cmd");
    assert_eq!(pattern.len(), 3);
    assert!(!pattern.is_empty());
    assert_eq!(
        pattern.exact_attrs(),
        Some(&Sexp::map([("echo", Sexp::Bool(true))]))
    );
}

#[test]
fn test_literal_only_without_regex_or_wildcard() {
    let exact = Pattern::builder("cmd").payload("ls").build().unwrap();
    assert_eq!(
        exact.literal(),
        Some(&Sexp::node("cmd", [Sexp::from("ls")]))
    );

    let regex = Pattern::builder("cmd").payload_regex("ls").build().unwrap();
    assert_eq!(regex.literal(), None);

    let wildcard = Pattern::builder("cmd").payload("ls").any_attrs().build().unwrap();
    assert_eq!(wildcard.literal(), None);
    assert_eq!(wildcard.exact_attrs(), None);
}

#[test]
fn test_from_sexp_uses_node_verbatim() {
    let node = Sexp::node("echo", [Sexp::from("hello")]);
    let pattern = Pattern::from_sexp(node.clone()).unwrap();
    assert_eq!(pattern.literal(), Some(&node));

    let err = Pattern::from_sexp(Sexp::from("echo")).unwrap_err();
    assert!(matches!(err, PatternError::NotAList(_)));
}

// =========================================================================
// JSON Tests
// =========================================================================

#[test]
fn test_json_regex_item() {
    let pattern = Pattern::from_json(json!(["cmd", {"$regex": "rm -rf"}])).unwrap();
    assert!(matches!(pattern.items()[1], Item::Regex(ref re) if re.as_str() == "rm -rf"));
}

#[test]
fn test_json_wildcard_forms() {
    let marker = Pattern::from_json(json!(["cmd", "ls", "$any_options"])).unwrap();
    let object = Pattern::from_json(json!(["cmd", "ls", {"$any": true}])).unwrap();
    assert_eq!(marker, object);
    assert_eq!(marker.items()[2], Item::AnyAttrs);
}

#[test]
fn test_json_regex_must_be_string() {
    let err = Pattern::from_json(json!(["cmd", {"$regex": 3}])).unwrap_err();
    assert!(matches!(err, PatternError::Marker(_)));
}

#[test]
fn test_json_plain_object_is_attrs() {
    let pattern = Pattern::from_json(json!(["cmd", "ls", {"echo": true}])).unwrap();
    assert_eq!(
        pattern.exact_attrs(),
        Some(&Sexp::map([("echo", Sexp::Bool(true))]))
    );
}

#[test]
fn test_json_must_be_array() {
    let err = Pattern::from_json_str(r#""cmd""#).unwrap_err();
    assert!(matches!(err, PatternError::NotAList(_)));
}

// =========================================================================
// Display Tests
// =========================================================================

#[test]
fn test_display_marks_regex_and_wildcard() {
    let pattern = Pattern::builder("cmd")
        .payload_regex("^make")
        .any_attrs()
        .build()
        .unwrap();
    assert_eq!(pattern.to_string(), "[:cmd, /^make/, :any_options]");
}
