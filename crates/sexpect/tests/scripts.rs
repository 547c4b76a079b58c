// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Assertions over realistic generated scripts, through the public API only.

use sexpect::{MatchError, Pattern, Sexp};

/// A generated build script: an apt addon fold, then install and test steps.
fn build_script() -> Sexp {
    Sexp::node(
        "script",
        [Sexp::list([
            Sexp::fold(
                "apt",
                Sexp::node(
                    "cmd",
                    [
                        Sexp::from("sudo apt-get install -yq libxml2"),
                        Sexp::map([("echo", Sexp::Bool(true)), ("event", Sexp::sym("apt"))]),
                    ],
                ),
            ),
            Sexp::node(
                "if",
                [
                    Sexp::from("-f Makefile"),
                    Sexp::node("then", [Sexp::node("cmd", [Sexp::from("make")])]),
                    Sexp::node(
                        "else",
                        [Sexp::node(
                            "cmd",
                            [
                                Sexp::from("./configure && make"),
                                Sexp::map([("timing", Sexp::Bool(true))]),
                            ],
                        )],
                    ),
                ],
            ),
            Sexp::node(
                "export",
                [Sexp::list([Sexp::from("CC"), Sexp::from("gcc")])],
            ),
        ])],
    )
}

#[test]
fn test_event_attribute_does_not_affect_matching() {
    let tree = build_script();
    let pattern = Pattern::builder("cmd")
        .payload("sudo apt-get install -yq libxml2")
        .attrs(Sexp::map([("echo", Sexp::Bool(true))]))
        .build()
        .unwrap();
    assert!(sexpect::contains(&tree, &pattern));
}

#[test]
fn test_branches_are_searched() {
    let tree = build_script();
    let then = Pattern::builder("cmd").payload("make").build().unwrap();
    let otherwise = Pattern::builder("cmd")
        .payload_regex("configure")
        .any_attrs()
        .build()
        .unwrap();
    assert!(sexpect::contains(&tree, &then));
    assert!(sexpect::contains(&tree, &otherwise));
}

#[test]
fn test_wrong_attrs_not_contained() {
    let tree = build_script();
    let pattern = Pattern::builder("cmd")
        .payload("./configure && make")
        .attrs(Sexp::map([("echo", Sexp::Bool(true))]))
        .build()
        .unwrap();
    assert!(!sexpect::contains(&tree, &pattern));
}

#[test]
fn test_path_through_fold() {
    let tree = build_script();
    let path = [
        Pattern::builder("fold").payload("apt").build().unwrap(),
        Pattern::builder("cmd").build().unwrap(),
    ];
    let node = sexpect::find_path(&tree, &path).unwrap();
    assert_eq!(node.payload(), Some(&Sexp::from("sudo apt-get install -yq libxml2")));
}

#[test]
fn test_filter_all_collects_every_cmd() {
    let tree = build_script();
    let cmds = sexpect::filter_all(&tree, &Pattern::builder("cmd").build().unwrap());
    let payloads: Vec<_> = cmds.iter().filter_map(|node| node.payload()).collect();
    assert_eq!(
        payloads,
        vec![
            &Sexp::from("sudo apt-get install -yq libxml2"),
            &Sexp::from("make"),
            &Sexp::from("./configure && make"),
        ]
    );
}

#[test]
fn test_expect_contains_reports_tree() {
    let tree = build_script();
    let pattern = Pattern::builder("cmd").payload("bundle install").build().unwrap();
    let err = sexpect::default_matcher()
        .expect_contains(&tree, &pattern)
        .unwrap_err();
    assert!(matches!(err, MatchError::NotFound { .. }));
    assert!(err.to_string().contains(r#"[:cmd, "bundle install"]"#));
}
