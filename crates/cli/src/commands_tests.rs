// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use sexpect_example_store::ExampleKind;
use std::fs;
use tempfile::TempDir;

const TREE: &str = r#"["script", [
    ["cmd", "git clone repo", {"echo": true, "event": "checkout"}],
    ["fold", "install", ["cmds", [["cmd", "bundle install"]]]],
    ["raw", ["cmd", "hidden", {"echo": true}]]
]]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_contains_true_and_false() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "tree.json", TREE);
    let found = write(&dir, "found.json", r#"["cmd", "git clone repo", {"echo": true}]"#);
    let hidden = write(&dir, "hidden.json", r#"["cmd", "hidden"]"#);
    let m = Matcher::default();

    let outcome = contains(&m, &tree, &found).await.unwrap();
    assert_eq!(outcome, Outcome::ok("true"));

    let outcome = contains(&m, &tree, &hidden).await.unwrap();
    assert_eq!(outcome, Outcome::fail("false"));
}

#[tokio::test]
async fn test_filter_lists_matches() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "tree.json", TREE);
    let pattern = write(&dir, "cmd.json", r#"["cmd", {"$regex": "i"}]"#);

    let outcome = filter(&Matcher::default(), &tree, &pattern).await.unwrap();
    assert!(outcome.success);
    assert_eq!(
        outcome.output,
        [
            r#"[:cmd, "git clone repo", {echo: true, event: "checkout"}]"#,
            r#"[:cmd, "bundle install"]"#,
            r#"[:cmd, "hidden", {echo: true}]"#,
        ]
        .join("\n")
    );
}

#[tokio::test]
async fn test_find_follows_path() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "tree.json", TREE);
    let fold = write(&dir, "fold.json", r#"["fold", "install"]"#);
    let cmd = write(&dir, "cmd.json", r#"["cmd"]"#);
    let m = Matcher::default();

    let outcome = find(&m, &tree, &[fold.clone(), cmd.clone()]).await.unwrap();
    assert_eq!(outcome, Outcome::ok(r#"[:cmd, "bundle install"]"#));

    let outcome = find(&m, &tree, &[cmd, fold]).await.unwrap();
    assert!(!outcome.success);
}

#[tokio::test]
async fn test_invalid_pattern_is_error() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "tree.json", TREE);
    let bad = write(&dir, "bad.json", r#"["cmd", "ls", "not a map"]"#);

    let err = contains(&Matcher::default(), &tree, &bad).await.unwrap_err();
    assert!(err.to_string().contains("must be a map"));
}

#[tokio::test]
async fn test_missing_tree_names_file() {
    let dir = TempDir::new().unwrap();
    let pattern = write(&dir, "p.json", r#"["cmd"]"#);
    let missing = dir.path().join("missing.json");

    let err = contains(&Matcher::default(), &missing, &pattern)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_matcher_from_config() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "ignore.toml", "[ignore]\nraw = [\"echo\"]\n");
    let m = matcher(Some(config.as_path())).unwrap();
    assert!(m.ignore_table().covers("raw"));
    assert!(!m.ignore_table().covers("cmd"));

    assert!(matcher(None).unwrap().ignore_table().covers("cmd"));
}

#[tokio::test]
async fn test_store_then_diff() {
    let dir = TempDir::new().unwrap();
    let store_root = ExampleStore::new(dir.path());
    let key = ExampleKey::new(ExampleKind::Build, "NodeJs").named("lts");
    let code = write(&dir, "code.sh", "npm ci\nnpm test\n");
    let changed = write(&dir, "changed.sh", "npm ci\nnpm run test\n");

    let outcome = diff(&store_root, &key, &code).await.unwrap();
    assert!(!outcome.success);
    assert!(outcome.output.starts_with("no stored example at"));

    let outcome = store(&store_root, &key, &code).await.unwrap();
    assert!(outcome.output.ends_with("build-node_js-lts.bash.txt"));

    assert_eq!(
        diff(&store_root, &key, &code).await.unwrap(),
        Outcome::ok("")
    );
    let outcome = diff(&store_root, &key, &changed).await.unwrap();
    assert!(!outcome.success);
    assert!(outcome.output.contains("+npm run test"));
}

#[test]
fn test_example_path() {
    let store_root = ExampleStore::new("/repo");
    let key = ExampleKey::new(ExampleKind::Addon, "Apt").integration(true);
    assert_eq!(
        example_path(&store_root, &key),
        Outcome::ok("/repo/examples/addon-apt-integration.bash.txt")
    );
}
