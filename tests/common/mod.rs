#![allow(dead_code)]

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use wordtree::tree::Direction;
use wordtree::{AvlNode, AvlTree};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("WORDTREE_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set WORDTREE_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Keys a search for `key` visits in `tree`, plus `key` itself when it would
/// land as a new leaf
pub fn search_path(tree: &AvlTree, key: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = tree.root();
    while let Some(node) = current {
        path.push(node.key().to_owned());
        current = match key.cmp(node.key()) {
            Ordering::Less => node.left(),
            Ordering::Greater => node.right(),
            Ordering::Equal => return path,
        };
    }
    path.push(key.to_owned());
    path
}

/// Pre-order (key, depth, side) triples describing the tree's shape
pub fn shape(tree: &AvlTree) -> Vec<(String, usize, Option<Direction>)> {
    tree.iter()
        .map(|view| (view.key().to_owned(), view.depth, view.side))
        .collect()
}

/// Root key with its immediate children
pub fn root_triple(tree: &AvlTree) -> (Option<&str>, Option<&str>, Option<&str>) {
    let root = tree.root();
    (
        root.map(AvlNode::key),
        root.and_then(AvlNode::left).map(AvlNode::key),
        root.and_then(AvlNode::right).map(AvlNode::key),
    )
}
