//! Instrumented AVL tree
//!
//! Keys are words, compared with the byte-wise `str` ordering. Every
//! insertion restores the height-balance invariant on the way back up the
//! recursion and reports what it did through an [`InsertTrace`]:
//!
//! 1. **Path**: keys visited from the root to the insertion point
//! 2. **Rotation**: LL / RR / LR / RL (or none)
//! 3. **Touched**: the pivot pair reattached by the final single rotation
//!
//! Ownership: each node exclusively owns its children (`Option<Box<_>>`).
//! Rotations move boxes between slots and return the new subtree root to
//! the caller, which reattaches it. No parent pointers.

mod node;
mod trace;
mod traversal;

pub use node::AvlNode;
pub use trace::{InsertOutcome, InsertTrace, Rotation};
pub use traversal::{DepthFirst, Direction, InOrder, NodeView, TreeSnapshot};

use std::cmp::Ordering;

use thiserror::Error;
use tracing::debug;

use node::{height, Link};

/// Self-balancing word tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvlTree {
    /// Root node (absent when empty)
    root: Link,

    /// Number of distinct keys
    len: usize,

    /// Sum of all counts
    total: usize,
}

/// Structural invariant found broken by [`AvlTree::validate`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// BST ordering broken
    #[error("key {key:?} is out of order relative to ancestor {ancestor:?}")]
    Order {
        /// Misplaced key
        key: String,
        /// Ancestor whose bound it violates
        ancestor: String,
    },

    /// Cached height disagrees with the children
    #[error("node {key:?} caches height {cached} but its subtree has height {actual}")]
    Height {
        /// Node key
        key: String,
        /// Stored height
        cached: usize,
        /// Height recomputed from the children
        actual: usize,
    },

    /// Balance factor outside {-1, 0, +1}
    #[error("node {key:?} has balance factor {balance}")]
    Balance {
        /// Node key
        key: String,
        /// Offending balance factor
        balance: isize,
    },

    /// A node with a zero occurrence count
    #[error("node {key:?} has a zero count")]
    ZeroCount {
        /// Node key
        key: String,
    },
}

impl AvlTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, rebalancing as needed
    ///
    /// Duplicate keys only bump the existing node's count. The returned trace
    /// describes this call alone.
    ///
    /// Keys are expected to be non-empty normalized words (see
    /// [`crate::text::Word`]); the tree itself accepts any string.
    pub fn insert(&mut self, key: impl AsRef<str>) -> InsertTrace {
        let key = key.as_ref();
        let mut trace = InsertTrace::new();

        let root = insert_at(self.root.take(), key, &mut trace);
        self.root = Some(root);

        self.total += 1;
        if trace.is_new() {
            self.len += 1;
        }

        trace
    }

    /// Drop every node, returning to the empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Root node, if any
    #[inline]
    pub fn root(&self) -> Option<&AvlNode> {
        self.root.as_deref()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of distinct keys
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of insertions, duplicates included
    #[inline]
    pub fn total_count(&self) -> usize {
        self.total
    }

    /// Tree height (0 when empty)
    #[inline]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Look up the node holding `key`
    pub fn get(&self, key: &str) -> Option<&AvlNode> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(node.key()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Occurrence count of `key` (0 if absent)
    pub fn count(&self, key: &str) -> usize {
        self.get(key).map_or(0, AvlNode::count)
    }

    /// Check if `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Lazy pre-order walk (root, left subtree, right subtree)
    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst::new(self.root())
    }

    /// Ascending-key walk
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder::new(self.root())
    }

    /// Owned nested copy of the current shape, for renderers
    pub fn snapshot(&self) -> Option<TreeSnapshot> {
        self.root().map(TreeSnapshot::from_node)
    }

    /// Verify ordering, cached heights, balance and counts for every node
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        validate_subtree(self.root(), None, None).map(|_| ())
    }
}

impl<S: AsRef<str>> Extend<S> for AvlTree {
    fn extend<I: IntoIterator<Item = S>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for AvlTree {
    fn from_iter<I: IntoIterator<Item = S>>(keys: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(keys);
        tree
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = NodeView<'a>;
    type IntoIter = DepthFirst<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Recursive insert; returns the (possibly new) subtree root
fn insert_at(link: Link, key: &str, trace: &mut InsertTrace) -> Box<AvlNode> {
    let mut node = match link {
        Some(node) => node,
        None => {
            trace.path.push(key.to_owned());
            return Box::new(AvlNode::new(key));
        }
    };

    trace.path.push(node.key.clone());

    match key.cmp(&node.key) {
        Ordering::Equal => {
            node.count += 1;
            trace.outcome = InsertOutcome::Incremented { count: node.count };
            return node;
        }
        Ordering::Less => node.left = Some(insert_at(node.left.take(), key, trace)),
        Ordering::Greater => node.right = Some(insert_at(node.right.take(), key, trace)),
    }

    node.update_height();
    rebalance(node, key, trace)
}

/// Pick the rotation case from the balance factor and the inserted key's
/// side of the heavy child
fn rebalance(mut node: Box<AvlNode>, key: &str, trace: &mut InsertTrace) -> Box<AvlNode> {
    let balance = node.balance_factor();

    if balance > 1 {
        let side = node.left().map(|left| key.cmp(left.key()));
        match side {
            Some(Ordering::Less) => {
                debug!(rotation = "LL", at = %node.key, "rebalancing");
                trace.rotation = Rotation::LL;
                return rotate_right(node, trace);
            }
            Some(Ordering::Greater) => {
                debug!(rotation = "LR", at = %node.key, "rebalancing");
                if let Some(left) = node.left.take() {
                    node.left = Some(rotate_left(left, trace));
                }
                trace.rotation = Rotation::LR;
                return rotate_right(node, trace);
            }
            _ => {}
        }
    } else if balance < -1 {
        let side = node.right().map(|right| key.cmp(right.key()));
        match side {
            Some(Ordering::Greater) => {
                debug!(rotation = "RR", at = %node.key, "rebalancing");
                trace.rotation = Rotation::RR;
                return rotate_left(node, trace);
            }
            Some(Ordering::Less) => {
                debug!(rotation = "RL", at = %node.key, "rebalancing");
                if let Some(right) = node.right.take() {
                    node.right = Some(rotate_right(right, trace));
                }
                trace.rotation = Rotation::RL;
                return rotate_left(node, trace);
            }
            _ => {}
        }
    }

    node
}

/// Right rotation around `y`:
///
/// ```text
///        y            x
///       / \          / \
///      x   C   =>   A   y
///     / \              / \
///    A   T            T   C
/// ```
///
/// Records pivots `[y, x]`. `y` is updated before `x` since `x` now sits
/// above it.
fn rotate_right(mut y: Box<AvlNode>, trace: &mut InsertTrace) -> Box<AvlNode> {
    let Some(mut x) = y.left.take() else {
        return y;
    };

    y.left = x.right.take();
    y.update_height();
    trace.record_pivots(&y.key, &x.key);

    x.right = Some(y);
    x.update_height();
    x
}

/// Left rotation around `x`, mirror of [`rotate_right`]. Records `[x, y]`.
fn rotate_left(mut x: Box<AvlNode>, trace: &mut InsertTrace) -> Box<AvlNode> {
    let Some(mut y) = x.right.take() else {
        return x;
    };

    x.right = y.left.take();
    x.update_height();
    trace.record_pivots(&x.key, &y.key);

    y.left = Some(x);
    y.update_height();
    y
}

/// Returns the recomputed height of the subtree
fn validate_subtree(
    node: Option<&AvlNode>,
    lower: Option<&str>,
    upper: Option<&str>,
) -> Result<usize, InvariantViolation> {
    let Some(node) = node else {
        return Ok(0);
    };

    let misplaced = lower
        .filter(|lo| node.key() <= *lo)
        .or_else(|| upper.filter(|hi| node.key() >= *hi));
    if let Some(ancestor) = misplaced {
        return Err(InvariantViolation::Order {
            key: node.key().to_owned(),
            ancestor: ancestor.to_owned(),
        });
    }

    if node.count() == 0 {
        return Err(InvariantViolation::ZeroCount {
            key: node.key().to_owned(),
        });
    }

    let left = validate_subtree(node.left(), lower, Some(node.key()))?;
    let right = validate_subtree(node.right(), Some(node.key()), upper)?;

    let actual = 1 + left.max(right);
    if node.height() != actual {
        return Err(InvariantViolation::Height {
            key: node.key().to_owned(),
            cached: node.height(),
            actual,
        });
    }

    let balance = left as isize - right as isize;
    if !(-1..=1).contains(&balance) {
        return Err(InvariantViolation::Balance {
            key: node.key().to_owned(),
            balance,
        });
    }

    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[&str]) -> (AvlTree, InsertTrace) {
        let mut tree = AvlTree::new();
        let mut last = None;
        for key in keys {
            last = Some(tree.insert(key));
            tree.validate().expect("invariants hold after every insert");
        }
        (tree, last.expect("at least one key"))
    }

    fn shape(tree: &AvlTree) -> (Option<&str>, Option<&str>, Option<&str>) {
        let root = tree.root().expect("non-empty");
        (
            Some(root.key()),
            root.left().map(AvlNode::key),
            root.right().map(AvlNode::key),
        )
    }

    #[test]
    fn test_first_insert() {
        let mut tree = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);

        let trace = tree.insert("alpha");
        assert_eq!(trace.path, vec!["alpha"]);
        assert_eq!(trace.rotation, Rotation::None);
        assert!(trace.touched.is_empty());
        assert!(trace.is_new());

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.root().map(AvlNode::key), Some("alpha"));
    }

    #[test]
    fn test_left_left() {
        let (tree, trace) = build(&["30", "20", "10"]);
        assert_eq!(trace.rotation, Rotation::LL);
        assert_eq!(trace.touched, vec!["30", "20"]);
        assert_eq!(shape(&tree), (Some("20"), Some("10"), Some("30")));
    }

    #[test]
    fn test_right_right() {
        let (tree, trace) = build(&["10", "20", "30"]);
        assert_eq!(trace.rotation, Rotation::RR);
        assert_eq!(trace.touched, vec!["10", "20"]);
        assert_eq!(shape(&tree), (Some("20"), Some("10"), Some("30")));
    }

    #[test]
    fn test_left_right_reports_outer_pivots() {
        let (tree, trace) = build(&["30", "10", "20"]);
        assert_eq!(trace.rotation, Rotation::LR);
        assert_eq!(trace.touched, vec!["30", "20"]);
        assert_eq!(shape(&tree), (Some("20"), Some("10"), Some("30")));
    }

    #[test]
    fn test_right_left_reports_outer_pivots() {
        let (tree, trace) = build(&["10", "30", "20"]);
        assert_eq!(trace.rotation, Rotation::RL);
        assert_eq!(trace.touched, vec!["10", "20"]);
        assert_eq!(shape(&tree), (Some("20"), Some("10"), Some("30")));
    }

    #[test]
    fn test_path_includes_ancestors_of_rotation() {
        // d, b, f, a, then "0" forces LL at "b" one level below the root
        let (tree, trace) = build(&["d", "b", "f", "a", "0"]);
        assert_eq!(trace.path, vec!["d", "b", "a", "0"]);
        assert_eq!(trace.rotation, Rotation::LL);
        assert_eq!(trace.touched, vec!["b", "a"]);
        assert_eq!(tree.root().map(AvlNode::key), Some("d"));
        assert_eq!(tree.root().and_then(AvlNode::left).map(AvlNode::key), Some("a"));
    }

    #[test]
    fn test_rotation_does_not_leak_into_next_call() {
        let mut tree = AvlTree::new();
        tree.insert("a");
        tree.insert("b");
        let rotated = tree.insert("c");
        assert_eq!(rotated.rotation, Rotation::RR);

        let next = tree.insert("d");
        assert_eq!(next.rotation, Rotation::None);
        assert!(next.touched.is_empty());
        assert_eq!(next.path, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_duplicate_increments_count() {
        let (tree, trace) = build(&["15", "10", "20", "10"]);
        assert_eq!(trace.outcome, InsertOutcome::Incremented { count: 2 });
        assert_eq!(trace.path, vec!["15", "10"]);
        assert_eq!(trace.rotation, Rotation::None);
        assert_eq!(tree.count("10"), 2);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.total_count(), 4);

        let (plain, _) = build(&["15", "10", "20"]);
        assert_eq!(shape(&tree), shape(&plain));
        assert_eq!(tree.height(), plain.height());
    }

    #[test]
    fn test_lookup() {
        let tree: AvlTree = ["kiwi", "apple", "mango", "apple"].into_iter().collect();
        assert_eq!(tree.count("apple"), 2);
        assert_eq!(tree.count("pear"), 0);
        assert!(tree.contains("mango"));
        assert!(tree.get("banana").is_none());
    }

    #[test]
    fn test_clear() {
        let mut tree: AvlTree = ["a", "b", "c"].into_iter().collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.total_count(), 0);
        assert_eq!(tree.insert("z").path, vec!["z"]);
    }

    #[test]
    fn test_validate_detects_corruption() {
        let mut tree: AvlTree = ["b", "a", "c"].into_iter().collect();
        if let Some(root) = tree.root.as_mut() {
            root.height = 7;
        }
        assert!(matches!(
            tree.validate(),
            Err(InvariantViolation::Height { cached: 7, actual: 2, .. })
        ));

        let mut tree: AvlTree = ["b", "a", "c"].into_iter().collect();
        if let Some(left) = tree.root.as_mut().and_then(|root| root.left.as_mut()) {
            left.key = "z".into();
        }
        assert!(matches!(tree.validate(), Err(InvariantViolation::Order { .. })));
    }

    #[test]
    fn test_tree_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<AvlTree>();
    }
}
