//! AVL node representation
//!
//! Node = (key, count, height) plus exclusively owned children.
//! Height of an absent child is 0, so a leaf has height 1.
//!   balance(node) = height(left) - height(right) ∈ {-1, 0, +1}

use std::fmt;

/// Owned link to a child subtree
pub(crate) type Link = Option<Box<AvlNode>>;

/// Tree node (one distinct key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlNode {
    pub(crate) key: String,
    pub(crate) count: usize,
    pub(crate) height: usize,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl AvlNode {
    /// Create a detached leaf: count 1, height 1
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            count: 1,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Comparison key
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// How many times the key has been inserted
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Cached height of the subtree rooted here
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Left subtree, if any
    #[inline]
    pub fn left(&self) -> Option<&AvlNode> {
        self.left.as_deref()
    }

    /// Right subtree, if any
    #[inline]
    pub fn right(&self) -> Option<&AvlNode> {
        self.right.as_deref()
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Balance factor: height(left) - height(right)
    #[inline]
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Recompute the cached height from the children's cached heights
    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.left().map_or(0, AvlNode::size) + self.right().map_or(0, AvlNode::size)
    }
}

/// Height of a possibly-absent subtree
#[inline]
pub(crate) fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl fmt::Display for AvlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{} ×{} (h={}, bf={})", self.key, self.count, self.height, self.balance_factor())
        } else {
            write!(f, "{} (h={}, bf={})", self.key, self.height, self.balance_factor())
        }
    }
}
