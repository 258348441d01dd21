//! Read-only walks over the tree
//!
//! Both iterators keep an explicit stack of borrowed nodes, so the tree is
//! never mutated and a walk can be restarted at any time by asking the tree
//! for a new one. Stack depth: O(log n).

use std::fmt;

use super::AvlNode;

/// Which child slot a node occupies under its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Left child
    Left,

    /// Right child
    Right,
}

/// One node as seen by a depth-first walk
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    node: &'a AvlNode,

    /// Depth below the root (root = 0)
    pub depth: usize,

    /// Slot under the parent (`None` for the root)
    pub side: Option<Direction>,
}

impl<'a> NodeView<'a> {
    /// Key
    pub fn key(&self) -> &'a str {
        self.node.key()
    }

    /// Occurrence count
    pub fn count(&self) -> usize {
        self.node.count()
    }

    /// Subtree height
    pub fn height(&self) -> usize {
        self.node.height()
    }

    /// Balance factor
    pub fn balance(&self) -> isize {
        self.node.balance_factor()
    }

    /// Has a left child
    pub fn has_left(&self) -> bool {
        self.node.left().is_some()
    }

    /// Has a right child
    pub fn has_right(&self) -> bool {
        self.node.right().is_some()
    }

    /// Underlying node
    pub fn node(&self) -> &'a AvlNode {
        self.node
    }
}

/// Pre-order traversal: node, then left subtree, then right subtree
#[derive(Debug, Clone)]
pub struct DepthFirst<'a> {
    stack: Vec<NodeView<'a>>,
}

impl<'a> DepthFirst<'a> {
    pub(crate) fn new(root: Option<&'a AvlNode>) -> Self {
        let stack = root
            .map(|node| NodeView {
                node,
                depth: 0,
                side: None,
            })
            .into_iter()
            .collect();
        Self { stack }
    }

    /// Pending nodes on the stack
    pub fn pending(&self) -> usize {
        self.stack.len()
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.stack.pop()?;
        let depth = view.depth + 1;

        // Right first so the left subtree is popped first
        if let Some(node) = view.node.right() {
            self.stack.push(NodeView {
                node,
                depth,
                side: Some(Direction::Right),
            });
        }
        if let Some(node) = view.node.left() {
            self.stack.push(NodeView {
                node,
                depth,
                side: Some(Direction::Left),
            });
        }

        Some(view)
    }
}

/// In-order traversal yielding nodes by ascending key
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    stack: Vec<&'a AvlNode>,
}

impl<'a> InOrder<'a> {
    pub(crate) fn new(root: Option<&'a AvlNode>) -> Self {
        let mut walk = Self { stack: Vec::new() };
        walk.push_left_spine(root);
        walk
    }

    fn push_left_spine(&mut self, mut current: Option<&'a AvlNode>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a AvlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}

/// Owned nested copy of a subtree, detached from the live tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeSnapshot {
    /// Key
    pub key: String,

    /// Occurrence count
    pub count: usize,

    /// Subtree height
    pub height: usize,

    /// Balance factor
    pub balance: isize,

    /// Slot under the parent (`None` for the root)
    pub side: Option<Direction>,

    /// Present children, left before right
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    /// Copy the subtree rooted at `node`
    pub fn from_node(node: &AvlNode) -> Self {
        Self::copy(node, None)
    }

    fn copy(node: &AvlNode, side: Option<Direction>) -> Self {
        let children = [
            (node.left(), Direction::Left),
            (node.right(), Direction::Right),
        ]
        .into_iter()
        .filter_map(|(child, dir)| child.map(|child| Self::copy(child, Some(dir))))
        .collect();

        Self {
            key: node.key().to_owned(),
            count: node.count(),
            height: node.height(),
            balance: node.balance_factor(),
            side,
            children,
        }
    }

    /// Child in the given slot
    pub fn child(&self, side: Direction) -> Option<&TreeSnapshot> {
        self.children.iter().find(|child| child.side == Some(side))
    }

    /// Number of nodes in the snapshot
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeSnapshot::node_count).sum::<usize>()
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let marker = match self.side {
            Some(Direction::Left) => "L ",
            Some(Direction::Right) => "R ",
            None => "",
        };
        write!(f, "{:indent$}{}{}", "", marker, self.key, indent = indent * 2)?;
        if self.count > 1 {
            write!(f, " ×{}", self.count)?;
        }
        writeln!(f, " (h={}, bf={})", self.height, self.balance)?;

        for child in &self.children {
            child.write_outline(f, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}
