//! Per-insertion instrumentation
//!
//! Every call to [`AvlTree::insert`](super::AvlTree::insert) returns a fresh
//! [`InsertTrace`]. Nothing is carried over between calls.

use std::fmt;

/// Rotation case applied while rebalancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Rotation {
    /// No rotation
    #[default]
    #[cfg_attr(feature = "visualize", serde(rename = "none"))]
    None,
    /// Left-left: single right rotation
    LL,
    /// Right-right: single left rotation
    RR,
    /// Left-right: left-rotate the left child, then right-rotate
    LR,
    /// Right-left: right-rotate the right child, then left-rotate
    RL,
}

impl Rotation {
    /// All rotation cases that restructure the tree
    pub const CASES: [Rotation; 4] = [Rotation::LL, Rotation::RR, Rotation::LR, Rotation::RL];

    /// Short label ("LL", "RR", ...; "none" when nothing rotated)
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::None => "none",
            Rotation::LL => "LL",
            Rotation::RR => "RR",
            Rotation::LR => "LR",
            Rotation::RL => "RL",
        }
    }

    /// Double rotations compose two single rotations
    #[inline]
    pub fn is_double(&self) -> bool {
        matches!(self, Rotation::LR | Rotation::RL)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened at the end of the insertion path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(tag = "kind", rename_all = "snake_case"))]
pub enum InsertOutcome {
    /// A new node was created
    Inserted,
    /// The key already existed; its count is now `count`
    Incremented {
        /// Count after the increment
        count: usize,
    },
}

/// Instrumentation for a single insertion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct InsertTrace {
    /// Keys visited from the root down to the insertion point (root first)
    pub path: Vec<String>,

    /// Rotation case applied (outermost one if several levels rotated)
    pub rotation: Rotation,

    /// Keys reattached by the last single rotation performed.
    ///
    /// For LR/RL only the outer rotation's pair is kept.
    pub touched: Vec<String>,

    /// New node or count increment
    pub outcome: InsertOutcome,
}

impl InsertTrace {
    pub(crate) fn new() -> Self {
        Self {
            path: Vec::new(),
            rotation: Rotation::None,
            touched: Vec::new(),
            outcome: InsertOutcome::Inserted,
        }
    }

    /// Depth of the inserted (or incremented) node; the root is depth 1
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Whether any rotation fired
    #[inline]
    pub fn rotated(&self) -> bool {
        self.rotation != Rotation::None
    }

    /// Whether the key was new
    #[inline]
    pub fn is_new(&self) -> bool {
        self.outcome == InsertOutcome::Inserted
    }

    /// Record a single rotation's pivot pair, replacing any earlier pair
    pub(crate) fn record_pivots(&mut self, upper: &str, lower: &str) {
        self.touched.clear();
        self.touched.push(upper.to_owned());
        self.touched.push(lower.to_owned());
    }
}

impl fmt::Display for InsertTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path={}", self.path.join(" > "))?;
        if self.rotated() {
            write!(f, " rotation={} touched=[{}]", self.rotation, self.touched.join(", "))?;
        }
        if let InsertOutcome::Incremented { count } = self.outcome {
            write!(f, " count={}", count)?;
        }
        Ok(())
    }
}
