//! Batch statistics
//!
//! Aggregate counts over the token stream plus per-tree rotation tallies.
//! Everything here reads already-computed data; nothing feeds back into the
//! trees.

use std::collections::HashSet;
use std::fmt;

use crate::text::{chunk_count, Word};
use crate::tree::{AvlTree, InsertTrace, Rotation};

/// Word-level statistics for one input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TextStats {
    /// Number of words after tokenization
    pub total_words: usize,

    /// Distinct words across the whole text
    pub unique_words: usize,

    /// Trees built (one per chunk)
    pub trees_generated: usize,
}

impl TextStats {
    /// Compute statistics for `words` split into chunks of `chunk_size`
    pub fn compute(words: &[Word], chunk_size: usize) -> Self {
        let unique: HashSet<&str> = words.iter().map(Word::as_str).collect();
        Self {
            total_words: words.len(),
            unique_words: unique.len(),
            trees_generated: chunk_count(words.len(), chunk_size),
        }
    }

    /// Flat key -> value view, in a stable order
    pub fn entries(&self) -> [(&'static str, usize); 3] {
        [
            ("total_words", self.total_words),
            ("unique_words", self.unique_words),
            ("trees_generated", self.trees_generated),
        ]
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total words: {}\nUnique words: {}\nAVL trees generated: {}",
            self.total_words, self.unique_words, self.trees_generated
        )
    }
}

/// How often each rotation case fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct RotationTally {
    /// Left-left cases
    pub ll: usize,
    /// Right-right cases
    pub rr: usize,
    /// Left-right cases
    pub lr: usize,
    /// Right-left cases
    pub rl: usize,
}

impl RotationTally {
    /// Count one insertion's rotation (no-op for `None`)
    pub fn record(&mut self, rotation: Rotation) {
        match rotation {
            Rotation::None => {}
            Rotation::LL => self.ll += 1,
            Rotation::RR => self.rr += 1,
            Rotation::LR => self.lr += 1,
            Rotation::RL => self.rl += 1,
        }
    }

    /// Count for a single case
    pub fn get(&self, rotation: Rotation) -> usize {
        match rotation {
            Rotation::None => 0,
            Rotation::LL => self.ll,
            Rotation::RR => self.rr,
            Rotation::LR => self.lr,
            Rotation::RL => self.rl,
        }
    }

    /// Rotations of any kind
    pub fn total(&self) -> usize {
        self.ll + self.rr + self.lr + self.rl
    }
}

impl<'a> Extend<&'a InsertTrace> for RotationTally {
    fn extend<I: IntoIterator<Item = &'a InsertTrace>>(&mut self, traces: I) {
        for trace in traces {
            self.record(trace.rotation);
        }
    }
}

impl fmt::Display for RotationTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LL={} RR={} LR={} RL={}", self.ll, self.rr, self.lr, self.rl)
    }
}

/// Summary of one finished tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeReport {
    /// 1-based tree number
    pub index: usize,

    /// Insertions performed (duplicates included)
    pub words_inserted: usize,

    /// Distinct keys held
    pub distinct_keys: usize,

    /// Final height
    pub height: usize,

    /// Root key, if any
    pub root: Option<String>,

    /// Rotations fired while building
    pub rotations: RotationTally,
}

impl TreeReport {
    /// Summarize `tree` built as tree number `index`
    pub fn new(index: usize, tree: &AvlTree, rotations: RotationTally) -> Self {
        Self {
            index,
            words_inserted: tree.total_count(),
            distinct_keys: tree.len(),
            height: tree.height(),
            root: tree.root().map(|node| node.key().to_owned()),
            rotations,
        }
    }
}

impl fmt::Display for TreeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tree {}\twords={}\tdistinct={}\theight={}\troot={}\trotations: {}",
            self.index,
            self.words_inserted,
            self.distinct_keys,
            self.height,
            self.root.as_deref().unwrap_or("-"),
            self.rotations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    #[test]
    fn test_text_stats() {
        let words = tokenize("the cat and the hat and the bat");
        let stats = TextStats::compute(&words, 3);

        assert_eq!(stats.total_words, 8);
        assert_eq!(stats.unique_words, 5);
        assert_eq!(stats.trees_generated, 3);
        assert_eq!(stats.entries()[1], ("unique_words", 5));
    }

    #[test]
    fn test_empty_text_stats() {
        let stats = TextStats::compute(&[], 20);
        assert_eq!(stats, TextStats::default());
    }

    #[test]
    fn test_tally() {
        let mut tree = AvlTree::new();
        let traces: Vec<_> = ["a", "b", "c", "e", "d"].iter().map(|k| tree.insert(k)).collect();

        let mut tally = RotationTally::default();
        tally.extend(&traces);

        assert_eq!(tally.rr, 1);
        assert_eq!(tally.rl, 1);
        assert_eq!(tally.total(), 2);
        assert_eq!(tally.get(Rotation::RL), 1);
        assert_eq!(tally.to_string(), "LL=0 RR=1 LR=0 RL=1");

        let report = TreeReport::new(1, &tree, tally);
        assert_eq!(report.words_inserted, 5);
        assert_eq!(report.root.as_deref(), Some("b"));
        assert_eq!(report.height, 3);
    }
}
