//! Step-by-step tree construction for renderers
//!
//! A [`Playback`] owns one chunk of words and a tree. Each [`Playback::tick`]
//! inserts the next word and hands back a [`Frame`]: the shape after the
//! insertion plus that insertion's trace. Pacing is left to the caller;
//! [`Playback::interval`] is only the configured hint.

use std::time::Duration;

use tracing::trace;

use crate::stats::{RotationTally, TreeReport};
use crate::text::Word;
use crate::tree::{AvlTree, InsertTrace, TreeSnapshot};

/// Everything a renderer needs to draw one step
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Frame {
    /// 1-based insertion number within the chunk
    pub step: usize,

    /// Word inserted at this step
    pub word: String,

    /// Tree shape after the insertion
    pub snapshot: Option<TreeSnapshot>,

    /// What the insertion did
    pub trace: InsertTrace,
}

/// Drives one tree through its chunk of words
#[derive(Debug, Clone)]
pub struct Playback {
    index: usize,
    words: Vec<Word>,
    tree: AvlTree,
    position: usize,
    paused: bool,
    interval: Duration,
    rotations: RotationTally,
}

impl Playback {
    /// New playback for tree number `index` (1-based), starting unpaused
    pub fn new(index: usize, words: Vec<Word>, interval: Duration) -> Self {
        Self {
            index,
            words,
            tree: AvlTree::new(),
            position: 0,
            paused: false,
            interval,
            rotations: RotationTally::default(),
        }
    }

    /// Insert the next word, unless paused or finished
    pub fn tick(&mut self) -> Option<Frame> {
        if self.paused {
            return None;
        }
        let word = self.words.get(self.position)?;

        let trace = self.tree.insert(word);
        self.position += 1;
        self.rotations.record(trace.rotation);
        trace!(tree = self.index, step = self.position, word = %word, %trace, "inserted");

        Some(Frame {
            step: self.position,
            word: word.to_string(),
            snapshot: self.tree.snapshot(),
            trace,
        })
    }

    /// Insert every remaining word, ignoring the pause flag
    pub fn run_to_end(&mut self) -> Vec<Frame> {
        let paused = std::mem::replace(&mut self.paused, false);
        let frames = std::iter::from_fn(|| self.tick()).collect();
        self.paused = paused;
        frames
    }

    /// Stop producing frames
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue producing frames
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip between paused and playing; returns the new paused state
    pub fn toggle(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Check if every word has been inserted
    pub fn is_finished(&self) -> bool {
        self.position >= self.words.len()
    }

    /// Words inserted so far
    pub fn step(&self) -> usize {
        self.position
    }

    /// Words in this chunk
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the chunk has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Configured delay between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the delay between ticks
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Tree built so far
    pub fn tree(&self) -> &AvlTree {
        &self.tree
    }

    /// Start over with a fresh empty tree
    pub fn reset(&mut self) {
        self.tree.clear();
        self.position = 0;
        self.rotations = RotationTally::default();
    }

    /// Summary of the tree as built so far
    pub fn report(&self) -> TreeReport {
        TreeReport::new(self.index, &self.tree, self.rotations)
    }
}
