//! # Instrumented AVL Word Trees
//!
//! This library builds self-balancing word trees and records, for every
//! insertion, exactly what the balancing machinery did so the process can be
//! animated step by step.
//!
//! ## Pipeline
//!
//! 1. **Tokenize**: lowercase, strip non-letters, split on whitespace
//! 2. **Chunk**: batches of `chunk_size` words, one tree per batch
//! 3. **Insert**: AVL insertion returning an [`InsertTrace`] (path, rotation, pivots)
//! 4. **Snapshot**: read-only [`TreeSnapshot`] per step for a renderer
//! 5. **Report**: word statistics and per-tree rotation tallies
//!
//! ## Usage Example
//!
//! ```
//! use wordtree::{AvlTree, Rotation};
//!
//! let mut tree = AvlTree::new();
//! tree.insert("cherry");
//! tree.insert("banana");
//! let trace = tree.insert("apple");
//!
//! assert_eq!(trace.rotation, Rotation::LL);
//! assert_eq!(trace.touched, vec!["cherry", "banana"]);
//! assert_eq!(tree.root().map(|n| n.key()), Some("banana"));
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod tree;       // AVL engine and read-only views
pub mod text;       // Tokenization and chunking
pub mod config;     // Chunk size and playback pacing
pub mod stats;      // Word statistics and rotation tallies
pub mod playback;   // Frame-by-frame construction
pub mod export;     // CSV / JSON statistics export

// Re-exports for convenience
pub use config::{AnalyzerConfig, ConfigError};
pub use playback::{Frame, Playback};
pub use stats::{RotationTally, TextStats, TreeReport};
pub use text::{KeyError, Word};
pub use tree::{AvlNode, AvlTree, InsertOutcome, InsertTrace, InvariantViolation, Rotation, TreeSnapshot};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while setting up an analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Rejected key
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Tree number outside the generated range
    #[error("tree {requested} does not exist ({available} generated)")]
    NoSuchTree {
        /// 1-based tree number requested
        requested: usize,
        /// Trees available
        available: usize,
    },
}

/// Splits text into chunks and builds one tree per chunk
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

/// Result of analyzing one text
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Tokenized words, in input order
    pub words: Vec<Word>,

    /// Word statistics
    pub stats: TextStats,

    /// One report per generated tree
    pub reports: Vec<TreeReport>,
}

impl Analyzer {
    /// Create an analyzer, validating the configuration
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// One playback per chunk, in order, none started
    pub fn playbacks(&self, words: &[Word]) -> Vec<Playback> {
        text::chunk(words, self.config.chunk_size)
            .enumerate()
            .map(|(i, chunk)| Playback::new(i + 1, chunk.to_vec(), self.config.interval))
            .collect()
    }

    /// Playback for tree number `index` (1-based)
    pub fn playback(&self, words: &[Word], index: usize) -> Result<Playback, AnalyzerError> {
        let available = text::chunk_count(words.len(), self.config.chunk_size);
        if index == 0 || index > available {
            return Err(AnalyzerError::NoSuchTree {
                requested: index,
                available,
            });
        }
        let start = (index - 1) * self.config.chunk_size;
        let end = (start + self.config.chunk_size).min(words.len());
        Ok(Playback::new(index, words[start..end].to_vec(), self.config.interval))
    }

    /// Playback over explicit keys, each validated as a normalized word
    pub fn playback_from_keys<I, S>(&self, keys: I) -> Result<Playback, AnalyzerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = keys
            .into_iter()
            .map(|key| Word::parse(key.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Playback::new(1, words, self.config.interval))
    }

    /// Tokenize `input`, build every tree to completion, and summarize
    pub fn analyze(&self, input: &str) -> Analysis {
        let words = text::tokenize(input);
        let stats = TextStats::compute(&words, self.config.chunk_size);
        debug!(
            total = stats.total_words,
            unique = stats.unique_words,
            trees = stats.trees_generated,
            "tokenized input"
        );

        let reports = self
            .playbacks(&words)
            .into_iter()
            .map(|mut playback| {
                playback.run_to_end();
                playback.report()
            })
            .collect();

        Analysis {
            words,
            stats,
            reports,
        }
    }
}
