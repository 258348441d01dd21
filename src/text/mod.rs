//! Text to tree keys
//!
//! Pipeline: lowercase -> strip everything but `a-z` and whitespace ->
//! split on whitespace -> drop empties. The resulting words are batched into
//! fixed-size chunks; each chunk feeds its own tree.

mod word;

pub use word::{KeyError, Word};

/// Default number of words per tree
pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// Lowercase and keep only `a-z` and whitespace
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect()
}

/// Split raw text into normalized words, in order
pub fn tokenize(text: &str) -> Vec<Word> {
    normalize(text)
        .split_whitespace()
        .filter_map(|token| Word::parse(token).ok())
        .collect()
}

/// Consecutive batches of at most `size` words
///
/// # Panics
///
/// Panics if `size` is 0. [`crate::config::AnalyzerConfig::validate`] rejects
/// that for configured sizes.
pub fn chunk(words: &[Word], size: usize) -> std::slice::Chunks<'_, Word> {
    words.chunks(size)
}

/// Number of chunks `len` words split into
pub fn chunk_count(len: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    (len + size - 1) / size
}
