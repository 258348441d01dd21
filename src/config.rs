//! Analyzer configuration
//!
//! Chunk size decides how many words go into each tree; the interval is the
//! pacing between insertions during playback.

use std::time::Duration;

use thiserror::Error;

use crate::text::DEFAULT_CHUNK_SIZE;

/// Slowest allowed playback interval (ms)
pub const MAX_INTERVAL_MS: u64 = 1500;

/// Fastest allowed playback interval (ms)
pub const MIN_INTERVAL_MS: u64 = 300;

/// Interval granularity (ms)
pub const INTERVAL_STEP_MS: u64 = 100;

/// Default playback interval (ms)
pub const DEFAULT_INTERVAL_MS: u64 = 800;

/// Invalid configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Chunk size of zero
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,

    /// Interval outside the allowed range
    #[error("interval {0} ms outside {}..={} ms", MIN_INTERVAL_MS, MAX_INTERVAL_MS)]
    IntervalOutOfRange(u64),

    /// Interval not a multiple of the step
    #[error("interval {0} ms is not a multiple of {} ms", INTERVAL_STEP_MS)]
    IntervalMisaligned(u64),
}

/// Configuration parameters for analysis and playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Words per tree
    pub chunk_size: usize,

    /// Delay between insertions during playback
    pub interval: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

impl AnalyzerConfig {
    /// Default configuration (20 words per tree, 800 ms per insertion)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set words per tree
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the playback interval in milliseconds
    pub fn with_interval_ms(mut self, millis: u64) -> Self {
        self.interval = Duration::from_millis(millis);
        self
    }

    /// Check chunk size and interval bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }

        let millis = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX);
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&millis) {
            return Err(ConfigError::IntervalOutOfRange(millis));
        }
        if millis % INTERVAL_STEP_MS != 0 || self.interval.subsec_nanos() % 1_000_000 != 0 {
            return Err(ConfigError::IntervalMisaligned(millis));
        }

        Ok(())
    }
}
