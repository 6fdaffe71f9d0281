//! Run configuration

use crate::error::{SearchError, SearchResult};
use std::num::NonZeroUsize;

/// Maximum number of words read from the word list
pub const DEFAULT_MAX_WORDS: usize = 100;

/// Maximum letters per word
pub const DEFAULT_MAX_WORD_LEN: usize = 49;

/// Configuration for a search run
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of cooperating workers, the initiator included
    pub workers: NonZeroUsize,
    /// Words beyond this count are dropped with a warning
    pub max_words: usize,
    /// Longer words are rejected as invalid input
    pub max_word_len: usize,
    /// Optional hard cap on matches per worker (None = unbounded)
    pub max_results: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            max_words: DEFAULT_MAX_WORDS,
            max_word_len: DEFAULT_MAX_WORD_LEN,
            max_results: None,
        }
    }
}

impl SearchConfig {
    /// Default configuration with an explicit worker count
    pub fn with_workers(workers: usize) -> SearchResult<Self> {
        let workers = NonZeroUsize::new(workers).ok_or_else(|| {
            SearchError::Configuration("at least one worker is required".to_string())
        })?;
        Ok(Self {
            workers,
            ..Default::default()
        })
    }

    /// Set the per-worker result cap
    pub fn max_results(mut self, limit: Option<usize>) -> Self {
        self.max_results = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_rejected() {
        let err = SearchConfig::with_workers(0).unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }

    #[test]
    fn test_with_workers_keeps_limits() {
        let config = SearchConfig::with_workers(3).unwrap();
        assert_eq!(config.workers.get(), 3);
        assert_eq!(config.max_words, DEFAULT_MAX_WORDS);
        assert_eq!(config.max_word_len, DEFAULT_MAX_WORD_LEN);
        assert!(config.max_results.is_none());
    }
}
