//! Error taxonomy for a search run
//!
//! Every variant is fatal to the run: the scatter/gather protocol has no way
//! to continue with a missing participant, so nothing here is retried.

use thiserror::Error;

/// Result alias used throughout the crate
pub type SearchResult<T> = Result<T, SearchError>;

/// Problems with the puzzle or word list handed to the initiator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("puzzle contains no grid lines")]
    EmptyPuzzle,

    #[error("no word list found after the grid")]
    MissingWords,

    #[error("word '{word}' is longer than the maximum of {max} letters")]
    WordTooLong { word: String, max: usize },

    #[error("row {row} is outside a grid of {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
}

/// Errors that abort a search run
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("failed to allocate a {rows}x{cols} grid")]
    Allocation { rows: usize, cols: usize },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("worker {rank} exceeded the result limit of {limit} matches")]
    ResultLimitExceeded { rank: usize, limit: usize },

    #[error("worker {rank} aborted the run: {reason}")]
    WorkerAborted { rank: usize, reason: String },

    #[error("lost contact with worker {rank}")]
    WorkerLost { rank: usize },

    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_converts() {
        let err: SearchError = InputError::EmptyPuzzle.into();
        assert!(matches!(err, SearchError::Input(InputError::EmptyPuzzle)));
        assert_eq!(err.to_string(), "invalid input: puzzle contains no grid lines");
    }

    #[test]
    fn test_word_too_long_message() {
        let err = InputError::WordTooLong {
            word: "abcdef".to_string(),
            max: 3,
        };
        assert_eq!(
            err.to_string(),
            "word 'abcdef' is longer than the maximum of 3 letters"
        );
    }
}
