use crate::grid::direction::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A confirmed occurrence of a word in the grid
///
/// End coordinates are the wrapped position of the word's last letter, so a
/// match crossing an edge can end "before" it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPosition {
    pub word: String,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
    /// Direction the matcher walked
    pub direction: Direction,
}

impl WordPosition {
    pub fn start(&self) -> (usize, usize) {
        (self.start_row, self.start_col)
    }

    pub fn end(&self) -> (usize, usize) {
        (self.end_row, self.end_col)
    }

    /// Number of letters (not bytes) in the word
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

impl fmt::Display for WordPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ({},{}) to ({},{})",
            self.word, self.start_row, self.start_col, self.end_row, self.end_col
        )
    }
}

/// Half-open range of grid rows [start, end) owned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Matches produced by one worker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResults {
    /// Ordinal of the worker that produced these results
    pub rank: usize,
    /// Row-major, then column, then direction-table order
    pub positions: Vec<WordPosition>,
    /// Number of positions found
    pub valid_results: usize,
    /// Number of words attempted
    pub total_processed: usize,
}

impl ProcessResults {
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            ..Default::default()
        }
    }

    /// Append matches for one word
    pub fn extend(&mut self, found: Vec<WordPosition>) {
        self.valid_results += found.len();
        self.positions.extend(found);
        self.total_processed += 1;
    }
}
