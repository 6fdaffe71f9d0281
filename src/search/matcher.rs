//! Per-cell, per-direction word matching over the toroidal grid

use crate::error::{SearchError, SearchResult};
use crate::grid::{Direction, Grid, ProcessResults, RowRange, WordPosition};
use tracing::{debug, trace};

/// Case-fold a single letter (first char of its lowercase mapping)
#[inline]
fn fold(c: char) -> char {
    if c.is_ascii() {
        c.to_ascii_lowercase()
    } else {
        c.to_lowercase().next().unwrap_or(c)
    }
}

/// Fold a word once so the inner loop only folds grid letters
fn fold_word(word: &str) -> Vec<char> {
    word.chars().map(fold).collect()
}

/// Walk `pattern` from a start cell; true if every letter matches
#[inline]
fn walk(grid: &Grid, start_row: usize, start_col: usize, direction: Direction, pattern: &[char]) -> bool {
    let (d_row, d_col) = direction.delta();
    let mut row = start_row as isize;
    let mut col = start_col as isize;

    for &expected in pattern {
        // Wrap the raw position each step; the step itself is never wrapped
        let (r, c) = grid.wrap(row, col);
        if fold(grid.letter_at(r, c)) != expected {
            return false;
        }
        row += d_row;
        col += d_col;
    }

    true
}

/// Closed-form end cell of a `len`-letter match
#[inline]
fn end_position(grid: &Grid, start_row: usize, start_col: usize, direction: Direction, len: usize) -> (usize, usize) {
    let (d_row, d_col) = direction.delta();
    let steps = len as isize - 1;
    grid.wrap(
        start_row as isize + steps * d_row,
        start_col as isize + steps * d_col,
    )
}

fn matched(grid: &Grid, word: &str, start_row: usize, start_col: usize, direction: Direction, len: usize) -> WordPosition {
    let (end_row, end_col) = end_position(grid, start_row, start_col, direction, len);
    WordPosition {
        word: word.to_string(),
        start_row,
        start_col,
        end_row,
        end_col,
        direction,
    }
}

/// Try to match `word` starting at a cell and heading in one direction.
///
/// Comparison is case-insensitive and every coordinate wraps, so a word may
/// cross any edge (and may cross it several times). An empty word never
/// matches.
pub fn search_word_in_direction(
    grid: &Grid,
    start_row: usize,
    start_col: usize,
    direction: Direction,
    word: &str,
) -> Option<WordPosition> {
    if word.is_empty() {
        return None;
    }

    let pattern = fold_word(word);
    if !walk(grid, start_row, start_col, direction, &pattern) {
        return None;
    }

    let pos = matched(grid, word, start_row, start_col, direction, pattern.len());
    trace!(word, direction = %direction, "match {:?} -> {:?}", pos.start(), pos.end());
    Some(pos)
}

/// Find every match of `word` starting in a row range.
///
/// Results are in row-major order, then column, then direction-table order.
/// A cell can yield up to eight matches; nothing is deduplicated.
pub fn search_word_in_range(grid: &Grid, word: &str, range: RowRange) -> Vec<WordPosition> {
    let mut found = Vec::new();
    if word.is_empty() {
        return found;
    }

    let pattern = fold_word(word);
    let end = range.end.min(grid.rows());

    for row in range.start..end {
        for col in 0..grid.cols() {
            // Cheap first-letter reject before trying all eight directions
            if fold(grid.letter_at(row, col)) != pattern[0] {
                continue;
            }
            for direction in Direction::ALL {
                if walk(grid, row, col, direction, &pattern) {
                    found.push(matched(grid, word, row, col, direction, pattern.len()));
                }
            }
        }
    }

    found
}

/// Search every word over one worker's row range.
///
/// `max_results` is an explicit cap on the number of matches this worker may
/// hold; exceeding it fails the run instead of truncating.
pub fn search_words(
    grid: &Grid,
    words: &[String],
    range: RowRange,
    rank: usize,
    max_results: Option<usize>,
) -> SearchResult<ProcessResults> {
    let mut results = ProcessResults::new(rank);

    for word in words {
        let found = search_word_in_range(grid, word, range);
        debug!(rank, word = %word, found = found.len(), "searched rows {}..{}", range.start, range.end);
        results.extend(found);

        if let Some(limit) = max_results {
            if results.valid_results > limit {
                return Err(SearchError::ResultLimitExceeded { rank, limit });
            }
        }
    }

    Ok(results)
}
