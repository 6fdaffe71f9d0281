//! Puzzle reader
//!
//! Input format:
//!
//! ```text
//! c a t x
//! d o g y
//!
//! Palavras:
//! cat, dog
//! ```
//!
//! Grid lines come first, one row per line, cells separated by whitespace
//! (only the first character of each token is kept). The grid ends at a
//! blank line or at a line containing `Palavras:`. A line holding only
//! whitespace counts as blank: it would otherwise load as a row with no
//! letters. The line after the marker holds the words, separated by commas
//! and/or spaces.

use crate::config::SearchConfig;
use crate::error::{InputError, SearchResult};
use crate::grid::Grid;
use std::io::BufRead;
use tracing::{debug, warn};

/// Marker line introducing the word list
pub const WORDS_MARKER: &str = "Palavras:";

/// A grid plus the words to look for
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub grid: Grid,
    pub words: Vec<String>,
}

/// Read a puzzle from a buffered stream
pub fn read_puzzle<R: BufRead>(reader: R, config: &SearchConfig) -> SearchResult<Puzzle> {
    let mut lines = reader.lines();
    let mut rows: Vec<Vec<char>> = Vec::new();
    let mut ended_on_marker = None;

    for line in lines.by_ref() {
        let line = line?;
        let line = line.trim_end_matches('\r');

        if let Some(idx) = line.find(WORDS_MARKER) {
            ended_on_marker = Some(line[idx + WORDS_MARKER.len()..].to_string());
            break;
        }
        if line.trim().is_empty() {
            break;
        }

        rows.push(
            line.split_whitespace()
                .filter_map(|token| token.chars().next())
                .collect(),
        );
    }

    if rows.is_empty() {
        return Err(InputError::EmptyPuzzle.into());
    }

    let word_line = match ended_on_marker {
        Some(rest) if !rest.trim().is_empty() => Some(rest),
        Some(_) => lines.next().transpose()?,
        None => {
            // Skip ahead to the marker, then take the line after it
            let mut found = None;
            while let Some(line) = lines.next() {
                let line = line?;
                if let Some(idx) = line.find(WORDS_MARKER) {
                    let rest = line[idx + WORDS_MARKER.len()..].to_string();
                    found = if rest.trim().is_empty() {
                        lines.next().transpose()?
                    } else {
                        Some(rest)
                    };
                    break;
                }
            }
            found
        }
    };

    let words = parse_words(
        word_line.as_deref().ok_or(InputError::MissingWords)?,
        config,
    )?;

    let grid = Grid::from_rows(&rows)?;
    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        words = words.len(),
        "puzzle loaded"
    );

    Ok(Puzzle { grid, words })
}

/// Split a word line on commas and spaces, enforcing the configured limits
pub fn parse_words(line: &str, config: &SearchConfig) -> SearchResult<Vec<String>> {
    let mut words: Vec<String> = line
        .split([' ', ','])
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    if words.is_empty() {
        return Err(InputError::MissingWords.into());
    }

    if let Some(word) = words
        .iter()
        .find(|w| w.chars().count() > config.max_word_len)
    {
        return Err(InputError::WordTooLong {
            word: word.clone(),
            max: config.max_word_len,
        }
        .into());
    }

    if words.len() > config.max_words {
        warn!(
            "word list has {} words, only the first {} are searched",
            words.len(),
            config.max_words
        );
        words.truncate(config.max_words);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use std::io::Cursor;

    fn read(text: &str) -> SearchResult<Puzzle> {
        read_puzzle(Cursor::new(text), &SearchConfig::default())
    }

    #[test]
    fn test_blank_line_then_marker() {
        let puzzle = read("c a t\nd o g\n\nPalavras:\ncat, dog\n").unwrap();
        assert_eq!(puzzle.grid.rows(), 2);
        assert_eq!(puzzle.grid.cols(), 3);
        assert_eq!(puzzle.grid.letter(1, 1), 'o');
        assert_eq!(puzzle.words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_whitespace_only_line_ends_grid() {
        let puzzle = read("a b\n   \t\nc d\nPalavras:\nab\n").unwrap();
        assert_eq!(puzzle.grid.rows(), 1);
        assert_eq!(puzzle.grid.row_letters(0), &['a', 'b']);
        assert_eq!(puzzle.words, vec!["ab"]);
    }

    #[test]
    fn test_marker_ends_grid() {
        let puzzle = read("c a t\nd o g\nPalavras:\ncat dog\n").unwrap();
        assert_eq!(puzzle.grid.rows(), 2);
        assert_eq!(puzzle.words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_words_on_marker_line() {
        let puzzle = read("a b\nc d\nPalavras: ab,cd\n").unwrap();
        assert_eq!(puzzle.words, vec!["ab", "cd"]);
    }

    #[test]
    fn test_first_char_of_each_token() {
        let puzzle = read("dog cat\nxyz abc\n\nPalavras:\ndo\n").unwrap();
        assert_eq!(puzzle.grid.row_letters(0), &['d', 'c']);
        assert_eq!(puzzle.grid.row_letters(1), &['x', 'a']);
    }

    #[test]
    fn test_ragged_rows_use_longest() {
        let puzzle = read("a b c d\ne f\r\n\nPalavras:\nab\n").unwrap();
        assert_eq!(puzzle.grid.cols(), 4);
        assert_eq!(puzzle.grid.letter(1, 1), 'f');
    }

    #[test]
    fn test_word_separators() {
        let words = parse_words("  cat,dog ,  bird\tfish,,", &SearchConfig::default()).unwrap();
        assert_eq!(words, vec!["cat", "dog", "bird\tfish"]);
    }

    #[test]
    fn test_empty_puzzle() {
        assert!(matches!(
            read(""),
            Err(SearchError::Input(InputError::EmptyPuzzle))
        ));
        assert!(matches!(
            read("\nPalavras:\ncat\n"),
            Err(SearchError::Input(InputError::EmptyPuzzle))
        ));
    }

    #[test]
    fn test_missing_words() {
        assert!(matches!(
            read("a b\n"),
            Err(SearchError::Input(InputError::MissingWords))
        ));
        assert!(matches!(
            read("a b\n\nPalavras:\n"),
            Err(SearchError::Input(InputError::MissingWords))
        ));
        assert!(matches!(
            read("a b\n\nPalavras:\n , ,\n"),
            Err(SearchError::Input(InputError::MissingWords))
        ));
    }

    #[test]
    fn test_word_too_long() {
        let config = SearchConfig {
            max_word_len: 3,
            ..Default::default()
        };
        let err = parse_words("cat, horse", &config).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Input(InputError::WordTooLong { ref word, max: 3 }) if word == "horse"
        ));
    }

    #[test]
    fn test_word_count_truncated() {
        let config = SearchConfig {
            max_words: 2,
            ..Default::default()
        };
        let words = parse_words("a b c d", &config).unwrap();
        assert_eq!(words, vec!["a", "b"]);
    }
}
