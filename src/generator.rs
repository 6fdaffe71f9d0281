//! Random puzzle generation
//!
//! Words are placed at random starts and directions with toroidal wrap, so a
//! generated puzzle exercises the same paths the matcher walks. Words may
//! cross as long as the shared cells agree.

use crate::config::{DEFAULT_MAX_WORDS, DEFAULT_MAX_WORD_LEN};
use crate::error::{SearchError, SearchResult};
use crate::grid::{Direction, Grid, WordPosition};
use crate::input::{Puzzle, WORDS_MARKER};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Placement attempts per word before giving up on it
pub const MAX_ATTEMPTS: usize = 1000;

/// A generated puzzle and where its words were hidden
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub grid: Grid,
    /// Every requested word, lowercased, in request order
    pub words: Vec<String>,
    /// Where each placed word was hidden
    pub placed: Vec<WordPosition>,
    /// Words with no free path after [`MAX_ATTEMPTS`] tries
    pub unplaced: Vec<String>,
}

impl GeneratedPuzzle {
    /// Render in the puzzle input format
    pub fn to_puzzle_text(&self) -> String {
        let mut text = String::new();
        for row in 0..self.grid.rows() {
            let letters: Vec<String> = self
                .grid
                .row_letters(row)
                .iter()
                .map(char::to_string)
                .collect();
            text.push_str(&letters.join(" "));
            text.push('\n');
        }
        text.push('\n');
        text.push_str(WORDS_MARKER);
        text.push('\n');
        text.push_str(&self.words.join(", "));
        text.push('\n');
        text
    }

    pub fn into_puzzle(self) -> Puzzle {
        Puzzle {
            grid: self.grid,
            words: self.words,
        }
    }
}

/// Generate a `rows` x `cols` puzzle hiding `words`.
///
/// The same `seed` always yields the same puzzle; `None` draws a fresh one.
pub fn generate_puzzle(
    rows: usize,
    cols: usize,
    words: &[String],
    seed: Option<u64>,
) -> SearchResult<GeneratedPuzzle> {
    if rows == 0 || cols == 0 {
        return Err(SearchError::Configuration(format!(
            "cannot generate a {}x{} puzzle",
            rows, cols
        )));
    }

    let mut grid = Grid::create(rows, cols)?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    debug!(rows, cols, seed, "generating puzzle");

    let words = normalize_words(words)?;

    let mut cells: Vec<Option<char>> = vec![None; rows * cols];
    let mut placed = Vec::with_capacity(words.len());
    let mut unplaced = Vec::new();

    for word in &words {
        match place_word(&grid, &mut cells, word, &mut rng) {
            Some(pos) => placed.push(pos),
            None => {
                warn!(word = word.as_str(), "could not place word");
                unplaced.push(word.clone());
            }
        }
    }

    // Independent stream per row keeps the fill deterministic under rayon
    let fill_seed: u64 = rng.random();
    cells
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, chunk)| {
            let mut row_rng = StdRng::seed_from_u64(fill_seed ^ row as u64);
            for cell in chunk.iter_mut().filter(|c| c.is_none()) {
                *cell = Some(char::from(b'a' + row_rng.random_range(0..26u8)));
            }
        });

    for (row, chunk) in cells.chunks(cols).enumerate() {
        let letters: Vec<char> = chunk.iter().flatten().copied().collect();
        grid.load_row(row, &letters)?;
    }

    Ok(GeneratedPuzzle {
        grid,
        words,
        placed,
        unplaced,
    })
}

/// Lowercase and validate the words so the printed puzzle reads back as
/// the same grid and word list
fn normalize_words(words: &[String]) -> SearchResult<Vec<String>> {
    let words: Vec<String> = words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();

    if words.len() > DEFAULT_MAX_WORDS {
        return Err(SearchError::Configuration(format!(
            "cannot hide more than {} words",
            DEFAULT_MAX_WORDS
        )));
    }

    let marker = WORDS_MARKER.to_lowercase();
    for word in &words {
        if word.chars().any(|c| c.is_whitespace() || c == ',') || word.contains(&marker) {
            return Err(SearchError::Configuration(format!(
                "word '{}' cannot contain whitespace, ',' or '{}'",
                word, WORDS_MARKER
            )));
        }
        if word.chars().count() > DEFAULT_MAX_WORD_LEN {
            return Err(SearchError::Configuration(format!(
                "word '{}' is longer than the maximum of {} letters",
                word, DEFAULT_MAX_WORD_LEN
            )));
        }
    }

    Ok(words)
}

/// Try random starts and directions until `word` fits. Commits the letters
/// to `cells` on success.
fn place_word(
    grid: &Grid,
    cells: &mut [Option<char>],
    word: &str,
    rng: &mut StdRng,
) -> Option<WordPosition> {
    let letters: Vec<char> = word.chars().collect();
    let cols = grid.cols();

    for _ in 0..MAX_ATTEMPTS {
        let start_row = rng.random_range(0..grid.rows());
        let start_col = rng.random_range(0..cols);
        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        let (d_row, d_col) = direction.delta();

        // A long word can cross its own path on a small torus
        let mut staged: FxHashMap<usize, char> = FxHashMap::default();
        let mut end = (start_row, start_col);
        let fits = letters.iter().enumerate().all(|(i, &letter)| {
            let step = i as isize;
            let (r, c) = grid.wrap(
                start_row as isize + step * d_row,
                start_col as isize + step * d_col,
            );
            end = (r, c);
            let index = r * cols + c;
            let free = cells[index].is_none_or(|existing| existing == letter);
            free && *staged.entry(index).or_insert(letter) == letter
        });

        if fits {
            for (index, letter) in staged {
                cells[index] = Some(letter);
            }
            return Some(WordPosition {
                word: word.to_string(),
                start_row,
                start_col,
                end_row: end.0,
                end_col: end.1,
                direction,
            });
        }
    }

    None
}
