//! Toroidal letter grid with a highlight overlay
//!
//! Both matrices live in flat buffers of `rows * cols` cells indexed by
//! `row * cols + col`. Letters are written while the grid is loaded and only
//! read afterwards; the overlay starts blank (`None`) and is filled in by
//! [`Grid::highlight_word`].

use crate::error::{InputError, SearchError, SearchResult};
use crate::grid::types::WordPosition;
use tracing::trace;

/// Letter stored in cells the input never supplied (short lines)
pub const FILLER: char = ' ';

/// Toroidal letter grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    letters: Vec<char>,
    highlighted: Vec<Option<char>>,
}

impl Grid {
    /// Allocate a `rows x cols` grid filled with [`FILLER`] and a blank overlay
    pub fn create(rows: usize, cols: usize) -> SearchResult<Self> {
        let alloc_err = || SearchError::Allocation { rows, cols };

        if rows == 0 || cols == 0 {
            return Err(alloc_err());
        }
        let cells = rows.checked_mul(cols).ok_or_else(alloc_err)?;

        let mut letters = Vec::new();
        letters.try_reserve_exact(cells).map_err(|_| alloc_err())?;
        letters.resize(cells, FILLER);

        let mut highlighted = Vec::new();
        highlighted.try_reserve_exact(cells).map_err(|_| alloc_err())?;
        highlighted.resize(cells, None);

        Ok(Self {
            rows,
            cols,
            letters,
            highlighted,
        })
    }

    /// Build a grid from rows of letters; the widest row sets the column count
    pub fn from_rows<R: AsRef<[char]>>(rows: &[R]) -> SearchResult<Self> {
        let cols = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut grid = Self::create(rows.len(), cols)?;
        for (i, row) in rows.iter().enumerate() {
            grid.load_row(i, row.as_ref())?;
        }
        Ok(grid)
    }

    /// Copy letters into a row. Extra letters beyond `cols` are ignored and
    /// missing trailing cells keep their current content.
    pub fn load_row(&mut self, row: usize, letters: &[char]) -> SearchResult<()> {
        if row >= self.rows {
            return Err(InputError::RowOutOfRange {
                row,
                rows: self.rows,
            }
            .into());
        }
        let n = letters.len().min(self.cols);
        let start = row * self.cols;
        self.letters[start..start + n].copy_from_slice(&letters[..n]);
        Ok(())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True iff `0 <= row < rows` and `0 <= col < cols`
    pub fn is_valid_position(&self, row: isize, col: isize) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    /// Wrap arbitrary signed coordinates onto the torus
    #[inline]
    pub fn wrap(&self, row: isize, col: isize) -> (usize, usize) {
        (
            row.rem_euclid(self.rows as isize) as usize,
            col.rem_euclid(self.cols as isize) as usize,
        )
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Letter at a position already inside the grid. Callers wrap first.
    #[inline]
    pub(crate) fn letter_at(&self, row: usize, col: usize) -> char {
        self.letters[self.index(row, col)]
    }

    /// Letter at a position; coordinates wrap onto the torus
    pub fn letter(&self, row: usize, col: usize) -> char {
        self.letters[self.index(row % self.rows, col % self.cols)]
    }

    /// Overlay entry at a position; coordinates wrap onto the torus
    pub fn highlight(&self, row: usize, col: usize) -> Option<char> {
        self.highlighted[self.index(row % self.rows, col % self.cols)]
    }

    pub fn is_highlighted(&self, row: usize, col: usize) -> bool {
        self.highlight(row, col).is_some()
    }

    /// Letters of one row; the row index wraps onto the torus
    pub fn row_letters(&self, row: usize) -> &[char] {
        let start = (row % self.rows) * self.cols;
        &self.letters[start..start + self.cols]
    }

    /// Number of highlighted cells
    pub fn highlighted_count(&self) -> usize {
        self.highlighted.iter().filter(|h| h.is_some()).count()
    }

    /// Mark every cell of a match in the overlay.
    ///
    /// Walks the word's length from the start along the match direction,
    /// wrapping at every step, so it visits exactly the cells the matcher
    /// compared. Applying the same position twice changes nothing.
    pub fn highlight_word(&mut self, pos: &WordPosition) {
        let len = pos.len();
        if len == 0 {
            return;
        }

        let (mut row, mut col) = self.wrap(pos.start_row as isize, pos.start_col as isize);

        if len == 1 {
            let idx = self.index(row, col);
            self.highlighted[idx] = Some(self.letters[idx]);
            return;
        }

        let (d_row, d_col) = pos.direction.delta();
        trace!(
            word = %pos.word,
            direction = %pos.direction,
            "highlighting ({},{}) to ({},{})",
            pos.start_row,
            pos.start_col,
            pos.end_row,
            pos.end_col
        );

        for _ in 0..len {
            let idx = self.index(row, col);
            self.highlighted[idx] = Some(self.letters[idx]);
            (row, col) = self.wrap(row as isize + d_row, col as isize + d_col);
        }
    }

    /// Reset the overlay to blank
    pub fn clear_highlights(&mut self) {
        self.highlighted.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    fn abc_grid() -> Grid {
        Grid::from_rows(&[
            vec!['a', 'b', 'c'],
            vec!['d', 'e', 'f'],
            vec!['g', 'h', 'i'],
        ])
        .unwrap()
    }

    fn position(word: &str, start: (usize, usize), end: (usize, usize), dir: Direction) -> WordPosition {
        WordPosition {
            word: word.to_string(),
            start_row: start.0,
            start_col: start.1,
            end_row: end.0,
            end_col: end.1,
            direction: dir,
        }
    }

    #[test]
    fn test_create_rejects_empty_dimensions() {
        assert!(matches!(
            Grid::create(0, 3),
            Err(SearchError::Allocation { rows: 0, cols: 3 })
        ));
        assert!(matches!(Grid::create(3, 0), Err(SearchError::Allocation { .. })));
    }

    #[test]
    fn test_create_rejects_overflowing_dimensions() {
        assert!(matches!(
            Grid::create(usize::MAX, 2),
            Err(SearchError::Allocation { .. })
        ));
    }

    #[test]
    fn test_create_starts_blank() {
        let grid = Grid::create(2, 3).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.highlighted_count(), 0);
        assert_eq!(grid.letter(1, 2), FILLER);
    }

    #[test]
    fn test_short_rows_keep_filler() {
        let grid = Grid::from_rows(&[vec!['a', 'b', 'c'], vec!['d']]).unwrap();
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.row_letters(1), &['d', FILLER, FILLER]);
    }

    #[test]
    fn test_load_row_out_of_range() {
        let mut grid = Grid::create(1, 1).unwrap();
        let err = grid.load_row(1, &['x']).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Input(InputError::RowOutOfRange { row: 1, rows: 1 })
        ));
    }

    #[test]
    fn test_is_valid_position() {
        let grid = abc_grid();
        assert!(grid.is_valid_position(0, 0));
        assert!(grid.is_valid_position(2, 2));
        assert!(!grid.is_valid_position(-1, 0));
        assert!(!grid.is_valid_position(0, 3));
        assert!(!grid.is_valid_position(3, 1));
    }

    #[test]
    fn test_accessors_wrap_out_of_range_coordinates() {
        let mut grid = abc_grid();
        assert_eq!(grid.letter(0, 3), 'a');
        assert_eq!(grid.letter(3, 4), 'b');
        assert_eq!(grid.letter(7, 8), 'f');
        assert_eq!(grid.row_letters(4), &['d', 'e', 'f']);

        grid.highlight_word(&WordPosition {
            word: "a".to_string(),
            start_row: 0,
            start_col: 0,
            end_row: 0,
            end_col: 0,
            direction: Direction::Right,
        });
        assert!(grid.is_highlighted(0, 3));
        assert!(grid.is_highlighted(3, 0));
        assert_eq!(grid.highlight(3, 3), Some('a'));
        assert!(!grid.is_highlighted(0, 4));
    }

    #[test]
    fn test_wrap_negative_and_multiple_laps() {
        let grid = abc_grid();
        assert_eq!(grid.wrap(-1, -1), (2, 2));
        assert_eq!(grid.wrap(7, -8), (1, 1));
        assert_eq!(grid.wrap(3, 3), (0, 0));
    }

    #[test]
    fn test_highlight_wraps_right_edge() {
        let mut grid = abc_grid();
        grid.highlight_word(&position("ca", (0, 2), (0, 0), Direction::Right));

        assert_eq!(grid.highlight(0, 2), Some('c'));
        assert_eq!(grid.highlight(0, 0), Some('a'));
        assert!(!grid.is_highlighted(0, 1));
        assert_eq!(grid.highlighted_count(), 2);
    }

    #[test]
    fn test_highlight_follows_direction_on_even_dimension() {
        // LEFT from col 0 on a 4-wide grid ends at col 2, but through col 3
        let mut grid = Grid::from_rows(&[vec!['a', 'b', 'c', 'd']]).unwrap();
        grid.highlight_word(&position("adc", (0, 0), (0, 2), Direction::Left));

        assert!(grid.is_highlighted(0, 0));
        assert!(grid.is_highlighted(0, 3));
        assert!(grid.is_highlighted(0, 2));
        assert!(!grid.is_highlighted(0, 1));
    }

    #[test]
    fn test_highlight_single_letter() {
        let mut grid = abc_grid();
        grid.highlight_word(&position("e", (1, 1), (1, 1), Direction::DownRight));
        assert_eq!(grid.highlighted_count(), 1);
        assert_eq!(grid.highlight(1, 1), Some('e'));
    }

    #[test]
    fn test_highlight_empty_word_is_noop() {
        let mut grid = abc_grid();
        grid.highlight_word(&position("", (1, 1), (1, 1), Direction::Up));
        assert_eq!(grid.highlighted_count(), 0);
    }

    #[test]
    fn test_highlight_idempotent() {
        let pos = position("aei", (0, 0), (2, 2), Direction::DownRight);

        let mut once = abc_grid();
        once.highlight_word(&pos);

        let mut twice = abc_grid();
        twice.highlight_word(&pos);
        twice.highlight_word(&pos);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_clear_highlights() {
        let mut grid = abc_grid();
        grid.highlight_word(&position("abc", (0, 0), (0, 2), Direction::Right));
        assert_eq!(grid.highlighted_count(), 3);
        grid.clear_highlights();
        assert_eq!(grid.highlighted_count(), 0);
    }
}
