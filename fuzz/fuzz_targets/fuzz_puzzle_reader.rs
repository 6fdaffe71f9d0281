#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use wordgrid::grid::RowRange;
use wordgrid::{read_puzzle, SearchConfig};

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must produce a puzzle or an error, never a panic
    let config = SearchConfig::default();
    let Ok(puzzle) = read_puzzle(Cursor::new(data), &config) else {
        return;
    };

    // Keep each run small; the walk itself is what matters here
    let rows = puzzle.grid.rows().min(8);
    let range = RowRange { start: 0, end: rows };
    let _ = wordgrid::search::search_words(&puzzle.grid, &puzzle.words, range, 0, None);
});
