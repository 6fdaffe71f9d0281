//! # wordgrid - Parallel Toroidal Word Search
//!
//! Finds words hidden in a letter grid whose edges wrap around, in all eight
//! directions, by splitting the rows across a fixed set of workers.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`grid`] - Grid storage, directions and match records
//! - [`search`] - Directional matcher and row partitioning
//! - [`cluster`] - Worker transport and the scatter/gather run
//! - [`aggregate`] - Merging gathered matches into the final report
//! - [`input`] - Puzzle reader
//! - [`output`] - Terminal rendering, text/HTML export, JSON report
//! - [`generator`] - Random puzzle generation
//! - [`utils`] - Progress spinner
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::io::Cursor;
//! use wordgrid::{run, SearchConfig};
//!
//! let puzzle = "c a t\nx y z\n\nPalavras:\ncat\n";
//! let config = SearchConfig::with_workers(2).unwrap();
//! let report = run(&config, Cursor::new(puzzle)).unwrap();
//!
//! for pos in &report.positions {
//!     println!("{}", pos);
//! }
//! ```
//!
//! ## Search model
//!
//! Every cell is a candidate start and every direction is tried, with row and
//! column indices taken modulo the grid size. Workers own contiguous row
//! ranges of starting cells but read the whole grid, so matches crossing a
//! range boundary are found by the worker owning the start.

pub mod aggregate;
pub mod cluster;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod input;
pub mod output;
pub mod search;
pub mod utils;

pub use aggregate::{SearchReport, Summary};
pub use cluster::{run, search_puzzle};
pub use config::SearchConfig;
pub use error::{InputError, SearchError, SearchResult};
pub use grid::{Direction, Grid, WordPosition};
pub use input::{read_puzzle, Puzzle};
