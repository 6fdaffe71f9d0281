//! Utility functions shared by the binary and the library.
//!
//! - [`progress`] - Terminal spinner, compiled out without the `progress` feature

pub mod progress;

pub use progress::spinner;
