//! Merge gathered results into the final report

use crate::grid::{Grid, ProcessResults, WordPosition};
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use std::time::Duration;
use tracing::debug;

/// Elapsed times below this are treated as zero when computing throughput
const MIN_MEASURABLE: Duration = Duration::from_micros(1);

/// Performance summary for a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Total matches across all workers
    pub matches: usize,
    /// Start of the initiator's read to the end of gather
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Matches per second; `None` when elapsed time is too small to measure
    pub throughput: Option<f64>,
    pub workers: usize,
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

impl Summary {
    pub fn new(matches: usize, elapsed: Duration, workers: usize) -> Self {
        let throughput = if elapsed < MIN_MEASURABLE {
            None
        } else {
            Some(matches as f64 / elapsed.as_secs_f64())
        };
        Self {
            matches,
            elapsed,
            throughput,
            workers,
        }
    }
}

/// Everything the initiator knows after a run
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Grid with every match highlighted
    pub grid: Grid,
    /// Words that were searched, in input order
    pub words: Vec<String>,
    /// All matches, worker-ordinal order then each worker's own order
    pub positions: Vec<WordPosition>,
    /// Matches contributed by each worker, indexed by rank
    pub per_worker: Vec<usize>,
    pub summary: Summary,
}

impl SearchReport {
    /// Match count per word, in word-list order
    pub fn word_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for pos in &self.positions {
            *counts.entry(pos.word.as_str()).or_insert(0) += 1;
        }
        self.words
            .iter()
            .map(|w| (w.as_str(), counts.get(w.as_str()).copied().unwrap_or(0)))
            .collect()
    }

    /// Words with no match anywhere in the grid
    pub fn missing_words(&self) -> Vec<&str> {
        self.word_counts()
            .into_iter()
            .filter(|&(_, count)| count == 0)
            .map(|(word, _)| word)
            .collect()
    }
}

/// Concatenate gathered results in rank order, highlight every match and
/// summarise the run
pub fn aggregate(
    mut grid: Grid,
    words: Vec<String>,
    mut gathered: Vec<ProcessResults>,
    elapsed: Duration,
    workers: usize,
) -> SearchReport {
    gathered.sort_by_key(|r| r.rank);

    let mut per_worker = vec![0; workers];
    let total: usize = gathered.iter().map(|r| r.positions.len()).sum();
    let mut positions = Vec::with_capacity(total);

    for results in gathered {
        if let Some(count) = per_worker.get_mut(results.rank) {
            *count += results.positions.len();
        }
        positions.extend(results.positions);
    }

    for pos in &positions {
        grid.highlight_word(pos);
    }

    debug!(
        matches = positions.len(),
        highlighted = grid.highlighted_count(),
        "results aggregated"
    );

    SearchReport {
        grid,
        words,
        summary: Summary::new(positions.len(), elapsed, workers),
        positions,
        per_worker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    fn grid() -> Grid {
        Grid::from_rows(&[vec!['c', 'a', 't'], vec!['x', 'y', 'z']]).unwrap()
    }

    fn pos(word: &str, start: (usize, usize), end: (usize, usize), direction: Direction) -> WordPosition {
        WordPosition {
            word: word.to_string(),
            start_row: start.0,
            start_col: start.1,
            end_row: end.0,
            end_col: end.1,
            direction,
        }
    }

    fn results(rank: usize, positions: Vec<WordPosition>) -> ProcessResults {
        ProcessResults {
            rank,
            valid_results: positions.len(),
            total_processed: 2,
            positions,
        }
    }

    #[test]
    fn test_merges_in_rank_order_and_highlights() {
        let gathered = vec![
            results(1, vec![pos("zx", (1, 2), (1, 0), Direction::Right)]),
            results(0, vec![pos("cat", (0, 0), (0, 2), Direction::Right)]),
        ];
        let report = aggregate(
            grid(),
            vec!["cat".to_string(), "zx".to_string(), "dog".to_string()],
            gathered,
            Duration::from_millis(500),
            2,
        );

        assert_eq!(report.positions[0].word, "cat");
        assert_eq!(report.positions[1].word, "zx");
        assert_eq!(report.per_worker, vec![1, 1]);
        assert_eq!(report.grid.highlighted_count(), 5);
        assert!(!report.grid.is_highlighted(1, 1));
        assert_eq!(report.summary.matches, 2);
        assert_eq!(report.summary.throughput, Some(4.0));
        assert_eq!(report.word_counts(), vec![("cat", 1), ("zx", 1), ("dog", 0)]);
        assert_eq!(report.missing_words(), vec!["dog"]);
    }

    #[test]
    fn test_highlight_order_does_not_matter() {
        let a = pos("cat", (0, 0), (0, 2), Direction::Right);
        let b = pos("ay", (0, 1), (1, 1), Direction::Down);

        let forward = aggregate(grid(), vec![], vec![results(0, vec![a.clone(), b.clone()])], Duration::ZERO, 1);
        let backward = aggregate(grid(), vec![], vec![results(0, vec![b, a])], Duration::ZERO, 1);
        assert_eq!(forward.grid, backward.grid);
    }

    #[test]
    fn test_zero_elapsed_suppresses_throughput() {
        let summary = Summary::new(10, Duration::ZERO, 4);
        assert!(summary.throughput.is_none());
        assert_eq!(summary.workers, 4);
    }

    #[test]
    fn test_summary_serializes_seconds() {
        let value = serde_json::to_value(Summary::new(3, Duration::from_millis(1500), 2)).unwrap();
        assert_eq!(value["matches"], 3);
        assert_eq!(value["elapsed_secs"], 1.5);
        assert_eq!(value["throughput"], 2.0);
        assert_eq!(value["workers"], 2);

        let value = serde_json::to_value(Summary::new(3, Duration::ZERO, 2)).unwrap();
        assert!(value["throughput"].is_null());
    }

    #[test]
    fn test_no_matches() {
        let report = aggregate(grid(), vec!["dog".to_string()], vec![results(0, vec![])], Duration::from_secs(1), 1);
        assert_eq!(report.summary.matches, 0);
        assert_eq!(report.summary.throughput, Some(0.0));
        assert_eq!(report.grid.highlighted_count(), 0);
    }
}
