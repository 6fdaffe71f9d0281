//! Contiguous row partitioning across workers
//!
//! Each worker computes its own range from (ordinal, worker count, rows) alone,
//! so every process arrives at the same split without talking to its peers.

use crate::grid::RowRange;
use std::num::NonZeroUsize;

/// Row range owned by worker `ordinal` out of `workers`.
///
/// `base = rows / workers` and the first `rows % workers` workers take one
/// extra row. Workers past the last row get an empty range, which is valid.
pub fn partition(ordinal: usize, workers: NonZeroUsize, total_rows: usize) -> RowRange {
    let count = workers.get();
    debug_assert!(ordinal < count, "ordinal {} out of {} workers", ordinal, count);

    let base = total_rows / count;
    let extra = total_rows % count;

    let start = (ordinal * base + ordinal.min(extra)).min(total_rows);
    let end = (start + base + usize::from(ordinal < extra)).min(total_rows);

    RowRange { start, end }
}

/// Ranges for every worker, in ordinal order
pub fn partition_all(workers: NonZeroUsize, total_rows: usize) -> Vec<RowRange> {
    (0..workers.get())
        .map(|ordinal| partition(ordinal, workers, total_rows))
        .collect()
}
