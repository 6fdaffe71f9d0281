//! Scatter/gather search run
//!
//! A run has a fixed set of workers. Rank 0 (the initiator) loads the puzzle,
//! broadcasts it, searches its own slice and gathers everyone's matches.
//! Every other rank (a participant) rebuilds the grid from the broadcast,
//! searches its slice and sends its matches back. Both roles use the same
//! message sequence:
//!
//! 1. `Header { rows, cols, word_count }`
//! 2. one `GridRow` per row, in order
//! 3. one `Word` per word, in order
//!
//! Any failure is fatal: the failing worker sends `Abort` and the run stops.

use crate::aggregate::{aggregate, SearchReport};
use crate::cluster::protocol::Message;
use crate::cluster::transport::{connect, Endpoint, INITIATOR};
use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::grid::Grid;
use crate::input::{read_puzzle, Puzzle};
use crate::search::{partition, search_words};
use std::io::BufRead;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;
use tracing::{debug, debug_span, error, info};

/// Read a puzzle from `source` and run the distributed search
pub fn run<R: BufRead>(config: &SearchConfig, source: R) -> SearchResult<SearchReport> {
    run_with(config, |config| read_puzzle(source, config))
}

/// Run the distributed search over an already loaded puzzle
pub fn search_puzzle(config: &SearchConfig, puzzle: Puzzle) -> SearchResult<SearchReport> {
    run_with(config, move |_| Ok(puzzle))
}

/// Launch the workers and drive a run. `load` executes on the initiator and
/// its time counts toward the run's elapsed time.
fn run_with<F>(config: &SearchConfig, load: F) -> SearchResult<SearchReport>
where
    F: FnOnce(&SearchConfig) -> SearchResult<Puzzle>,
{
    let started = Instant::now();
    let (initiator, participants) = connect(config.workers);
    info!(workers = config.workers.get(), "starting search run");

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(participants.len());
        for endpoint in participants {
            let rank = endpoint.rank();
            let max_results = config.max_results;
            let handle = thread::Builder::new()
                .name(format!("worker-{}", rank))
                .spawn_scoped(scope, move || run_participant(endpoint, max_results))?;
            handles.push((rank, handle));
        }

        let outcome = run_initiator(&initiator, config, load, started);
        // Participants blocked on a broadcast see a disconnect once this drops
        drop(initiator);

        let mut participant_error = None;
        for (rank, handle) in handles {
            let result = handle
                .join()
                .unwrap_or(Err(SearchError::WorkerLost { rank }));
            if let Err(e) = result {
                error!(rank, "worker failed: {}", e);
                participant_error.get_or_insert(e);
            }
        }

        first_failure(outcome, participant_error)
    })
}

/// Pick the error that explains a failed run. A participant that quit makes
/// the initiator see `WorkerLost`; the participant's own error says why.
fn first_failure<T>(
    initiator: SearchResult<T>,
    participant_error: Option<SearchError>,
) -> SearchResult<T> {
    match (initiator, participant_error) {
        (Err(SearchError::WorkerLost { .. }), Some(cause)) => Err(cause),
        (Err(e), _) => Err(e),
        (Ok(_), Some(e)) => Err(e),
        (Ok(value), None) => Ok(value),
    }
}

/// Rank 0: load, broadcast, search, gather, aggregate
fn run_initiator<F>(
    endpoint: &Endpoint,
    config: &SearchConfig,
    load: F,
    started: Instant,
) -> SearchResult<SearchReport>
where
    F: FnOnce(&SearchConfig) -> SearchResult<Puzzle>,
{
    let _span = debug_span!("worker", rank = INITIATOR).entered();

    let puzzle = match load(config) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            // Nothing has been broadcast yet; release the participants
            endpoint.abort(&e.to_string());
            return Err(e);
        }
    };

    distribute(endpoint, &puzzle)?;

    let range = partition(INITIATOR, config.workers, puzzle.grid.rows());
    debug!("assigned rows {}..{}", range.start, range.end);

    let local = match search_words(
        &puzzle.grid,
        &puzzle.words,
        range,
        INITIATOR,
        config.max_results,
    ) {
        Ok(local) => local,
        Err(e) => {
            endpoint.abort(&e.to_string());
            return Err(e);
        }
    };

    let gathered = endpoint
        .gather(local)?
        .ok_or_else(|| SearchError::Protocol("initiator received no results".to_string()))?;
    let elapsed = started.elapsed();

    Ok(aggregate(
        puzzle.grid,
        puzzle.words,
        gathered,
        elapsed,
        config.workers.get(),
    ))
}

/// Broadcast dimensions, rows and words in protocol order
pub fn distribute(endpoint: &Endpoint, puzzle: &Puzzle) -> SearchResult<()> {
    let grid = &puzzle.grid;
    endpoint.broadcast(&Message::Header {
        rows: grid.rows(),
        cols: grid.cols(),
        word_count: puzzle.words.len(),
    })?;

    for index in 0..grid.rows() {
        endpoint.broadcast(&Message::GridRow {
            index,
            letters: grid.row_letters(index).iter().collect(),
        })?;
    }

    for (index, text) in puzzle.words.iter().enumerate() {
        endpoint.broadcast(&Message::Word {
            index,
            text: text.clone(),
        })?;
    }

    debug!(
        rows = grid.rows(),
        words = puzzle.words.len(),
        peers = endpoint.size() - 1,
        "broadcast complete"
    );
    Ok(())
}

/// Ranks 1..n: receive, search, send results
fn run_participant(endpoint: Endpoint, max_results: Option<usize>) -> SearchResult<()> {
    let rank = endpoint.rank();
    let _span = debug_span!("worker", rank).entered();

    let puzzle = match receive_puzzle(&endpoint) {
        Ok(puzzle) => puzzle,
        // The initiator is already gone or stopping; nobody to tell
        Err(e @ (SearchError::WorkerAborted { .. } | SearchError::WorkerLost { .. })) => {
            return Err(e);
        }
        Err(e) => {
            endpoint.abort(&e.to_string());
            return Err(e);
        }
    };

    // Size is always non-zero for a connected endpoint
    let workers = NonZeroUsize::new(endpoint.size()).unwrap_or(NonZeroUsize::MIN);
    let range = partition(rank, workers, puzzle.grid.rows());
    debug!("assigned rows {}..{}", range.start, range.end);

    match search_words(&puzzle.grid, &puzzle.words, range, rank, max_results) {
        Ok(local) => {
            endpoint.gather(local)?;
            Ok(())
        }
        Err(e) => {
            endpoint.abort(&e.to_string());
            Err(e)
        }
    }
}

/// Rebuild the puzzle from the broadcast sequence
pub fn receive_puzzle(endpoint: &Endpoint) -> SearchResult<Puzzle> {
    let (rows, cols, word_count) = match endpoint.receive_broadcast()? {
        Message::Header {
            rows,
            cols,
            word_count,
        } => (rows, cols, word_count),
        Message::Abort { rank, reason } => return Err(SearchError::WorkerAborted { rank, reason }),
        other => return Err(unexpected("Header", &other)),
    };

    let mut grid = Grid::create(rows, cols)?;

    for expected in 0..rows {
        match endpoint.receive_broadcast()? {
            Message::GridRow { index, letters } if index == expected => {
                let letters: Vec<char> = letters.chars().collect();
                grid.load_row(index, &letters)?;
            }
            Message::Abort { rank, reason } => {
                return Err(SearchError::WorkerAborted { rank, reason });
            }
            other => return Err(unexpected("GridRow", &other)),
        }
    }

    let mut words = Vec::with_capacity(word_count);
    for expected in 0..word_count {
        match endpoint.receive_broadcast()? {
            Message::Word { index, text } if index == expected => words.push(text),
            Message::Abort { rank, reason } => {
                return Err(SearchError::WorkerAborted { rank, reason });
            }
            other => return Err(unexpected("Word", &other)),
        }
    }

    debug!(rows, cols, words = words.len(), "puzzle received");
    Ok(Puzzle { grid, words })
}

fn unexpected(expected: &str, got: &Message) -> SearchError {
    SearchError::Protocol(format!("expected {}, received {}", expected, got.kind()))
}
