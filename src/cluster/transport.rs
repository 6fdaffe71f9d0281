//! Channel transport between the initiator and its participants
//!
//! Topology is a star: the initiator (rank 0) holds one outbound channel per
//! participant for broadcasts, and every participant holds a sender into a
//! single gather channel owned by the initiator. Frames are encoded bytes, so
//! nothing is shared between workers once a frame has been decoded.

use crate::cluster::protocol::{decode, encode, Message};
use crate::error::{SearchError, SearchResult};
use crate::grid::ProcessResults;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::num::NonZeroUsize;
use tracing::{debug, warn};

/// Encoded message
pub type Frame = Vec<u8>;

/// Rank of the initiator
pub const INITIATOR: usize = 0;

/// Positions per `Results` frame during gather
pub const RESULTS_BATCH: usize = 4096;

enum Link {
    Initiator {
        /// Broadcast channels, index = rank - 1
        peers: Vec<Sender<Frame>>,
        /// Gather inbox, tagged with the sender's rank
        gather: Receiver<(usize, Frame)>,
    },
    Participant {
        inbox: Receiver<Frame>,
        to_initiator: Sender<(usize, Frame)>,
    },
}

/// One worker's view of the world
pub struct Endpoint {
    rank: usize,
    size: usize,
    link: Link,
}

/// Wire up `workers` endpoints. Returns the initiator and the participants
/// (ranks 1..workers) in rank order.
pub fn connect(workers: NonZeroUsize) -> (Endpoint, Vec<Endpoint>) {
    let size = workers.get();
    let (gather_tx, gather_rx) = unbounded();

    let mut peers = Vec::with_capacity(size - 1);
    let mut participants = Vec::with_capacity(size - 1);

    for rank in 1..size {
        let (tx, rx) = unbounded();
        peers.push(tx);
        participants.push(Endpoint {
            rank,
            size,
            link: Link::Participant {
                inbox: rx,
                to_initiator: gather_tx.clone(),
            },
        });
    }
    // Only participants keep gather senders, so the inbox disconnects once
    // every participant is gone
    drop(gather_tx);

    let initiator = Endpoint {
        rank: INITIATOR,
        size,
        link: Link::Initiator {
            peers,
            gather: gather_rx,
        },
    };

    (initiator, participants)
}

impl Endpoint {
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Total number of workers, the initiator included
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_initiator(&self) -> bool {
        matches!(self.link, Link::Initiator { .. })
    }

    /// Send one message to every participant (initiator only)
    pub fn broadcast(&self, msg: &Message) -> SearchResult<()> {
        let Link::Initiator { peers, .. } = &self.link else {
            return Err(SearchError::Protocol(format!(
                "worker {} cannot broadcast {}",
                self.rank,
                msg.kind()
            )));
        };

        let frame = encode(msg)?;
        for (i, tx) in peers.iter().enumerate() {
            tx.send(frame.clone())
                .map_err(|_| SearchError::WorkerLost { rank: i + 1 })?;
        }
        Ok(())
    }

    /// Block until the next broadcast arrives (participants only)
    pub fn receive_broadcast(&self) -> SearchResult<Message> {
        let Link::Participant { inbox, .. } = &self.link else {
            return Err(SearchError::Protocol(
                "the initiator does not receive broadcasts".to_string(),
            ));
        };

        let frame = inbox
            .recv()
            .map_err(|_| SearchError::WorkerLost { rank: INITIATOR })?;
        Ok(decode(&frame)?)
    }

    /// Collect every worker's results at the initiator.
    ///
    /// On the initiator this blocks until all participants have reported and
    /// returns the results ordered by rank. On a participant it sends `local`
    /// in batches of [`RESULTS_BATCH`] positions followed by `ResultsEnd`, and
    /// returns `None`.
    pub fn gather(&self, local: ProcessResults) -> SearchResult<Option<Vec<ProcessResults>>> {
        match &self.link {
            Link::Participant { to_initiator, .. } => {
                let send = |msg: &Message| -> SearchResult<()> {
                    let frame = encode(msg)?;
                    to_initiator
                        .send((self.rank, frame))
                        .map_err(|_| SearchError::WorkerLost { rank: INITIATOR })
                };

                let ProcessResults {
                    positions,
                    valid_results,
                    total_processed,
                    ..
                } = local;

                let mut positions = positions.into_iter();
                loop {
                    let batch: Vec<_> = positions.by_ref().take(RESULTS_BATCH).collect();
                    if batch.is_empty() {
                        break;
                    }
                    send(&Message::Results {
                        rank: self.rank,
                        positions: batch,
                    })?;
                }

                send(&Message::ResultsEnd {
                    rank: self.rank,
                    valid_results,
                    total_processed,
                })?;
                Ok(None)
            }
            Link::Initiator { gather, .. } => {
                let mut slots: Vec<ProcessResults> = (0..self.size).map(ProcessResults::new).collect();
                let mut done = vec![false; self.size];
                slots[INITIATOR] = local;
                done[INITIATOR] = true;
                let mut remaining = self.size - 1;

                while remaining > 0 {
                    let Ok((sender, frame)) = gather.recv() else {
                        let missing = done.iter().position(|d| !d).unwrap_or(INITIATOR);
                        return Err(SearchError::WorkerLost { rank: missing });
                    };

                    match decode(&frame)? {
                        Message::Results { rank, positions } => {
                            self.check_sender(sender, rank, &done)?;
                            slots[rank].positions.extend(positions);
                        }
                        Message::ResultsEnd {
                            rank,
                            valid_results,
                            total_processed,
                        } => {
                            self.check_sender(sender, rank, &done)?;
                            let results = &mut slots[rank];
                            if results.positions.len() != valid_results {
                                return Err(SearchError::Protocol(format!(
                                    "worker {} reported {} results but sent {}",
                                    rank,
                                    valid_results,
                                    results.positions.len()
                                )));
                            }
                            results.valid_results = valid_results;
                            results.total_processed = total_processed;
                            done[rank] = true;
                            remaining -= 1;
                            debug!(rank, matches = valid_results, "gathered results");
                        }
                        Message::Abort { rank, reason } => {
                            return Err(SearchError::WorkerAborted { rank, reason });
                        }
                        other => {
                            return Err(SearchError::Protocol(format!(
                                "worker {} sent {} during gather",
                                sender,
                                other.kind()
                            )));
                        }
                    }
                }

                Ok(Some(slots))
            }
        }
    }

    /// A gather message must come from the rank it names, and only before
    /// that rank's `ResultsEnd`
    fn check_sender(&self, sender: usize, rank: usize, done: &[bool]) -> SearchResult<()> {
        if sender != rank || rank >= self.size || done[rank] {
            return Err(SearchError::Protocol(format!(
                "unexpected results from worker {}",
                sender
            )));
        }
        Ok(())
    }

    /// Tell the rest of the run to stop.
    ///
    /// The initiator broadcasts the abort to every participant; a participant
    /// sends it to the initiator in place of its results. Delivery failures
    /// are ignored since the run is already ending.
    pub fn abort(&self, reason: &str) {
        warn!(rank = self.rank, "aborting run: {}", reason);
        let msg = Message::Abort {
            rank: self.rank,
            reason: reason.to_string(),
        };
        let Ok(frame) = encode(&msg) else {
            return;
        };

        match &self.link {
            Link::Initiator { peers, .. } => {
                for tx in peers {
                    let _ = tx.send(frame.clone());
                }
            }
            Link::Participant { to_initiator, .. } => {
                let _ = to_initiator.send((self.rank, frame));
            }
        }
    }
}
