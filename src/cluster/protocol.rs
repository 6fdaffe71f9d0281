//! Messages exchanged between workers
//!
//! Uses a simple length-prefixed JSON framing:
//! - 4 bytes (little-endian u32): message length
//! - N bytes: JSON-encoded message
//!
//! Every frame is decoded independently by its receiver, so each worker ends
//! up with its own copy of the grid and word list.

use crate::grid::WordPosition;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read, Write};

/// Largest frame a worker will accept
const MAX_FRAME_LEN: usize = 256 * 1024 * 1024;

/// One message on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// First broadcast: grid dimensions and how many words follow the rows
    Header {
        rows: usize,
        cols: usize,
        word_count: usize,
    },

    /// One grid row, in row order
    GridRow { index: usize, letters: String },

    /// One target word, in list order
    Word { index: usize, text: String },

    /// One batch of a worker's matches, in the worker's own order
    Results {
        rank: usize,
        positions: Vec<WordPosition>,
    },

    /// Last gather message from a worker; counts cover every batch sent
    ResultsEnd {
        rank: usize,
        valid_results: usize,
        total_processed: usize,
    },

    /// Collective abort: the sender cannot continue and the run must stop
    Abort { rank: usize, reason: String },
}

impl Message {
    /// Short name for logs and protocol errors
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Header { .. } => "Header",
            Message::GridRow { .. } => "GridRow",
            Message::Word { .. } => "Word",
            Message::Results { .. } => "Results",
            Message::ResultsEnd { .. } => "ResultsEnd",
            Message::Abort { .. } => "Abort",
        }
    }
}

/// Write a message to a stream with length prefix
pub fn write_message<W: Write>(writer: &mut W, msg: &impl Serialize) -> std::io::Result<()> {
    let json = serde_json::to_vec(msg).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    let len = u32::try_from(json.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, "Message too large")
    })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&json)?;
    writer.flush()?;

    Ok(())
}

/// Read a message from a stream with length prefix
pub fn read_message<R: Read, T: for<'de> Deserialize<'de>>(reader: &mut R) -> std::io::Result<T> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    if len > MAX_FRAME_LEN {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Message too large",
        ));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;

    serde_json::from_slice(&buf).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })
}

/// Encode a message into a standalone frame
pub fn encode(msg: &Message) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_message(&mut buf, msg)?;
    Ok(buf)
}

/// Decode a frame produced by [`encode`]
pub fn decode(frame: &[u8]) -> std::io::Result<Message> {
    read_message(&mut Cursor::new(frame))
}
