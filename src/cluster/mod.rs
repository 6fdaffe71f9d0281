//! Scatter/gather coordination across a fixed set of workers
//!
//! - [`protocol`] - wire messages and length-prefixed JSON framing
//! - [`transport`] - per-rank endpoints over channels (broadcast, gather, abort)
//! - [`coordinator`] - initiator and participant roles for one search run

pub mod coordinator;
pub mod protocol;
pub mod transport;

pub use coordinator::{run, search_puzzle};
pub use protocol::Message;
pub use transport::{connect, Endpoint};
