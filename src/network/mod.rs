//! Network Module
//!
//! Blocking TCP transport to the storage server.
//!
//! ## Architecture
//! - One stream connection, owned by the transport
//! - Strict one-at-a-time request/response exchanges
//! - No pipelining, no timeouts, no retry; a stalled peer blocks the caller

mod transport;

pub use transport::Transport;
