//! Unified error type for the server crate.

use camelot_protocol::ProtocolError;

use crate::NetError;

/// Top-level error for running the server.
///
/// Only transport-facing failures surface here: lobby and rules errors
/// are answered to the client as `Response::Error` and never escape the
/// service. `#[from]` lets `?` convert layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum CamelotError {
    /// A socket-level error (bind, accept, send, recv).
    #[error(transparent)]
    Net(#[from] NetError),

    /// An encode/decode error while answering a client.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
