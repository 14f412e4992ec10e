//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding messages.
///
/// A `ProtocolError` always means the problem is in serialization, not
/// in networking or lobby state — each layer keeps its own error enum.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serializing a message to bytes failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The bytes were malformed, truncated, or the wrong shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message parsed but violates the protocol — e.g. an empty
    /// player name where one is required.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
