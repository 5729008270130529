//! Error types for the protocol layer.

use windward_transport::TransportError;

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a message into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a message).
    ///
    /// Common causes: malformed JSON, missing required fields, or a
    /// truncated frame.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message is invalid at the protocol level — it decoded fine
    /// but violates a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// A reply arrived whose tag is neither the expected tag, the
    /// wildcard, nor `Error`.
    ///
    /// This means the client and server have desynchronized: we asked
    /// one question and got the answer to another. There is no safe way
    /// to keep going, so callers must treat this as fatal rather than
    /// retry or ignore it.
    #[error("unexpected reply: expected tag {expected:?}, got {received}")]
    UnexpectedReply {
        expected: String,
        received: String,
    },

    /// The underlying connection failed while asking or telling.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
