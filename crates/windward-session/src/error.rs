//! Error types for the session layer.

/// Errors that can occur while mutating session state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An operation required an open connection and there is none.
    /// Logged-in state strictly implies a live connection; this is the
    /// invariant speaking.
    #[error("session is not connected")]
    NotConnected,
}
