//! Unified error type for the client crate.

use windward_protocol::ProtocolError;
use windward_session::SessionError;
use windward_transport::TransportError;

use crate::launcher::LaunchError;
use crate::saved::SaveError;

/// Top-level error wrapping the layer-specific errors.
///
/// Internal helpers propagate this with `?`; the controller translates
/// it into an [`ErrorTemplate`](windward_protocol::ErrorTemplate) at
/// the presentation boundary, so no error value ever crosses into the
/// UI.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A transport-level error (dial, send, recv, close).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, unexpected reply).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-state error (invariant violations).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A local server launch error.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// A saved-game read error.
    #[error(transparent)]
    Save(#[from] SaveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Transport(_)));
        assert!(client_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::NotConnected;
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Session(_)));
    }

    #[test]
    fn test_from_launch_error() {
        let err = LaunchError::Failed("port bind".into());
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Launch(_)));
    }
}
