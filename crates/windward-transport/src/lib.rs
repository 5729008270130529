//! Transport abstraction layer for Windward.
//!
//! Provides the [`Connection`] and [`Connector`] traits that the session
//! layer builds on. A `Connection` is one bidirectional, message-oriented
//! channel to a single remote endpoint; a `Connector` knows how to open
//! one. The game client opens connections outward — to a locally launched
//! server, to a remote host, or to the server directory — so the dial
//! seam is a trait and tests can substitute scripted connections.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketConnector};

/// A single connection that can send and receive framed byte messages.
///
/// Every connection carries a caller-supplied identity label which shows
/// up in logs ("client-3f92:Alice"); it has no protocol meaning.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one framed message to the remote peer.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receives the next message from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Closes the connection. Idempotent: closing an already closed
    /// connection succeeds without touching the socket again.
    async fn close(&self) -> Result<(), Self::Error>;

    /// Returns the identity label this connection was opened under.
    fn label(&self) -> &str;
}

/// Opens outbound connections to a `host:port` endpoint.
pub trait Connector: Send + Sync + 'static {
    /// The connection type produced by this connector.
    type Conn: Connection;

    /// Dials the endpoint and returns an open connection.
    async fn connect(
        &self,
        label: &str,
        host: &str,
        port: u16,
    ) -> Result<Self::Conn, TransportError>;
}
