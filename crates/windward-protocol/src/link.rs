//! Ask/reply correlation over a raw connection.
//!
//! [`MessageLink`] wraps a byte [`Connection`] with a codec and speaks
//! [`Message`]s: `ask` sends a query and awaits the correlated reply,
//! `tell` is fire-and-forget. [`ask_once`] does a whole scoped
//! open-ask-close cycle for one-shot queries (directory lookups,
//! pre-login state probes) so no branch can leak a connection.

use std::time::Duration;

use windward_transport::{Connection, Connector, TransportError};

use crate::{Codec, Message, ProtocolError};

#[cfg(feature = "json")]
use crate::JsonCodec;

/// Tuning for a [`MessageLink`].
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// How long an `ask` waits for its reply before giving up.
    ///
    /// The original protocol had no bound here at all; a hung server
    /// would hang the client forever. A timeout surfaces as a transport
    /// failure (the connection is useless afterwards), not as a
    /// protocol violation.
    pub ask_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            ask_timeout: Duration::from_secs(30),
        }
    }
}

/// A typed message channel over one connection.
pub struct MessageLink<C, K> {
    conn: C,
    codec: K,
    config: LinkConfig,
}

impl<C, K> MessageLink<C, K>
where
    C: Connection<Error = TransportError>,
    K: Codec,
{
    /// Wraps a connection with the default [`LinkConfig`].
    pub fn new(conn: C, codec: K) -> Self {
        Self::with_config(conn, codec, LinkConfig::default())
    }

    /// Wraps a connection with an explicit config.
    pub fn with_config(conn: C, codec: K, config: LinkConfig) -> Self {
        Self { conn, codec, config }
    }

    /// Sends `query` and awaits the correlated reply.
    ///
    /// `expected` is the reply tag to accept, or `None` for the
    /// wildcard (any reply). An `Error` reply is always returned to the
    /// caller regardless of the expected tag — rejections are data, not
    /// defects. Any other tag mismatch means the peers have
    /// desynchronized and comes back as
    /// [`ProtocolError::UnexpectedReply`]; never ignore it.
    pub async fn ask(
        &self,
        query: &Message,
        expected: Option<&str>,
    ) -> Result<Message, ProtocolError> {
        let bytes = self.codec.encode(query)?;
        self.conn.send(&bytes).await?;

        let received =
            tokio::time::timeout(self.config.ask_timeout, self.conn.recv())
                .await
                .map_err(|_| {
                    TransportError::ReceiveFailed(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "timed out waiting for a reply",
                    ))
                })??;

        let Some(data) = received else {
            return Err(ProtocolError::Transport(
                TransportError::ConnectionClosed(
                    "connection closed while waiting for a reply".into(),
                ),
            ));
        };

        let reply: Message = self.codec.decode(&data)?;

        match expected {
            None => Ok(reply),
            Some(t) if reply.tag() == t || reply.is_error() => Ok(reply),
            Some(t) => Err(ProtocolError::UnexpectedReply {
                expected: t.to_string(),
                received: reply.tag().to_string(),
            }),
        }
    }

    /// Sends a message without waiting for any reply.
    pub async fn tell(&self, msg: &Message) -> Result<(), ProtocolError> {
        let bytes = self.codec.encode(msg)?;
        self.conn.send(&bytes).await?;
        Ok(())
    }

    /// Closes the underlying connection. Idempotent.
    pub async fn close(&self) -> Result<(), ProtocolError> {
        self.conn.close().await?;
        Ok(())
    }

    /// The identity label of the underlying connection.
    pub fn label(&self) -> &str {
        self.conn.label()
    }
}

/// Opens a connection, performs one `ask`, and closes again.
///
/// The connection is released on every exit path — connect failure,
/// ask failure, or success — so one-shot queries can never leave a
/// socket behind.
#[cfg(feature = "json")]
pub async fn ask_once<D>(
    connector: &D,
    label: &str,
    host: &str,
    port: u16,
    query: &Message,
    expected: Option<&str>,
) -> Result<Message, ProtocolError>
where
    D: Connector,
    D::Conn: Connection<Error = TransportError>,
{
    let conn = connector.connect(label, host, port).await?;
    let link = MessageLink::new(conn, JsonCodec);
    let reply = link.ask(query, expected).await;
    let _ = link.close().await;
    reply
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
#[cfg(feature = "json")]
mod tests {
    //! The ask matching rules are the contract the whole session layer
    //! leans on, so they get exercised against a scripted connection:
    //! queued replies go out in order, sends are recorded, closes are
    //! counted.

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::types::tag;
    use crate::{ErrorTemplate, ServerState};

    #[derive(Default)]
    struct ScriptInner {
        replies: Mutex<VecDeque<Message>>,
        sent: Mutex<Vec<Message>>,
        closes: AtomicUsize,
    }

    #[derive(Clone, Default)]
    struct ScriptedConnection {
        inner: Arc<ScriptInner>,
    }

    impl ScriptedConnection {
        fn with_replies(replies: Vec<Message>) -> Self {
            let conn = Self::default();
            *conn.inner.replies.lock().unwrap() = replies.into();
            conn
        }

        fn sent(&self) -> Vec<Message> {
            self.inner.sent.lock().unwrap().clone()
        }

        fn closes(&self) -> usize {
            self.inner.closes.load(Ordering::SeqCst)
        }
    }

    impl Connection for ScriptedConnection {
        type Error = TransportError;

        async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
            let msg: Message = serde_json::from_slice(data)
                .expect("test sends are valid messages");
            self.inner.sent.lock().unwrap().push(msg);
            Ok(())
        }

        async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
            let next = self.inner.replies.lock().unwrap().pop_front();
            match next {
                Some(msg) => {
                    Ok(Some(serde_json::to_vec(&msg).unwrap()))
                }
                None => Ok(None), // script exhausted = clean close
            }
        }

        async fn close(&self) -> Result<(), Self::Error> {
            self.inner.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn label(&self) -> &str {
            "client-test"
        }
    }

    fn link(conn: ScriptedConnection) -> MessageLink<ScriptedConnection, JsonCodec> {
        MessageLink::new(conn, JsonCodec)
    }

    // =====================================================================
    // ask()
    // =====================================================================

    #[tokio::test]
    async fn test_ask_matching_tag_returns_reply() {
        let conn = ScriptedConnection::with_replies(vec![
            Message::GameState {
                state: Some(ServerState::PreGame),
            },
        ]);
        let link = link(conn.clone());

        let reply = link
            .ask(&Message::GameState { state: None }, Some(tag::GAME_STATE))
            .await
            .expect("should match");

        assert_eq!(
            reply,
            Message::GameState {
                state: Some(ServerState::PreGame)
            }
        );
        assert_eq!(conn.sent(), vec![Message::GameState { state: None }]);
    }

    #[tokio::test]
    async fn test_ask_wildcard_accepts_any_reply() {
        let conn =
            ScriptedConnection::with_replies(vec![Message::ReconnectAck]);
        let link = link(conn);

        let reply = link
            .ask(&Message::GameState { state: None }, None)
            .await
            .expect("wildcard should accept anything");

        assert_eq!(reply, Message::ReconnectAck);
    }

    #[tokio::test]
    async fn test_ask_error_reply_is_returned_not_rejected() {
        // A structured rejection is an answer, not a protocol fault.
        let conn = ScriptedConnection::with_replies(vec![Message::Error {
            template: ErrorTemplate::template("server.couldNotLogin"),
            message: None,
        }]);
        let link = link(conn);

        let reply = link
            .ask(
                &Message::Login {
                    user_name: "Alice".into(),
                    version: "0.1.0".into(),
                    single_player: true,
                    current_player: false,
                },
                Some(tag::LOGIN_ACK),
            )
            .await
            .expect("error replies pass through");

        assert!(reply.is_error());
    }

    #[tokio::test]
    async fn test_ask_mismatched_tag_is_fatal() {
        // Expecting LoginAck but getting a GameState reply means the
        // peers are answering different questions. Never swallow it.
        let conn = ScriptedConnection::with_replies(vec![
            Message::GameState {
                state: Some(ServerState::InGame),
            },
        ]);
        let link = link(conn);

        let result = link
            .ask(
                &Message::Login {
                    user_name: "Alice".into(),
                    version: "0.1.0".into(),
                    single_player: true,
                    current_player: false,
                },
                Some(tag::LOGIN_ACK),
            )
            .await;

        assert!(matches!(
            result,
            Err(ProtocolError::UnexpectedReply { ref expected, ref received })
                if expected == tag::LOGIN_ACK && received == tag::GAME_STATE
        ));
    }

    #[tokio::test]
    async fn test_ask_closed_connection_is_transport_error() {
        let conn = ScriptedConnection::default(); // no replies queued
        let link = link(conn);

        let result = link
            .ask(&Message::GameState { state: None }, Some(tag::GAME_STATE))
            .await;

        assert!(matches!(
            result,
            Err(ProtocolError::Transport(
                TransportError::ConnectionClosed(_)
            ))
        ));
    }

    // =====================================================================
    // tell() / close()
    // =====================================================================

    #[tokio::test]
    async fn test_tell_sends_without_waiting() {
        let conn = ScriptedConnection::default();
        let link = link(conn.clone());

        link.tell(&Message::Launch).await.expect("tell should send");

        assert_eq!(conn.sent(), vec![Message::Launch]);
    }

    // =====================================================================
    // ask_once()
    // =====================================================================

    struct ScriptedConnector {
        conn: ScriptedConnection,
        refuse: bool,
    }

    impl Connector for ScriptedConnector {
        type Conn = ScriptedConnection;

        async fn connect(
            &self,
            _label: &str,
            _host: &str,
            _port: u16,
        ) -> Result<Self::Conn, TransportError> {
            if self.refuse {
                return Err(TransportError::ConnectFailed(
                    std::io::Error::new(
                        std::io::ErrorKind::ConnectionRefused,
                        "nobody home",
                    ),
                ));
            }
            Ok(self.conn.clone())
        }
    }

    #[tokio::test]
    async fn test_ask_once_closes_connection_on_success() {
        let conn = ScriptedConnection::with_replies(vec![
            Message::ServerList { servers: Some(vec![]) },
        ]);
        let connector = ScriptedConnector {
            conn: conn.clone(),
            refuse: false,
        };

        let reply = ask_once(
            &connector,
            "client-test",
            "meta.example.org",
            3540,
            &Message::ServerList { servers: None },
            Some(tag::SERVER_LIST),
        )
        .await
        .expect("should succeed");

        assert_eq!(reply, Message::ServerList { servers: Some(vec![]) });
        assert_eq!(conn.closes(), 1, "connection must be released");
    }

    #[tokio::test]
    async fn test_ask_once_closes_connection_on_failure() {
        // Script a bogus reply so the ask itself fails; the connection
        // still has to be closed.
        let conn =
            ScriptedConnection::with_replies(vec![Message::LoginAck]);
        let connector = ScriptedConnector {
            conn: conn.clone(),
            refuse: false,
        };

        let result = ask_once(
            &connector,
            "client-test",
            "meta.example.org",
            3540,
            &Message::ServerList { servers: None },
            Some(tag::SERVER_LIST),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(conn.closes(), 1, "connection must be released");
    }

    #[tokio::test]
    async fn test_ask_once_unreachable_endpoint_returns_error() {
        let connector = ScriptedConnector {
            conn: ScriptedConnection::default(),
            refuse: true,
        };

        let result = ask_once(
            &connector,
            "client-test",
            "meta.example.org",
            3540,
            &Message::ServerList { servers: None },
            Some(tag::SERVER_LIST),
        )
        .await;

        assert!(matches!(
            result,
            Err(ProtocolError::Transport(TransportError::ConnectFailed(_)))
        ));
    }
}
