//! Integration tests for the WebSocket client transport.
//!
//! These spin up a real tungstenite server on a random port and dial it
//! with [`WebSocketConnector`] to verify that bytes actually flow over
//! the network and that close is idempotent.

#[cfg(feature = "websocket")]
mod websocket {
    use windward_transport::{Connection, Connector, WebSocketConnector};

    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;

    /// Binds an echo server on a random port and returns the port.
    /// The server echoes binary/text frames until the peer closes.
    async fn spawn_echo_server() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let port = listener.local_addr().expect("local addr").port();

        tokio::spawn(async move {
            let (stream, _) =
                listener.accept().await.expect("should accept");
            let mut ws = tokio_tungstenite::accept_async(stream)
                .await
                .expect("should upgrade");
            while let Some(Ok(msg)) = ws.next().await {
                if msg.is_binary() || msg.is_text() {
                    if ws.send(msg).await.is_err() {
                        break;
                    }
                } else if msg.is_close() {
                    break;
                }
            }
        });

        port
    }

    #[tokio::test]
    async fn test_connect_send_and_receive_round_trip() {
        let port = spawn_echo_server().await;

        let conn = WebSocketConnector
            .connect("client-test", "127.0.0.1", port)
            .await
            .expect("should connect");

        assert_eq!(conn.label(), "client-test");

        conn.send(b"ahoy").await.expect("send should succeed");
        let echoed = conn.recv().await.expect("recv should succeed");
        assert_eq!(echoed.as_deref(), Some(&b"ahoy"[..]));

        conn.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_server_closes() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let port = listener.local_addr().expect("local addr").port();

        // Server accepts, then immediately closes the socket.
        tokio::spawn(async move {
            let (stream, _) =
                listener.accept().await.expect("should accept");
            let mut ws = tokio_tungstenite::accept_async(stream)
                .await
                .expect("should upgrade");
            ws.close(None).await.expect("server close");
        });

        let conn = WebSocketConnector
            .connect("client-test", "127.0.0.1", port)
            .await
            .expect("should connect");

        let msg = conn.recv().await.expect("recv should not error");
        assert!(msg.is_none(), "clean close should surface as None");
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let port = spawn_echo_server().await;

        let conn = WebSocketConnector
            .connect("client-test", "127.0.0.1", port)
            .await
            .expect("should connect");

        conn.close().await.expect("first close should succeed");
        conn.close().await.expect("second close should also succeed");
    }

    #[tokio::test]
    async fn test_connect_refused_returns_error() {
        // Bind a listener to grab a fresh port, then drop it so nothing
        // is listening when we dial.
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let result = WebSocketConnector
            .connect("client-test", "127.0.0.1", port)
            .await;

        assert!(result.is_err(), "dialing a dead port should fail");
    }
}
