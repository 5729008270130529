//! Server directory lookup.
//!
//! One scoped query to the meta server: connect, ask for the list,
//! disconnect. An unreachable directory yields `None`, a reachable but
//! empty one `Some(vec![])`; callers can tell "nothing out there" from
//! "could not ask".

use windward_protocol::{Message, ServerInfo, tag};
use windward_transport::{Connection, Connector, TransportError};

use crate::config::ClientConfig;
use crate::controller::SessionController;
use crate::launcher::ServerLauncher;
use crate::ui::UserInterface;

/// Fetches the list of publicly advertised servers from the directory.
pub async fn list_servers<D>(
    connector: &D,
    label: &str,
    config: &ClientConfig,
) -> Option<Vec<ServerInfo>>
where
    D: Connector,
    D::Conn: Connection<Error = TransportError>,
{
    let result = windward_protocol::ask_once(
        connector,
        label,
        &config.meta_server_host,
        config.meta_server_port,
        &Message::ServerList { servers: None },
        Some(tag::SERVER_LIST),
    )
    .await;

    match result {
        Ok(Message::ServerList {
            servers: Some(servers),
        }) => Some(servers),
        Ok(reply) => {
            tracing::warn!(tag = reply.tag(), "unusable directory reply");
            None
        }
        Err(e) => {
            tracing::warn!(
                host = %config.meta_server_host,
                port = config.meta_server_port,
                error = %e,
                "directory lookup failed"
            );
            None
        }
    }
}

impl<D, L, U> SessionController<D, L, U>
where
    D: Connector,
    D::Conn: Connection<Error = TransportError>,
    L: ServerLauncher,
    U: UserInterface,
{
    /// Fetches the public server list using this controller's connector
    /// and configuration. Does not touch the game connection.
    pub async fn server_list(&self) -> Option<Vec<ServerInfo>> {
        list_servers(&self.connector, self.session.label(), &self.config)
            .await
    }
}
