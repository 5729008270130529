//! The local server launcher boundary.
//!
//! Starting an in-process or child server is the platform's business;
//! the controller only needs to request one and learn where it ended up
//! listening. Tests substitute a scripted launcher.

use std::path::PathBuf;

use crate::rules::RuleSpec;

/// Where a launched server ended up listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

/// What the launched server should load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSource {
    /// A fresh game from a rule specification.
    Rules(RuleSpec),
    /// A game restored from a save file.
    Saved(PathBuf),
}

/// A request to start a local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartServer {
    /// Advertise the server on the public directory.
    pub public_server: bool,
    /// Run in single-player mode.
    pub single_player: bool,
    /// What to load.
    pub source: GameSource,
    /// Requested port; 0 asks for an ephemeral one.
    pub port: u16,
    /// Optional display name for the server.
    pub name: Option<String>,
}

/// Errors from the launcher.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The server process could not be started.
    #[error("could not start server: {0}")]
    Failed(String),

    /// The requested port is bound and could not be freed.
    #[error("port {0} is in use")]
    PortInUse(u16),
}

/// Capability to start and stop a local game server.
pub trait ServerLauncher: Send + 'static {
    /// Starts a server and returns its address once it is accepting
    /// connections.
    fn start_server(
        &mut self,
        request: StartServer,
    ) -> Result<ServerAddress, LaunchError>;

    /// Stops the running local server, if any.
    fn stop_server(&mut self);

    /// Frees a previously bound port so a new server can take it.
    /// Returns `false` when the port stays blocked.
    fn unblock_server(&mut self, port: u16) -> bool;
}
