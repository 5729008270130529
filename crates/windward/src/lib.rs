//! # Windward
//!
//! Client-side session and connection-lifecycle controller for a
//! multiplayer strategy game.
//!
//! The [`SessionController`] owns the single active connection for the
//! client process and drives the login/logout/reconnect envelope. Four
//! startup flows — single player, saved game, hosting multiplayer, and
//! joining multiplayer — all converge on its one login procedure.
//! Everything visual ([`UserInterface`]) and the actual server process
//! ([`ServerLauncher`]) sit behind traits, so the whole lifecycle is
//! testable with scripted collaborators.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use windward::{ClientConfig, SessionController};
//! use windward_transport::WebSocketConnector;
//!
//! // Implement ServerLauncher and UserInterface for your platform, then:
//! // let mut controller = SessionController::new(
//! //     WebSocketConnector,
//! //     launcher,
//! //     ui,
//! //     ClientConfig::default(),
//! // );
//! // controller.start_single_player_game(rules).await;
//! ```

mod config;
mod controller;
mod directory;
mod error;
mod game;
mod launcher;
mod rules;
mod saved;
mod startup;
mod ui;

pub use config::{ClientConfig, ShowSavegameSettings};
pub use controller::SessionController;
pub use directory::list_servers;
pub use error::ClientError;
pub use game::{Game, Player, Unit, UnitId};
pub use launcher::{
    GameSource, LaunchError, ServerAddress, ServerLauncher, StartServer,
};
pub use rules::RuleSpec;
pub use saved::{SaveError, SavedHeader};
pub use startup::StartupRequest;
pub use ui::{ChoiceItem, LoadingSavegameInfo, UserInterface};

// Re-export the protocol vocabulary callers need to speak to us.
pub use windward_protocol::{
    ErrorTemplate, LogoutReason, Message, ServerInfo, ServerState,
};

/// Installs a `tracing` subscriber driven by `RUST_LOG`. Call once at
/// process start; calling again is a no-op.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
