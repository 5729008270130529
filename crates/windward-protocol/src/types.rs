//! Core wire types for the login/logout envelope.
//!
//! Every value here is serialized, sent over the connection, and
//! deserialized on the other side. [`Message`] is internally tagged —
//! the JSON carries a `"type"` field — and replies are paired with
//! queries by comparing that tag (see the `link` module).

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// ServerState
// ---------------------------------------------------------------------------

/// The remote game's lifecycle phase at query time.
///
/// The join flow branches on this: pre-game and load-game servers accept
/// a plain login, an in-game server requires picking a vacant player
/// slot, and an ended game cannot be joined at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerState {
    /// Players are still gathering; the game has not launched.
    PreGame,
    /// The server is restoring a saved game.
    LoadGame,
    /// The game is running.
    InGame,
    /// The game has ended.
    EndGame,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PreGame => "pre-game",
            Self::LoadGame => "load-game",
            Self::InGame => "in-game",
            Self::EndGame => "end-game",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// LogoutReason
// ---------------------------------------------------------------------------

/// Why a logout is occurring. Drives what happens after the connection
/// is torn down (quit, back to a menu, or an automatic reconnect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoutReason {
    /// The player lost and is leaving for good.
    Defeated,
    /// The player chose to quit the client.
    Quit,
    /// Defensive marker: a login flow found a stale logged-in session.
    /// Never user-triggered; logged as an anomaly when it completes.
    Login,
    /// Back to the main title screen.
    MainTitle,
    /// Back to the new-game setup screen.
    NewGame,
    /// Transient network loss; log out and immediately log back in.
    Reconnect,
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Defeated => "defeated",
            Self::Quit => "quit",
            Self::Login => "login",
            Self::MainTitle => "main-title",
            Self::NewGame => "new-game",
            Self::Reconnect => "reconnect",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// ServerInfo
// ---------------------------------------------------------------------------

/// One advertised server, as listed by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Display name of the server.
    pub name: String,
    /// Host to connect to.
    pub host: String,
    /// Port to connect to.
    pub port: u16,
    /// Player slots still open.
    pub slots_available: u32,
    /// Players currently connected.
    pub currently_playing: u32,
    /// Server software version string.
    pub version: String,
    /// The game's lifecycle phase.
    pub game_state: ServerState,
}

// ---------------------------------------------------------------------------
// ErrorTemplate
// ---------------------------------------------------------------------------

/// A localizable message: a message key plus `%marker%` replacements.
///
/// The core never builds user-facing strings itself — it hands one of
/// these to the presentation layer, which owns localization. `Display`
/// renders the key and replacements for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorTemplate {
    key: String,
    replacements: Vec<(String, String)>,
}

impl ErrorTemplate {
    /// Creates a template for the given message key.
    pub fn template(key: &str) -> Self {
        Self {
            key: key.to_string(),
            replacements: Vec::new(),
        }
    }

    /// Adds a `%marker%` → value replacement.
    pub fn add_name(mut self, marker: &str, value: &str) -> Self {
        self.replacements
            .push((marker.to_string(), value.to_string()));
        self
    }

    /// The message key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Looks up a replacement value by marker.
    pub fn replacement(&self, marker: &str) -> Option<&str> {
        self.replacements
            .iter()
            .find(|(m, _)| m == marker)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ErrorTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        for (marker, value) in &self.replacements {
            write!(f, " {marker}={value}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Well-known tag strings, for use as the expected tag of an ask.
///
/// `Message::tag()` returns these same strings; keeping them as
/// constants saves callers from typo'd literals.
pub mod tag {
    pub const LOGIN: &str = "Login";
    pub const LOGIN_ACK: &str = "LoginAck";
    pub const LOGOUT: &str = "Logout";
    pub const RECONNECT: &str = "Reconnect";
    pub const RECONNECT_ACK: &str = "ReconnectAck";
    pub const GAME_STATE: &str = "GameState";
    pub const VACANT_PLAYERS: &str = "VacantPlayers";
    pub const SERVER_LIST: &str = "ServerList";
    pub const LAUNCH: &str = "Launch";
    pub const ERROR: &str = "Error";
}

/// A message on the wire: a type tag plus a payload.
///
/// Query/reply pairs that share a tag (`GameState`, `VacantPlayers`,
/// `ServerList`) use `Option` payloads: the query sends `None`, the
/// reply carries `Some`. An empty reply list is therefore distinct from
/// a query — "no vacant players" is `Some(vec![])`, not `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Client → Server: request to log this user in.
    Login {
        user_name: String,
        version: String,
        single_player: bool,
        current_player: bool,
    },

    /// Server → Client: the login request was accepted. Game attachment
    /// follows as a separate inbound message (out of this crate's scope).
    LoginAck,

    /// Client → Server: log this player out for the given reason.
    Logout {
        player: String,
        reason: LogoutReason,
    },

    /// Client → Server: resume a dropped session.
    Reconnect,

    /// Server → Client: the session was resumed.
    ReconnectAck,

    /// Query (state `None`) or reply (state `Some`): the remote game's
    /// lifecycle phase.
    GameState {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ServerState>,
    },

    /// Query (`None`) or reply (`Some`): the player slots in an
    /// in-progress game not controlled by any connected client.
    VacantPlayers {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        players: Option<Vec<String>>,
    },

    /// Query (`None`) or reply (`Some`): the currently advertised
    /// servers, as known to the directory service.
    ServerList {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        servers: Option<Vec<ServerInfo>>,
    },

    /// Client → Server: every player is ready, launch the game.
    Launch,

    /// Server → Client: a structured rejection, carrying a localizable
    /// template and optionally the raw server-side text.
    Error {
        template: ErrorTemplate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl Message {
    /// Returns this message's type tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Login { .. } => tag::LOGIN,
            Self::LoginAck => tag::LOGIN_ACK,
            Self::Logout { .. } => tag::LOGOUT,
            Self::Reconnect => tag::RECONNECT,
            Self::ReconnectAck => tag::RECONNECT_ACK,
            Self::GameState { .. } => tag::GAME_STATE,
            Self::VacantPlayers { .. } => tag::VACANT_PLAYERS,
            Self::ServerList { .. } => tag::SERVER_LIST,
            Self::Launch => tag::LAUNCH,
            Self::Error { .. } => tag::ERROR,
        }
    }

    /// Returns `true` for the reserved `Error` tag.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

// =========================================================================
// Tests
// =========================================================================
