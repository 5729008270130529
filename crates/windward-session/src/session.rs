//! The session record: one client's login and connection status.
//!
//! A `Session` is the explicitly owned, passed-by-reference state the
//! controller mutates. Exactly one is created at process start and it
//! lives until process exit; starting a new game reuses it rather than
//! replacing it.
//!
//! The state machine is small:
//!
//! ```text
//!   Idle ──(attach_link)──→ Connected ──(mark_logged_in)──→ LoggedIn
//!     ↑                        │                               │
//!     └──────(take_link)───────┴────────(mark_logged_out)──────┘
//! ```
//!
//! Invariant: `is_logged_in()` implies `is_connected()`. Enforced by
//! [`Session::mark_logged_in`] (fails without a link) and
//! [`Session::take_link`] (clears the logged-in flag).

use rand::Rng;

use windward_protocol::{JsonCodec, MessageLink};
use windward_transport::{Connection, TransportError};

use crate::SessionError;

/// The client-side record of the current login/connection status.
pub struct Session<C: Connection> {
    link: Option<MessageLink<C, JsonCodec>>,
    logged_in: bool,
    single_player: bool,
    map_editor: bool,
    current_player_name: String,
    user_name: String,
    host: String,
    port: u16,
    label: String,
}

impl<C> Session<C>
where
    C: Connection<Error = TransportError>,
{
    /// Creates the idle session for this process. The identity label is
    /// generated once and reused for every connection the session opens.
    pub fn new() -> Self {
        Self {
            link: None,
            logged_in: false,
            single_player: false,
            map_editor: false,
            current_player_name: String::new(),
            user_name: String::new(),
            host: String::new(),
            port: 0,
            label: generate_label(),
        }
    }

    /// The per-process identity label, e.g. `client-9f2ac01b`.
    /// Used for logging on every connection this session opens.
    pub fn label(&self) -> &str {
        &self.label
    }

    // -- Connection ------------------------------------------------------

    /// Returns `true` while a connection link is attached.
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// Attaches an open connection link, replacing any previous one.
    /// The caller is responsible for closing a replaced link.
    pub fn attach_link(&mut self, link: MessageLink<C, JsonCodec>) {
        tracing::debug!(label = %self.label, "connection attached");
        self.link = Some(link);
    }

    /// Borrows the connection link, if any.
    pub fn link(&self) -> Option<&MessageLink<C, JsonCodec>> {
        self.link.as_ref()
    }

    /// Detaches and returns the connection link. Clears the logged-in
    /// flag, upholding the logged-in-implies-connected invariant.
    pub fn take_link(&mut self) -> Option<MessageLink<C, JsonCodec>> {
        self.logged_in = false;
        self.link.take()
    }

    // -- Login state -----------------------------------------------------

    /// Returns `true` once a login has fully completed.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Marks the session logged in.
    ///
    /// # Errors
    /// Returns [`SessionError::NotConnected`] when no link is attached;
    /// a session can never be logged in without a live connection.
    pub fn mark_logged_in(&mut self) -> Result<(), SessionError> {
        if self.link.is_none() {
            return Err(SessionError::NotConnected);
        }
        self.logged_in = true;
        tracing::info!(user = %self.user_name, "session logged in");
        Ok(())
    }

    /// Marks the session logged out. The connection may stay attached
    /// (the logout completion handles closing it).
    pub fn mark_logged_out(&mut self) {
        self.logged_in = false;
    }

    /// Remembers the parameters of a dispatched login request, so a
    /// later reconnect can replay them exactly.
    pub fn remember_login(&mut self, user: &str, host: &str, port: u16) {
        self.user_name = user.to_string();
        self.host = host.to_string();
        self.port = port;
    }

    /// The player name of the last login request.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// The host of the last login request.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port of the last login request.
    pub fn port(&self) -> u16 {
        self.port
    }

    // -- Flags -----------------------------------------------------------

    /// Whether the current/last game is single-player.
    pub fn is_single_player(&self) -> bool {
        self.single_player
    }

    pub fn set_single_player(&mut self, single_player: bool) {
        self.single_player = single_player;
    }

    /// Whether the client is in map-editor mode.
    pub fn is_map_editor(&self) -> bool {
        self.map_editor
    }

    pub fn set_map_editor(&mut self, map_editor: bool) {
        self.map_editor = map_editor;
    }

    /// The name of the player whose turn it is, or empty when unknown.
    pub fn current_player_name(&self) -> &str {
        &self.current_player_name
    }

    pub fn set_current_player_name(&mut self, name: &str) {
        self.current_player_name = name.to_string();
    }

    /// Returns `true` when this client's player is the current player.
    pub fn current_player_is_self(&self) -> bool {
        !self.current_player_name.is_empty()
            && self.current_player_name == self.user_name
    }
}

impl<C> Default for Session<C>
where
    C: Connection<Error = TransportError>,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the per-process identity label: `client-` plus 8 random
/// hex characters. Enough to tell two clients apart in interleaved
/// server logs; not a secret.
fn generate_label() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 4] = rng.random();
    let hex: String =
        bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("client-{hex}")
}

// =========================================================================
// Tests
// =========================================================================
