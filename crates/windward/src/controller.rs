//! The session controller: login, logout, and reconnect.
//!
//! One controller per client process. It owns the [`Session`] plus the
//! three injected capabilities — a [`Connector`] for dialing servers, a
//! [`ServerLauncher`] for hosting local ones, and a [`UserInterface`]
//! for everything the user sees. All operations take `&mut self`, so a
//! caller can never interleave two lifecycle operations on the same
//! session.
//!
//! Public operations return `bool`: did the requested transition
//! happen. Failure detail travels to the user as localized
//! [`ErrorTemplate`]s through the UI boundary, never as error values
//! the caller must translate.

use windward_protocol::{
    ErrorTemplate, LinkConfig, LogoutReason, Message, MessageLink,
    ProtocolError, ServerState, tag,
};
use windward_protocol::JsonCodec;
use windward_session::logout::{self, FollowUp};
use windward_session::Session;
use windward_transport::{Connection, Connector, TransportError};

use crate::config::ClientConfig;
use crate::game::Game;
use crate::launcher::ServerLauncher;
use crate::ui::UserInterface;

/// Drives the session lifecycle against a game server.
pub struct SessionController<D, L, U>
where
    D: Connector,
    D::Conn: Connection<Error = TransportError>,
    L: ServerLauncher,
    U: UserInterface,
{
    pub(crate) session: Session<D::Conn>,
    pub(crate) connector: D,
    pub(crate) launcher: L,
    pub(crate) ui: U,
    pub(crate) config: ClientConfig,
    /// Whether this client started the server it is connected to.
    pub(crate) hosting: bool,
}

/// How the reconnect handshake ended; resolved before any session
/// state is touched so the link borrow is released first.
enum ReconnectOutcome {
    LoggedIn,
    Refused,
    Broken,
}

impl<D, L, U> SessionController<D, L, U>
where
    D: Connector,
    D::Conn: Connection<Error = TransportError>,
    L: ServerLauncher,
    U: UserInterface,
{
    pub fn new(connector: D, launcher: L, ui: U, config: ClientConfig) -> Self {
        Self {
            session: Session::new(),
            connector,
            launcher,
            ui,
            config,
            hosting: false,
        }
    }

    /// The session state, for callers that only need to inspect it.
    pub fn session(&self) -> &Session<D::Conn> {
        &self.session
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =====================================================================
    // Connection plumbing
    // =====================================================================

    /// Ensures a live connection to `host:port`. A no-op when one is
    /// already attached.
    async fn connect(
        &mut self,
        user: &str,
        host: &str,
        port: u16,
    ) -> Result<(), ErrorTemplate> {
        if self.session.is_connected() {
            return Ok(());
        }

        let label = format!("{}:{}", self.session.label(), user);
        match self.connector.connect(&label, host, port).await {
            Ok(conn) => {
                let link = MessageLink::with_config(
                    conn,
                    JsonCodec,
                    LinkConfig {
                        ask_timeout: self.config.ask_timeout,
                    },
                );
                self.session.attach_link(link);
                tracing::info!(user, %host, port, "connected");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%host, port, error = %e, "connect failed");
                Err(ErrorTemplate::template("server.couldNotConnect"))
            }
        }
    }

    /// Detaches and closes the current connection, if any. Close
    /// failures are logged and swallowed; the link is gone either way.
    pub(crate) async fn disconnect(&mut self) {
        if let Some(link) = self.session.take_link() {
            if let Err(e) = link.close().await {
                tracing::debug!(error = %e, "close on disconnect failed");
            }
        }
    }

    /// One-shot ask against an arbitrary endpoint: open, ask, close.
    ///
    /// Returns the positive reply, or `None` after reporting the
    /// failure to the user. `err_template` overrides the generic
    /// connect-failure message when given.
    pub(crate) async fn ask(
        &mut self,
        host: &str,
        port: u16,
        query: &Message,
        expected: &str,
        err_template: Option<ErrorTemplate>,
    ) -> Option<Message> {
        let result = windward_protocol::ask_once(
            &self.connector,
            self.session.label(),
            host,
            port,
            query,
            Some(expected),
        )
        .await;

        match result {
            Ok(Message::Error { template, message }) => {
                tracing::info!(
                    key = template.key(),
                    detail = ?message,
                    "request rejected"
                );
                self.ui.show_error_message(
                    &err_template.unwrap_or(template),
                );
                None
            }
            Ok(reply) => Some(reply),
            Err(ProtocolError::UnexpectedReply { expected, received }) => {
                tracing::error!(
                    expected,
                    received,
                    "protocol desync on one-shot ask"
                );
                None
            }
            Err(e) => {
                tracing::warn!(%host, port, error = %e, "one-shot ask failed");
                self.ui.show_error_message(&err_template.unwrap_or_else(
                    || ErrorTemplate::template("server.couldNotConnect"),
                ));
                None
            }
        }
    }

    // =====================================================================
    // Login
    // =====================================================================

    /// Sends a login request for `user` to the server at `host:port`,
    /// connecting first if necessary.
    ///
    /// Returns `true` once the server has acknowledged the login. When
    /// the session is already logged in this is a no-op returning
    /// `true`: logging in twice must not reset a live login.
    pub async fn request_login(
        &mut self,
        user: &str,
        host: &str,
        port: u16,
    ) -> bool {
        if self.session.is_logged_in() {
            tracing::debug!(user, "already logged in, ignoring");
            return true;
        }
        self.session.set_map_editor(false);

        // A stale never-logged-in connection (e.g. an earlier refused
        // login) is useless; start fresh.
        self.disconnect().await;
        if let Err(template) = self.connect(user, host, port).await {
            self.ui.show_error_message(&template);
            return false;
        }

        let query = Message::Login {
            user_name: user.to_string(),
            version: self.config.version.clone(),
            single_player: self.session.is_single_player(),
            // No player is bound before login completes; only the
            // reconnect path can claim to be the current player.
            current_player: false,
        };

        let Some(link) = self.session.link() else {
            return false;
        };
        let outcome = match link.ask(&query, Some(tag::LOGIN_ACK)).await {
            Ok(Message::LoginAck) => Ok(()),
            Ok(Message::Error { template, message }) => {
                tracing::info!(
                    user,
                    key = template.key(),
                    detail = ?message,
                    "login refused"
                );
                Err(template)
            }
            Ok(other) => {
                tracing::error!(tag = other.tag(), "impossible login reply");
                Err(ErrorTemplate::template("server.couldNotLogin"))
            }
            Err(ProtocolError::UnexpectedReply { expected, received }) => {
                tracing::error!(
                    expected,
                    received,
                    "protocol desync during login"
                );
                Err(ErrorTemplate::template("server.couldNotLogin"))
            }
            Err(e) => {
                tracing::warn!(user, error = %e, "login failed");
                Err(ErrorTemplate::template("server.couldNotLogin"))
            }
        };

        match outcome {
            Ok(()) => {
                self.session.remember_login(user, host, port);
                true
            }
            Err(template) => {
                self.disconnect().await;
                self.ui.show_error_message(&template);
                false
            }
        }
    }

    /// Completes a login once the server has attached this client to a
    /// game: binds the player, records the flags, and hands control to
    /// the stage matching the server's state.
    pub async fn complete_login(
        &mut self,
        state: ServerState,
        game: &mut Game,
        user: &str,
        single_player: bool,
        current_player: bool,
    ) -> bool {
        if game.player_by_name(user).is_none() {
            tracing::warn!(user, "server game has no such player");
            self.ui.show_error_message(
                &ErrorTemplate::template("server.noSuchPlayer")
                    .add_name("%player%", user),
            );
            return false;
        }

        if self.session.mark_logged_in().is_err() {
            tracing::error!(user, "login completed without a connection");
            return false;
        }
        self.session.set_single_player(single_player);
        if current_player {
            game.set_current_player(user);
            self.session.set_current_player_name(user);
        }

        match state {
            ServerState::InGame => {
                // Rejoining a running game: restore the active unit if
                // it still exists and is still ours.
                if let Some(unit_id) = self.ui.reconnect() {
                    let owned = game
                        .unit(&unit_id)
                        .is_some_and(|u| u.owner == user);
                    if owned {
                        self.ui.set_active_unit(&unit_id);
                    }
                }
                self.ui.next_model_message();
                true
            }
            ServerState::PreGame
            | ServerState::LoadGame
            | ServerState::EndGame => {
                if game.has_map() && game.all_players_ready_to_launch() {
                    // Everyone else is waiting on us; request launch
                    // instead of re-opening the setup stage.
                    let Some(link) = self.session.link() else {
                        return false;
                    };
                    if let Err(e) = link.tell(&Message::Launch).await {
                        tracing::warn!(error = %e, "launch request failed");
                        return false;
                    }
                } else {
                    self.ui.show_start_game_panel(game, user, single_player);
                }
                true
            }
        }
    }

    // =====================================================================
    // Logout
    // =====================================================================

    /// Tells the server this client is leaving. The server answers by
    /// driving the actual disconnect; see [`Self::logout`].
    ///
    /// Returns `true` when already logged out — asking to leave twice
    /// is fine and sends nothing.
    pub async fn request_logout(&mut self, reason: LogoutReason) -> bool {
        if !self.session.is_logged_in() {
            tracing::debug!(%reason, "not logged in, nothing to request");
            return true;
        }

        let player = self.session.user_name().to_string();
        let Some(link) = self.session.link() else {
            return false;
        };
        match link
            .tell(&Message::Logout {
                player,
                reason,
            })
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%reason, error = %e, "logout request failed");
                false
            }
        }
    }

    /// Completes a logout: drops the connection, clears the login, and
    /// performs the follow-ups the reason calls for.
    pub async fn logout(&mut self, reason: LogoutReason) -> bool {
        tracing::info!(%reason, "logging out");
        self.disconnect().await;
        self.session.mark_logged_out();

        for follow_up in logout::plan(reason).follow_ups {
            match follow_up {
                FollowUp::Quit => self.ui.quit(),
                FollowUp::WarnAnomaly => {
                    // A server-driven logout with reason Login should
                    // not happen; the relogin path is Reconnect.
                    tracing::warn!(
                        backtrace = %std::backtrace::Backtrace::capture(),
                        "unexpected logout reason"
                    );
                }
                FollowUp::StopLocalServer => self.stop_server(),
                FollowUp::ShowMainTitle => {
                    self.ui.remove_in_game_components();
                    self.ui.show_main_title();
                }
                FollowUp::ShowNewGamePanel => {
                    self.ui.remove_in_game_components();
                    self.ui.show_new_game_panel();
                }
                FollowUp::Reconnect => self.reconnect().await,
            }
        }
        true
    }

    /// Stops the locally hosted server, if this client started one.
    pub(crate) fn stop_server(&mut self) {
        if self.hosting {
            tracing::info!("stopping local server");
            self.launcher.stop_server();
            self.hosting = false;
        }
    }

    // =====================================================================
    // Reconnect
    // =====================================================================

    /// Re-establishes the session after a server-initiated drop:
    /// exactly one fresh dial to the remembered endpoint, then the
    /// reconnect handshake and a login replaying the remembered
    /// parameters. There is no retry loop; a failed reconnect ends the
    /// session.
    async fn reconnect(&mut self) {
        let host = self.session.host().to_string();
        let port = self.session.port();
        let user = self.session.user_name().to_string();
        tracing::info!(user, %host, port, "reconnecting");

        if self.connect(&user, &host, port).await.is_err() {
            tracing::error!(%host, port, "reconnect dial failed");
            self.ui.quit();
            return;
        }

        let login = Message::Login {
            user_name: user.clone(),
            version: self.config.version.clone(),
            single_player: self.session.is_single_player(),
            current_player: self.session.current_player_is_self(),
        };

        let Some(link) = self.session.link() else {
            self.ui.quit();
            return;
        };
        let outcome = match link
            .ask(&Message::Reconnect, Some(tag::RECONNECT_ACK))
            .await
        {
            Ok(Message::ReconnectAck) => {
                match link.ask(&login, Some(tag::LOGIN_ACK)).await {
                    Ok(Message::LoginAck) => ReconnectOutcome::LoggedIn,
                    Ok(reply) => {
                        tracing::error!(
                            tag = reply.tag(),
                            "reconnect login refused"
                        );
                        ReconnectOutcome::Refused
                    }
                    Err(ProtocolError::Transport(e)) => {
                        tracing::error!(error = %e, "reconnect login failed");
                        ReconnectOutcome::Broken
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "reconnect login failed");
                        ReconnectOutcome::Refused
                    }
                }
            }
            Ok(reply) => {
                tracing::error!(tag = reply.tag(), "reconnect refused");
                ReconnectOutcome::Refused
            }
            Err(ProtocolError::Transport(e)) => {
                tracing::error!(error = %e, "reconnect handshake failed");
                ReconnectOutcome::Broken
            }
            Err(e) => {
                tracing::error!(error = %e, "reconnect handshake failed");
                ReconnectOutcome::Refused
            }
        };

        match outcome {
            ReconnectOutcome::LoggedIn => {
                // remember_login already holds these parameters; only
                // the flag needs restoring.
                if self.session.mark_logged_in().is_ok() {
                    tracing::info!(user, "reconnected");
                }
            }
            ReconnectOutcome::Broken => {
                self.disconnect().await;
                self.ui.quit();
            }
            ReconnectOutcome::Refused => {
                self.disconnect().await;
                if self.ui.ask_to_quit() {
                    self.ui.quit();
                }
            }
        }
    }
}
