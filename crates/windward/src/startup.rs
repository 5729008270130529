//! Game startup flows: how a session comes to exist.
//!
//! Four ways in — a fresh single-player game, a restored save, hosting
//! a multiplayer game, and joining someone else's — plus the two menu
//! returns (main title, new game). Every flow funnels into
//! [`SessionController::request_login`]; what differs is how the
//! server to log in to comes to exist and which name goes on the login.

use std::path::PathBuf;

use windward_protocol::{
    ErrorTemplate, LogoutReason, Message, ServerState, tag,
};
use windward_transport::{Connection, Connector, TransportError};

use crate::controller::SessionController;
use crate::launcher::{GameSource, ServerLauncher, StartServer};
use crate::rules::RuleSpec;
use crate::saved::{SaveError, SavedHeader};
use crate::ui::{ChoiceItem, UserInterface};

/// One way of getting into a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupRequest {
    /// Launch a private local server and play alone.
    SinglePlayer { spec: RuleSpec },
    /// Restore a saved game on a local server.
    SavedGame {
        path: PathBuf,
        /// Information message shown once the game is restored, e.g.
        /// an autosave notice.
        user_message: Option<String>,
    },
    /// Launch a local server others can join.
    HostMultiplayer {
        spec: RuleSpec,
        public_server: bool,
        port: u16,
    },
    /// Join a server someone else runs.
    JoinMultiplayer {
        host: String,
        port: u16,
        /// Player name to log in as; `None` lets the flow pick one
        /// (the configured name, or a vacant slot's ruler).
        name: Option<String>,
    },
}

impl<D, L, U> SessionController<D, L, U>
where
    D: Connector,
    D::Conn: Connection<Error = TransportError>,
    L: ServerLauncher,
    U: UserInterface,
{
    /// Dispatches a startup request to the matching flow.
    pub async fn start(&mut self, request: StartupRequest) -> bool {
        match request {
            StartupRequest::SinglePlayer { spec } => {
                self.start_single_player_game(spec).await
            }
            StartupRequest::SavedGame { path, user_message } => {
                self.start_saved_game(path, user_message.as_deref()).await
            }
            StartupRequest::HostMultiplayer {
                spec,
                public_server,
                port,
            } => {
                self.start_multiplayer_game(spec, public_server, port).await
            }
            StartupRequest::JoinMultiplayer { host, port, name } => {
                self.join_multiplayer_game(&host, port, name).await
            }
        }
    }

    /// Launches a private local server with the given rules and logs
    /// the configured player into it.
    pub async fn start_single_player_game(
        &mut self,
        mut spec: RuleSpec,
    ) -> bool {
        self.session.set_map_editor(false);
        if !self.launcher.unblock_server(self.config.server_port) {
            tracing::warn!(
                port = self.config.server_port,
                "server port stays blocked"
            );
            return false;
        }
        if self.session.is_logged_in() {
            tracing::warn!("starting a game while still logged in");
            self.request_logout(LogoutReason::Login).await;
        }

        spec.merge_mods(&self.config.active_mods);
        self.ui.load_mod_messages(&spec.mods);

        let addr = match self.launcher.start_server(StartServer {
            public_server: false,
            single_player: true,
            source: GameSource::Rules(spec),
            port: 0,
            name: None,
        }) {
            Ok(addr) => addr,
            Err(e) => {
                tracing::error!(error = %e, "could not start local server");
                self.ui.show_error_message(&ErrorTemplate::template(
                    "server.couldNotStart",
                ));
                return false;
            }
        };
        self.hosting = true;

        self.session.set_single_player(true);
        let user = self.config.client_name.clone();
        self.request_login(&user, &addr.host, addr.port).await
    }

    /// Restores a saved game on a local server and logs back in as the
    /// player who saved it.
    pub async fn start_saved_game(
        &mut self,
        path: PathBuf,
        user_message: Option<&str>,
    ) -> bool {
        self.session.set_map_editor(false);

        let header = match SavedHeader::open(&path) {
            Ok(header) => header,
            Err(SaveError::NotFound(path)) => {
                self.ui.show_error_message(
                    &ErrorTemplate::template("error.couldNotFind")
                        .add_name("%name%", &path.display().to_string()),
                );
                return false;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e,
                    "could not read save header");
                self.ui.show_error_message(
                    &ErrorTemplate::template("error.couldNotLoad")
                        .add_name("%name%", &path.display().to_string()),
                );
                return false;
            }
        };

        self.config.merge_saved_options(&header.options);
        let user = header
            .owner
            .unwrap_or_else(|| self.config.client_name.clone());
        self.config.client_name = user.clone();

        let (single_player, server_name, port) = if self
            .config
            .should_show_savegame_dialog(header.single_player)
        {
            if !self.ui.show_loading_savegame_dialog(
                header.public_server,
                header.single_player,
            ) {
                return false; // user cancelled
            }
            let info = self.ui.loading_savegame_info();
            (info.single_player, info.server_name, info.port)
        } else {
            (header.single_player, None, 0)
        };

        self.ui.load_mod_messages(&self.config.active_mods);

        // Free the port the restored server will actually bind, not
        // the configured default.
        if !self.launcher.unblock_server(port) {
            tracing::warn!(port, "server port stays blocked");
            return false;
        }
        if self.session.is_logged_in() {
            tracing::warn!("restoring a game while still logged in");
            self.request_logout(LogoutReason::Login).await;
        }

        self.ui.show_status_panel("status.loadingGame");
        let started = self.launcher.start_server(StartServer {
            public_server: header.public_server,
            single_player,
            source: GameSource::Saved(path.clone()),
            port,
            name: server_name,
        });
        let addr = match started {
            Ok(addr) => addr,
            Err(e) => {
                self.ui.close_status_panel();
                tracing::error!(path = %path.display(), error = %e,
                    "could not restore save");
                self.ui.show_error_message(
                    &ErrorTemplate::template("error.couldNotLoad")
                        .add_name("%name%", &path.display().to_string()),
                );
                return false;
            }
        };
        self.hosting = true;
        if let Some(message) = user_message {
            self.ui.show_information_message(message);
        }
        self.ui.close_status_panel();

        self.session.set_single_player(single_player);
        let user = self.config.client_name.clone();
        self.request_login(&user, &addr.host, addr.port).await
    }

    /// Launches a local server others can join and logs in as its
    /// first player.
    pub async fn start_multiplayer_game(
        &mut self,
        mut spec: RuleSpec,
        public_server: bool,
        port: u16,
    ) -> bool {
        self.session.set_map_editor(false);
        if !self.launcher.unblock_server(port) {
            tracing::warn!(port, "server port stays blocked");
            return false;
        }
        if self.session.is_logged_in() {
            tracing::warn!("hosting a game while still logged in");
            self.request_logout(LogoutReason::Login).await;
        }

        spec.merge_mods(&self.config.active_mods);
        self.ui.load_mod_messages(&spec.mods);

        let addr = match self.launcher.start_server(StartServer {
            public_server,
            single_player: false,
            source: GameSource::Rules(spec),
            port,
            name: None,
        }) {
            Ok(addr) => addr,
            Err(e) => {
                tracing::error!(error = %e, "could not start local server");
                self.ui.show_error_message(&ErrorTemplate::template(
                    "server.couldNotStart",
                ));
                return false;
            }
        };
        self.hosting = true;

        self.session.set_single_player(false);
        let user = self.config.client_name.clone();
        self.request_login(&user, &addr.host, addr.port).await
    }

    /// Joins a remote server, probing its state first to pick the
    /// login name.
    pub async fn join_multiplayer_game(
        &mut self,
        host: &str,
        port: u16,
        preset_name: Option<String>,
    ) -> bool {
        self.session.set_map_editor(false);
        if self.session.is_logged_in() {
            self.request_logout(LogoutReason::Login).await;
        }

        let reply = self
            .ask(
                host,
                port,
                &Message::GameState { state: None },
                tag::GAME_STATE,
                Some(ErrorTemplate::template("client.noState")),
            )
            .await;
        let Some(Message::GameState { state: Some(state) }) = reply else {
            tracing::warn!(%host, port, "server reported no game state");
            return false;
        };

        let name = match state {
            ServerState::PreGame | ServerState::LoadGame => preset_name
                .unwrap_or_else(|| self.config.client_name.clone()),
            ServerState::InGame => {
                if self.config.refuse_join_in_game {
                    self.ui.show_error_message(&ErrorTemplate::template(
                        "client.debugConnect",
                    ));
                    return false;
                }
                match self.choose_vacant_player(host, port).await {
                    Some(name) => name,
                    None => return false,
                }
            }
            ServerState::EndGame => {
                self.ui.show_error_message(&ErrorTemplate::template(
                    "client.ending",
                ));
                return false;
            }
        };

        self.session.set_single_player(false);
        self.request_login(&name, host, port).await
    }

    /// Asks a running game which player slots are vacant and lets the
    /// user take one over. The login name is the slot's ruler name.
    async fn choose_vacant_player(
        &mut self,
        host: &str,
        port: u16,
    ) -> Option<String> {
        let reply = self
            .ask(
                host,
                port,
                &Message::VacantPlayers { players: None },
                tag::VACANT_PLAYERS,
                Some(ErrorTemplate::template("client.noPlayers")),
            )
            .await;
        let Some(Message::VacantPlayers {
            players: Some(players),
        }) = reply
        else {
            tracing::warn!(%host, port, "no vacant player list");
            return None;
        };
        if players.is_empty() {
            self.ui.show_error_message(&ErrorTemplate::template(
                "client.noPlayers",
            ));
            return None;
        }

        let choices = players
            .iter()
            .map(|nation| ChoiceItem {
                label: self.ui.nation_label(nation),
                value: nation.clone(),
            })
            .collect();
        let nation = self.ui.get_choice("client.choicePlayer", choices)?;
        Some(self.ui.ruler_name(&nation))
    }

    // =====================================================================
    // Menu returns
    // =====================================================================

    /// Returns to the main title screen, leaving any game first.
    pub async fn main_title(&mut self) {
        self.session.set_map_editor(false);
        if self.session.is_logged_in() {
            if self.ui.confirm_stop_game() {
                self.request_logout(LogoutReason::MainTitle).await;
            }
            return;
        }
        self.stop_server();
        self.ui.remove_in_game_components();
        self.ui.show_main_title();
    }

    /// Returns to the new-game setup screen, leaving any game first.
    pub async fn new_game(&mut self) {
        self.session.set_map_editor(false);
        if self.session.is_logged_in() {
            if self.ui.confirm_stop_game() {
                self.request_logout(LogoutReason::NewGame).await;
            }
            return;
        }
        self.stop_server();
        self.ui.remove_in_game_components();
        self.ui.show_new_game_panel();
    }
}
