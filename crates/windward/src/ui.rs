//! The presentation boundary.
//!
//! The controller never draws anything; it hands localizable templates
//! and panel requests to whatever implements [`UserInterface`]. All
//! notification-style methods are fire-and-forget — implementations
//! must dispatch to their own UI context and return immediately, never
//! block the session's control flow. The few methods that *do* return a
//! value (`get_choice`, the savegame dialog, `confirm_stop_game`,
//! `ask_to_quit`) are synchronous questions asked before any connection
//! state is mutated.

use windward_protocol::ErrorTemplate;

use crate::game::{Game, UnitId};

/// What the user chose in the saved-game settings dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingSavegameInfo {
    /// Server display name, if the user set one.
    pub server_name: Option<String>,
    /// Requested port; 0 for ephemeral.
    pub port: u16,
    /// Whether to restore as a single-player game.
    pub single_player: bool,
}

/// One selectable option in a choice dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem<T> {
    /// Localized label shown to the user.
    pub label: String,
    /// The value handed back when this item is chosen.
    pub value: T,
}

/// Everything the session controller needs from the presentation layer.
pub trait UserInterface: Send + 'static {
    // -- Notifications (fire-and-forget) --------------------------------

    /// Shows a localized error message.
    fn show_error_message(&self, template: &ErrorTemplate);

    /// Shows a localized information message by key.
    fn show_information_message(&self, key: &str);

    /// Shows a status panel with the given message key.
    fn show_status_panel(&self, key: &str);

    /// Closes the status panel, if shown.
    fn close_status_panel(&self);

    /// Surfaces the pre-game setup stage so remaining options and
    /// nation choices can be made.
    fn show_start_game_panel(
        &self,
        game: &Game,
        player: &str,
        single_player: bool,
    );

    /// Hands presentation control back to the main title screen.
    fn show_main_title(&self);

    /// Hands presentation control back to the new-game setup screen.
    fn show_new_game_panel(&self);

    /// Tears down in-game widgets before a menu screen takes over.
    fn remove_in_game_components(&self);

    /// Makes the given unit the active one after a rejoin.
    fn set_active_unit(&self, unit: &UnitId);

    /// Processes the next queued game-state notification, if any.
    fn next_model_message(&self);

    /// Loads the message bundles for the given active mods.
    fn load_mod_messages(&self, mods: &[String]);

    // -- Questions (synchronous) ----------------------------------------

    /// Asks the user to pick one of the given options. `None` means the
    /// user cancelled.
    fn get_choice(
        &self,
        prompt: &str,
        choices: Vec<ChoiceItem<String>>,
    ) -> Option<String>;

    /// Shows the saved-game settings dialog. Returns `false` when the
    /// user cancelled; otherwise [`UserInterface::loading_savegame_info`]
    /// holds the chosen values.
    fn show_loading_savegame_dialog(
        &self,
        default_public: bool,
        default_single_player: bool,
    ) -> bool;

    /// The values chosen in the last accepted savegame dialog.
    fn loading_savegame_info(&self) -> LoadingSavegameInfo;

    /// Asks whether to stop the game in progress.
    fn confirm_stop_game(&self) -> bool;

    /// Asks whether to quit after an unrecoverable session failure.
    fn ask_to_quit(&self) -> bool;

    // -- Reconnect support ----------------------------------------------

    /// The unit that was active before the connection dropped, if the
    /// reconnect handshake supplied one.
    fn reconnect(&self) -> Option<UnitId>;

    // -- Localization lookups -------------------------------------------

    /// The localized country name for a nation identifier.
    fn nation_label(&self, nation: &str) -> String;

    /// The localized ruler name for a nation identifier; used as the
    /// login name when taking over a vacant slot.
    fn ruler_name(&self, nation: &str) -> String;

    // -- Process control ------------------------------------------------

    /// Terminates the client cleanly.
    fn quit(&self);
}
