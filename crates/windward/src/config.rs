//! Client configuration.

use std::collections::HashMap;
use std::time::Duration;

/// When to show the saved-game settings dialog before restoring a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowSavegameSettings {
    /// Always confirm server name/port/visibility.
    Always,
    /// Only confirm for multiplayer saves.
    #[default]
    Multiplayer,
    /// Use the save's defaults without asking.
    Never,
}

/// Configuration for one client process.
///
/// Owned by the [`SessionController`](crate::SessionController);
/// the saved-game flow may update it from attributes stored in a save.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The fixed local identity used when logging in to a server this
    /// client launched itself, and the default name when joining.
    pub client_name: String,

    /// Protocol/version string sent with every login request.
    pub version: String,

    /// Default port for locally hosted servers.
    pub server_port: u16,

    /// Host of the server directory (discovery) service.
    pub meta_server_host: String,

    /// Port of the server directory service.
    pub meta_server_port: u16,

    /// Saved-game settings dialog preference.
    pub show_savegame_settings: ShowSavegameSettings,

    /// Refuse to join games that are already in progress. A business
    /// rule, injectable for e.g. debugging builds; not a protocol
    /// necessity.
    pub refuse_join_in_game: bool,

    /// Names of the active rule-modification packages.
    pub active_mods: Vec<String>,

    /// How long blocking asks wait for their reply.
    pub ask_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_name: "Player".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            server_port: 3541,
            meta_server_host: "meta.windwardgame.org".to_string(),
            meta_server_port: 3540,
            show_savegame_settings: ShowSavegameSettings::default(),
            refuse_join_in_game: false,
            active_mods: Vec::new(),
            ask_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Merges client options stored with a saved game. Unknown keys are
    /// ignored; the save only overrides what it explicitly names.
    pub fn merge_saved_options(&mut self, options: &HashMap<String, String>) {
        if let Some(value) = options.get("show_savegame_settings") {
            match value.as_str() {
                "always" => {
                    self.show_savegame_settings =
                        ShowSavegameSettings::Always;
                }
                "multiplayer" => {
                    self.show_savegame_settings =
                        ShowSavegameSettings::Multiplayer;
                }
                "never" => {
                    self.show_savegame_settings =
                        ShowSavegameSettings::Never;
                }
                other => {
                    tracing::warn!(
                        value = other,
                        "ignoring unknown saved settings preference"
                    );
                }
            }
        }
        if let Some(mods) = options.get("active_mods") {
            self.active_mods = mods
                .split(',')
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Whether the settings dialog should be shown for a save whose
    /// header suggests the given single-player default.
    pub fn should_show_savegame_dialog(
        &self,
        default_single_player: bool,
    ) -> bool {
        match self.show_savegame_settings {
            ShowSavegameSettings::Always => true,
            ShowSavegameSettings::Multiplayer => !default_single_player,
            ShowSavegameSettings::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_show_savegame_dialog_follows_preference() {
        let mut config = ClientConfig::default();

        config.show_savegame_settings = ShowSavegameSettings::Always;
        assert!(config.should_show_savegame_dialog(true));
        assert!(config.should_show_savegame_dialog(false));

        config.show_savegame_settings = ShowSavegameSettings::Multiplayer;
        assert!(!config.should_show_savegame_dialog(true));
        assert!(config.should_show_savegame_dialog(false));

        config.show_savegame_settings = ShowSavegameSettings::Never;
        assert!(!config.should_show_savegame_dialog(true));
        assert!(!config.should_show_savegame_dialog(false));
    }

    #[test]
    fn test_merge_saved_options_overrides_known_keys() {
        let mut config = ClientConfig::default();
        let mut options = HashMap::new();
        options.insert(
            "show_savegame_settings".to_string(),
            "never".to_string(),
        );
        options.insert(
            "active_mods".to_string(),
            "coastal-trade,harsh-winters".to_string(),
        );

        config.merge_saved_options(&options);

        assert_eq!(
            config.show_savegame_settings,
            ShowSavegameSettings::Never
        );
        assert_eq!(
            config.active_mods,
            vec!["coastal-trade".to_string(), "harsh-winters".to_string()]
        );
    }

    #[test]
    fn test_merge_saved_options_ignores_unknown_values() {
        let mut config = ClientConfig::default();
        let mut options = HashMap::new();
        options.insert(
            "show_savegame_settings".to_string(),
            "sometimes".to_string(),
        );

        config.merge_saved_options(&options);

        assert_eq!(
            config.show_savegame_settings,
            ShowSavegameSettings::default()
        );
    }
}
