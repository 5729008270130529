//! Minimal game model: just the fields the session controller reads.
//!
//! The full rule/model objects live elsewhere; login completion only
//! needs to resolve a player by name, check launch readiness, and
//! validate ownership of a previously active unit after a reconnect.

use std::fmt;

/// Identifier of a unit within a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitId(pub String);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One player slot in the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// The player's name; login resolves against this.
    pub name: String,
    /// Whether the player has signaled ready-to-launch.
    pub ready: bool,
}

/// One unit on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    /// Name of the owning player.
    pub owner: String,
}

/// The game object the server attaches this client to.
#[derive(Debug, Clone, Default)]
pub struct Game {
    players: Vec<Player>,
    units: Vec<Unit>,
    has_map: bool,
    current_player: Option<String>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, name: &str, ready: bool) {
        self.players.push(Player {
            name: name.to_string(),
            ready,
        });
    }

    pub fn add_unit(&mut self, id: &str, owner: &str) {
        self.units.push(Unit {
            id: UnitId(id.to_string()),
            owner: owner.to_string(),
        });
    }

    pub fn set_has_map(&mut self, has_map: bool) {
        self.has_map = has_map;
    }

    /// Whether the game already has a generated/loaded map.
    pub fn has_map(&self) -> bool {
        self.has_map
    }

    /// Resolves a player by name.
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Looks up a unit by id.
    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| &u.id == id)
    }

    pub fn set_current_player(&mut self, name: &str) {
        self.current_player = Some(name.to_string());
    }

    /// The player whose turn it is, if known.
    pub fn current_player(&self) -> Option<&str> {
        self.current_player.as_deref()
    }

    /// True when there is at least one player and all have signaled
    /// ready-to-launch. Trivially true in single player.
    pub fn all_players_ready_to_launch(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_by_name_finds_exact_match() {
        let mut game = Game::new();
        game.add_player("Alice", false);
        game.add_player("Bob", true);

        assert_eq!(game.player_by_name("Bob").map(|p| p.ready), Some(true));
        assert!(game.player_by_name("Carol").is_none());
    }

    #[test]
    fn test_all_players_ready_requires_everyone() {
        let mut game = Game::new();
        assert!(
            !game.all_players_ready_to_launch(),
            "an empty game is not ready"
        );

        game.add_player("Alice", true);
        game.add_player("Bob", false);
        assert!(!game.all_players_ready_to_launch());
    }

    #[test]
    fn test_unit_lookup_and_ownership() {
        let mut game = Game::new();
        game.add_unit("unit:17", "Alice");

        let unit = game.unit(&UnitId("unit:17".into())).expect("exists");
        assert_eq!(unit.owner, "Alice");
        assert!(game.unit(&UnitId("unit:99".into())).is_none());
    }
}
