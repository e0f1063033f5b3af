//! Messages exchanged with the game server.

use serde::{Deserialize, Serialize};

use crate::error::{LabyError, Result};
use crate::geometry::{Cell, Heading};
use crate::player::Player;
use crate::route::Command;

/// Everything the game tells the player on one tick.
///
/// `columns`, `rows`, `start`, `target` and `start_rotation` never change
/// during a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub columns: i32,
    pub rows: i32,
    pub start: Cell,
    pub target: Cell,
    pub start_rotation: Heading,
    pub player: Player,
    /// Wall mask of the cell the player stands on.
    pub square: u8,
}

impl GameState {
    fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.columns && cell.y < self.rows
    }

    /// Rejects states the explorer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.columns <= 0 || self.rows <= 0 {
            return Err(LabyError::MalformedInput(format!(
                "grid of {}x{} cells",
                self.columns, self.rows
            )));
        }
        if self.square > 0b1111 {
            return Err(LabyError::MalformedInput(format!(
                "wall mask {} does not fit in 4 bits",
                self.square
            )));
        }
        for (name, cell) in [
            ("start", self.start),
            ("target", self.target),
            ("player", self.player.position),
        ] {
            if !self.contains(cell) {
                return Err(LabyError::MalformedInput(format!(
                    "{name} {cell} outside the {}x{} grid",
                    self.columns, self.rows
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
    GameState(GameState),
    GameOver { ticks: u64, won: bool },
    ActionError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    Subscribe { name: String },
    Command(Command),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState {
            columns: 4,
            rows: 3,
            start: Cell::new(0, 0),
            target: Cell::new(3, 2),
            start_rotation: Heading::East,
            player: Player::new(Cell::new(1, 0), Heading::South),
            square: 0b1001,
        }
    }

    #[test]
    fn test_parse_game_state() {
        let json = r#"{
            "columns": 4, "rows": 3,
            "start": {"x": 0, "y": 0}, "target": {"x": 3, "y": 2},
            "startRotation": 90,
            "player": {"position": {"x": 1, "y": 0}, "rotation": 180},
            "square": 9
        }"#;
        let parsed: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, state());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_ticks() {
        let mut bad_mask = state();
        bad_mask.square = 16;
        assert!(matches!(
            bad_mask.validate(),
            Err(LabyError::MalformedInput(_))
        ));

        let mut outside = state();
        outside.player.position = Cell::new(4, 0);
        assert!(outside.validate().is_err());

        let mut empty = state();
        empty.rows = 0;
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_messages_are_externally_tagged() {
        let msg = ClientMessage::Command(Command::Move);
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"Command":{"action":"move"}}"#
        );
        let over: ServerMessage =
            serde_json::from_str(r#"{"GameOver":{"ticks":12,"won":true}}"#).unwrap();
        assert_eq!(over, ServerMessage::GameOver { ticks: 12, won: true });
    }
}
