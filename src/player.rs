use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Heading};
use crate::route::Command;

/// Position and orientation of the player, as reported by the game each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub position: Cell,
    pub rotation: Heading,
}

impl Player {
    pub fn new(position: Cell, rotation: Heading) -> Self {
        Self { position, rotation }
    }

    /// The cell a `Move` would lead to.
    pub fn ahead(&self) -> Cell {
        self.position.step(self.rotation)
    }

    /// Applies a command without any wall check.
    pub fn apply(&mut self, command: Command, start: Cell, start_rotation: Heading) {
        match command {
            Command::Move => self.position = self.ahead(),
            Command::Rotate { rotation } => self.rotation = rotation,
            Command::Reset => {
                self.position = start;
                self.rotation = start_rotation;
            }
        }
    }
}
