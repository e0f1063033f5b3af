//! Routes through the connectivity graph and their translation into game
//! commands.

use serde::{Deserialize, Serialize};

use crate::error::{LabyError, Result};
use crate::geometry::{Cell, Heading};

/// One atomic instruction for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Command {
    /// Advance one cell along the current rotation.
    Move,
    Rotate { rotation: Heading },
    /// Put the player back on the start cell with the start rotation.
    Reset,
}

/// Ordered cells from a start to a destination, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    cells: Vec<Cell>,
    cost: u32,
}

impl Route {
    pub fn new(cells: Vec<Cell>, cost: u32) -> Self {
        Self { cells, cost }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells, start and destination included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Moves plus one extra unit for every rotation on the way.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn destination(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

/// Turns consecutive cells into rotate/move commands, starting from
/// `heading`. Every `Move` is preceded by at most one `Rotate`.
pub fn compile(cells: &[Cell], heading: Heading) -> Result<Vec<Command>> {
    let mut commands = Vec::with_capacity(cells.len().saturating_sub(1) * 2);
    let mut current = heading;

    for pair in cells.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let needed = Heading::between(prev, next).ok_or(LabyError::NotAdjacent(prev, next))?;
        if needed != current {
            commands.push(Command::Rotate { rotation: needed });
            current = needed;
        }
        commands.push(Command::Move);
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn replay(start: Cell, heading: Heading, commands: &[Command]) -> Vec<Cell> {
        let mut player = Player::new(start, heading);
        let mut cells = vec![start];
        for command in commands {
            player.apply(*command, start, heading);
            if *command == Command::Move {
                cells.push(player.position);
            }
        }
        cells
    }

    #[test]
    fn test_straight_corridor_has_no_rotation() {
        let route: Vec<Cell> = (0..5).map(|x| Cell::new(x, 0)).collect();
        let commands = compile(&route, Heading::East).unwrap();
        assert_eq!(commands, vec![Command::Move; 4]);
    }

    #[test]
    fn test_corridor_needs_only_first_rotation() {
        let route: Vec<Cell> = (0..5).map(|y| Cell::new(0, y)).collect();
        let commands = compile(&route, Heading::North).unwrap();
        assert_eq!(
            commands[0],
            Command::Rotate {
                rotation: Heading::South
            }
        );
        assert!(commands[1..].iter().all(|c| *c == Command::Move));
        assert_eq!(commands.len(), 5);
    }

    #[test]
    fn test_corner_cut_rotates_diagonally() {
        let route = vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 1)];
        let commands = compile(&route, Heading::East).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Rotate {
                    rotation: Heading::SouthEast
                },
                Command::Move,
                Command::Rotate {
                    rotation: Heading::East
                },
                Command::Move,
            ]
        );
    }

    #[test]
    fn test_replay_reproduces_route() {
        let route = vec![
            Cell::new(2, 2),
            Cell::new(2, 1),
            Cell::new(3, 0),
            Cell::new(4, 0),
            Cell::new(4, 1),
            Cell::new(3, 2),
        ];
        for heading in Heading::ALL {
            let commands = compile(&route, heading).unwrap();
            let rotations = commands
                .iter()
                .filter(|c| matches!(c, Command::Rotate { .. }))
                .count();
            assert!(rotations <= route.len() - 1);
            assert!(commands.len() >= route.len() - 1);
            assert!(commands.len() <= 2 * (route.len() - 1));
            assert_eq!(replay(route[0], heading, &commands), route);
        }
    }

    #[test]
    fn test_trivial_route_compiles_to_nothing() {
        assert!(compile(&[Cell::new(1, 1)], Heading::North).unwrap().is_empty());
        assert!(compile(&[], Heading::North).unwrap().is_empty());
    }

    #[test]
    fn test_gap_in_route_is_rejected() {
        let route = vec![Cell::new(0, 0), Cell::new(2, 0)];
        assert!(matches!(
            compile(&route, Heading::East),
            Err(LabyError::NotAdjacent(_, _))
        ));
    }

    #[test]
    fn test_command_wire_format() {
        assert_eq!(
            serde_json::to_string(&Command::Move).unwrap(),
            r#"{"action":"move"}"#
        );
        assert_eq!(
            serde_json::to_string(&Command::Rotate {
                rotation: Heading::West
            })
            .unwrap(),
            r#"{"action":"rotate","rotation":270}"#
        );
        let reset: Command = serde_json::from_str(r#"{"action":"reset"}"#).unwrap();
        assert_eq!(reset, Command::Reset);
    }
}
