//! Offline stand-in for the game server.
//!
//! `MockLabyrinth` holds the true walls of a maze; `MockGame` plays the
//! rules (walls block moves, corners can be cut when one right-angle path is
//! open, reaching the target wins) and `serve_session` speaks the framed
//! protocol to one client.

use std::io::{Read, Write};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::error::{LabyError, Result};
use crate::geometry::{Cell, Heading};
use crate::network;
use crate::player::Player;
use crate::protocol::{ClientMessage, GameState, ServerMessage};
use crate::route::Command;
use crate::walls::{Wall, Walls};

#[derive(Debug, Clone)]
pub struct MockLabyrinth {
    columns: i32,
    rows: i32,
    walls: Vec<Walls>,
    start: Cell,
    target: Cell,
    start_rotation: Heading,
}

impl MockLabyrinth {
    /// Every cell fully walled in.
    pub fn closed(columns: i32, rows: i32, start: Cell, target: Cell, start_rotation: Heading) -> Self {
        let size = (columns.max(0) as usize) * (rows.max(0) as usize);
        Self {
            columns,
            rows,
            walls: vec![Walls::default(); size],
            start,
            target,
            start_rotation,
        }
    }

    /// No inner walls at all, only the outer border.
    pub fn open(columns: i32, rows: i32, start: Cell, target: Cell, start_rotation: Heading) -> Self {
        let mut labyrinth = Self::closed(columns, rows, start, target, start_rotation);
        for x in 0..columns {
            for y in 0..rows {
                let cell = Cell::new(x, y);
                for heading in [Heading::East, Heading::South] {
                    let next = cell.step(heading);
                    if labyrinth.contains(next) {
                        labyrinth.open_between(cell, heading);
                    }
                }
            }
        }
        labyrinth
    }

    /// Perfect maze carved by a randomized depth-first search, from the
    /// top-left corner to the bottom-right one.
    pub fn generate(columns: i32, rows: i32, seed: u64) -> Self {
        let start = Cell::new(0, 0);
        let target = Cell::new(columns - 1, rows - 1);
        let mut labyrinth = Self::closed(columns, rows, start, target, Heading::North);
        if labyrinth.walls.is_empty() {
            return labyrinth;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut seen = vec![false; labyrinth.walls.len()];
        seen[labyrinth.index(start)] = true;
        let mut stack = vec![start];

        while let Some(&cell) = stack.last() {
            let mut headings = Heading::CARDINALS;
            headings.shuffle(&mut rng);
            let next = headings.into_iter().find(|h| {
                let n = cell.step(*h);
                labyrinth.contains(n) && !seen[labyrinth.index(n)]
            });
            match next {
                Some(heading) => {
                    labyrinth.open_between(cell, heading);
                    let n = cell.step(heading);
                    seen[labyrinth.index(n)] = true;
                    stack.push(n);
                }
                None => {
                    stack.pop();
                }
            }
        }
        debug!("Generated {}x{} labyrinth (seed {})", columns, rows, seed);
        labyrinth
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn start_rotation(&self) -> Heading {
        self.start_rotation
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.columns && cell.y < self.rows
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.x as usize) * (self.rows as usize) + cell.y as usize
    }

    fn open_between(&mut self, cell: Cell, heading: Heading) {
        let next = cell.step(heading);
        let (i, j) = (self.index(cell), self.index(next));
        self.walls[i].set(heading, Wall::Open);
        if let Some(back) = Heading::between(next, cell) {
            self.walls[j].set(back, Wall::Open);
        }
    }

    /// Removes the wall between two cells sharing a side.
    pub fn carve(&mut self, a: Cell, b: Cell) -> Result<()> {
        for cell in [a, b] {
            if !self.contains(cell) {
                return Err(LabyError::OutOfBounds(cell));
            }
        }
        match Heading::between(a, b) {
            Some(heading) if heading.is_cardinal() => {
                self.open_between(a, heading);
                Ok(())
            }
            _ => Err(LabyError::NotAdjacent(a, b)),
        }
    }

    /// Walls of `cell`; outside the grid everything is closed.
    pub fn walls(&self, cell: Cell) -> Walls {
        if self.contains(cell) {
            self.walls[self.index(cell)]
        } else {
            Walls::default()
        }
    }

    pub fn mask(&self, cell: Cell) -> u8 {
        self.walls(cell).to_mask()
    }

    fn is_open(&self, cell: Cell, heading: Heading) -> bool {
        self.walls(cell).is_open(heading)
    }

    /// Whether a `Move` from `from` along `heading` is allowed.
    pub fn can_move(&self, from: Cell, heading: Heading) -> bool {
        if heading.is_cardinal() {
            return self.is_open(from, heading);
        }
        let (dx, dy) = heading.delta();
        let (Some(horizontal), Some(vertical)) =
            (Heading::from_delta(dx, 0), Heading::from_delta(0, dy))
        else {
            return false;
        };
        let around = |first: Heading, second: Heading| {
            self.is_open(from, first) && self.is_open(from.step(first), second)
        };
        around(horizontal, vertical) || around(vertical, horizontal)
    }
}

/// One running game against a `MockLabyrinth`.
#[derive(Debug, Clone)]
pub struct MockGame {
    labyrinth: MockLabyrinth,
    player: Player,
    ticks: u64,
}

impl MockGame {
    pub fn new(labyrinth: MockLabyrinth) -> Self {
        let player = Player::new(labyrinth.start(), labyrinth.start_rotation());
        Self {
            labyrinth,
            player,
            ticks: 0,
        }
    }

    pub fn labyrinth(&self) -> &MockLabyrinth {
        &self.labyrinth
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Commands applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_won(&self) -> bool {
        self.player.position == self.labyrinth.target()
    }

    /// What the game sends for the current tick.
    pub fn state(&self) -> GameState {
        GameState {
            columns: self.labyrinth.columns(),
            rows: self.labyrinth.rows(),
            start: self.labyrinth.start(),
            target: self.labyrinth.target(),
            start_rotation: self.labyrinth.start_rotation(),
            player: self.player,
            square: self.labyrinth.mask(self.player.position),
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<()> {
        self.ticks += 1;
        if command == Command::Move
            && !self
                .labyrinth
                .can_move(self.player.position, self.player.rotation)
        {
            return Err(LabyError::Blocked {
                from: self.player.position,
                rotation: self.player.rotation.degrees(),
            });
        }
        self.player.apply(
            command,
            self.labyrinth.start(),
            self.labyrinth.start_rotation(),
        );
        Ok(())
    }
}

/// Plays `game` with one client until it is won, a move is refused, or
/// `max_ticks` commands were received. Returns the number of ticks played.
pub fn serve_session<S: Read + Write>(stream: &mut S, game: &mut MockGame, max_ticks: u64) -> Result<u64> {
    match network::receive_json::<_, ClientMessage>(stream)? {
        ClientMessage::Subscribe { name } => info!("Player {} subscribed", name),
        other => {
            return Err(LabyError::Protocol(format!(
                "expected Subscribe, got {other:?}"
            )))
        }
    }
    network::send_json(stream, &ServerMessage::GameState(game.state()))?;

    loop {
        let command = match network::receive_json::<_, ClientMessage>(stream)? {
            ClientMessage::Command(command) => command,
            other => {
                return Err(LabyError::Protocol(format!(
                    "expected Command, got {other:?}"
                )))
            }
        };

        if let Err(e) = game.apply(command) {
            warn!("Refusing {:?}: {}", command, e);
            network::send_json(stream, &ServerMessage::ActionError(e.to_string()))?;
            return Ok(game.ticks());
        }

        if game.is_won() || game.ticks() >= max_ticks {
            let won = game.is_won();
            info!("Game over after {} ticks (won: {})", game.ticks(), won);
            network::send_json(
                stream,
                &ServerMessage::GameOver {
                    ticks: game.ticks(),
                    won,
                },
            )?;
            return Ok(game.ticks());
        }
        network::send_json(stream, &ServerMessage::GameState(game.state()))?;
    }
}
