//! Exploration state machine.
//!
//! Decides one command per tick. Searching only happens when the queue of
//! commands computed on an earlier tick has run dry.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::ascii_utils::render_map;
use crate::config::ExplorationConfig;
use crate::error::{LabyError, Result};
use crate::geometry::{Cell, Heading};
use crate::map::MazeMap;
use crate::protocol::GameState;
use crate::route::{compile, Command};
use crate::search::{nearest_frontier, shortest_route};
use crate::walls::Walls;

/// State of the exploration process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing received yet
    Uninitialized,
    /// Walking to frontier cells
    Exploring,
    /// Frontier exhausted, computing the way to the target
    Finishing,
    /// Route to the target queued, nothing left to decide
    Done,
}

pub struct Explorer {
    config: ExplorationConfig,
    phase: Phase,
    map: Option<MazeMap>,
    start: Cell,
    start_rotation: Heading,
    queue: VecDeque<Command>,
    next_progress: usize,
}

impl Explorer {
    pub fn new(config: ExplorationConfig) -> Self {
        Self {
            config,
            phase: Phase::Uninitialized,
            map: None,
            start: Cell::new(0, 0),
            start_rotation: Heading::North,
            queue: VecDeque::new(),
            next_progress: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn map(&self) -> Option<&MazeMap> {
        self.map.as_ref()
    }

    /// Commands already decided but not handed out yet.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns the command to play for this tick.
    pub fn next_command(&mut self, state: &GameState) -> Result<Command> {
        if let Some(command) = self.queue.pop_front() {
            return Ok(command);
        }
        state.validate()?;

        if self.phase == Phase::Uninitialized {
            self.initialize(state)?;
        }

        match self.phase {
            Phase::Exploring => self.explore(state)?,
            Phase::Done => {
                warn!("Nothing left to play, resetting");
                return Ok(Command::Reset);
            }
            Phase::Uninitialized | Phase::Finishing => {
                return Err(LabyError::Protocol(format!(
                    "tick received while {:?}",
                    self.phase
                )))
            }
        }

        self.queue
            .pop_front()
            .ok_or_else(|| LabyError::Protocol("no command computed for this tick".to_string()))
    }

    fn initialize(&mut self, state: &GameState) -> Result<()> {
        let map = MazeMap::new(state.columns, state.rows, state.target)?;
        info!(
            "Exploring {}x{} labyrinth from {} facing {} towards {}",
            state.columns, state.rows, state.start, state.start_rotation, state.target
        );
        self.map = Some(map);
        self.start = state.start;
        self.start_rotation = state.start_rotation;
        self.phase = Phase::Exploring;
        Ok(())
    }

    fn map_mut(&mut self) -> Result<&mut MazeMap> {
        self.map
            .as_mut()
            .ok_or_else(|| LabyError::Protocol("labyrinth not initialized".to_string()))
    }

    fn explore(&mut self, state: &GameState) -> Result<()> {
        let position = state.player.position;
        let heading = state.player.rotation;
        let walls = Walls::from_mask(state.square)?;

        let map = self.map_mut()?;
        map.observe(position, &walls)?;
        let visited = map.visited_count();
        let unexplored = map.unexplored();
        let frontier_empty = map.frontier().is_empty();
        self.log_progress(visited, unexplored);

        if frontier_empty {
            return self.finish(position);
        }

        let start = self.start;
        let start_rotation = self.start_rotation;
        let map = self.map_mut()?;
        let from_current = match nearest_frontier(map, position, heading) {
            Ok(route) => route,
            Err(LabyError::NoFrontierRoute(_)) if map.frontier().is_empty() => {
                return self.finish(position);
            }
            Err(e) => return Err(e),
        };
        let from_start = nearest_frontier(map, start, start_rotation)?;

        if from_current.len() > from_start.len() + self.config.reset_margin {
            debug!(
                "Restarting from {} ({} cells instead of {})",
                start,
                from_start.len(),
                from_current.len()
            );
            self.queue.push_back(Command::Reset);
            self.queue
                .extend(compile(from_start.cells(), start_rotation)?);
        } else {
            self.queue.extend(compile(from_current.cells(), heading)?);
        }
        Ok(())
    }

    fn log_progress(&mut self, visited: usize, unexplored: usize) {
        if visited >= self.next_progress {
            info!("{} cells left to explore", unexplored);
            self.next_progress = visited + self.config.progress_interval;
        }
    }

    fn finish(&mut self, position: Cell) -> Result<()> {
        self.phase = Phase::Finishing;
        let (start, start_rotation) = (self.start, self.start_rotation);
        let map = self.map_mut()?;
        let target = map.goal();
        let route = shortest_route(map, start, target, start_rotation)?;
        debug!("Explored labyrinth:\n{}", render_map(map, Some(position)));
        info!(
            "Exploration complete, {} cells to the target (cost {})",
            route.len(),
            route.cost()
        );

        self.queue.push_back(Command::Reset);
        self.queue.extend(compile(route.cells(), start_rotation)?);
        self.phase = Phase::Done;
        Ok(())
    }
}
