//! Online labyrinth explorer.
//!
//! The player only sees the walls of the cell it stands on. `Explorer`
//! turns those observations into a connectivity graph, walks to the closest
//! unexplored cell until nothing is left, then plays the cheapest route from
//! the start to the target. `labyrinth_mock` provides an offline game to
//! play against.

pub mod ascii_utils;
pub mod client;
pub mod config;
pub mod error;
pub mod explorer;
pub mod frontier;
pub mod geometry;
pub mod labyrinth_mock;
pub mod map;
pub mod network;
pub mod player;
pub mod protocol;
pub mod route;
pub mod search;
pub mod walls;

pub use client::GameClient;
pub use config::{LabyConfig, DEFAULT_ADDRESS as ADDRESS};
pub use error::{LabyError, Result};
pub use explorer::{Explorer, Phase};
pub use geometry::{Cell, Heading};
pub use labyrinth_mock::{serve_session, MockGame, MockLabyrinth};
pub use map::MazeMap;
pub use protocol::{ClientMessage, GameState, ServerMessage};
pub use route::{Command, Route};
