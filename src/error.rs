//! Error types for the labyrinth explorer

use thiserror::Error;

use crate::geometry::Cell;

/// Explorer error type
#[derive(Error, Debug)]
pub enum LabyError {
    #[error("Connection failed: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Invalid JSON message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed game state: {0}")]
    MalformedInput(String),

    #[error("Cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("Cells {0} and {1} are not adjacent")]
    NotAdjacent(Cell, Cell),

    #[error("Nearest-frontier search called with an empty frontier")]
    EmptyFrontier,

    #[error("No frontier cell reachable from {0}")]
    NoFrontierRoute(Cell),

    #[error("No route from {from} to {to}")]
    NoRoute { from: Cell, to: Cell },

    #[error("Move from {from} blocked towards {rotation} degrees")]
    Blocked { from: Cell, rotation: u16 },
}

impl From<toml::de::Error> for LabyError {
    fn from(e: toml::de::Error) -> Self {
        LabyError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LabyError>;
