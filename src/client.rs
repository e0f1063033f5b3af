use std::io::{Read, Write};

use tracing::{debug, info};

use crate::config::ExplorationConfig;
use crate::error::{LabyError, Result};
use crate::explorer::Explorer;
use crate::network;
use crate::protocol::{ClientMessage, ServerMessage};

/// Plays one game over a framed stream.
pub struct GameClient<S: Read + Write> {
    stream: S,
    name: String,
    explorer: Explorer,
}

impl<S: Read + Write> GameClient<S> {
    pub fn new(stream: S, name: &str, config: ExplorationConfig) -> Self {
        Self {
            stream,
            name: name.to_string(),
            explorer: Explorer::new(config),
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    fn receive(&mut self) -> Result<ServerMessage> {
        network::receive_json(&mut self.stream)
    }

    fn send(&mut self, message: &ClientMessage) -> Result<()> {
        network::send_json(&mut self.stream, message)
    }

    pub fn subscribe(&mut self) -> Result<()> {
        let message = ClientMessage::Subscribe {
            name: self.name.clone(),
        };
        self.send(&message)?;
        info!("Subscribed as {}", self.name);
        Ok(())
    }

    /// Answers every game state with one command until the game is over.
    /// Returns the number of ticks the server counted.
    pub fn run(&mut self) -> Result<u64> {
        self.subscribe()?;
        loop {
            match self.receive()? {
                ServerMessage::GameState(state) => {
                    let command = self.explorer.next_command(&state)?;
                    debug!("{} -> {:?}", state.player.position, command);
                    self.send(&ClientMessage::Command(command))?;
                }
                ServerMessage::GameOver { ticks, won } => {
                    info!("Game over after {} ticks (won: {})", ticks, won);
                    return Ok(ticks);
                }
                ServerMessage::ActionError(error) => {
                    return Err(LabyError::Protocol(format!("action refused: {error}")));
                }
            }
        }
    }
}
