use std::env;
use std::net::TcpListener;

use laby_explorer::{serve_session, LabyConfig, MockGame, MockLabyrinth, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("laby_explorer=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let config = LabyConfig::from_args(args.get(1).map(String::as_str))?;
    let mock = &config.mock;

    let listener = TcpListener::bind(&mock.bind_address)?;
    info!(
        "Serving {}x{} labyrinths (seed {}) on {}",
        mock.columns, mock.rows, mock.seed, mock.bind_address
    );

    // Connections are served one after the other, each on a fresh game.
    for stream in listener.incoming() {
        let mut stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                error!("Connection failed: {}", e);
                continue;
            }
        };
        if let Ok(peer) = stream.peer_addr() {
            info!("New connection from {}", peer);
        }

        let labyrinth = MockLabyrinth::generate(mock.columns, mock.rows, mock.seed);
        let mut game = MockGame::new(labyrinth);
        match serve_session(&mut stream, &mut game, mock.max_ticks) {
            Ok(ticks) => info!("Session done after {} ticks (won: {})", ticks, game.is_won()),
            Err(e) => error!("Session aborted: {}", e),
        }
    }
    Ok(())
}
