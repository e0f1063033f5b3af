use std::env;

use laby_explorer::{network, GameClient, LabyConfig, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("laby_explorer=info")),
        )
        .init();

    // Usage: laby-explorer [config.toml] [--name <player>]
    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).filter(|a| !a.starts_with("--"));
    let mut config = LabyConfig::from_args(config_path.map(String::as_str))?;
    if let Some(name) = args
        .iter()
        .position(|a| a == "--name")
        .and_then(|i| args.get(i + 1))
    {
        config.connection.player_name = name.clone();
    }

    let stream = network::connect_to_server(&config.connection.address)?;
    info!("Connected to {}", config.connection.address);

    let mut client = GameClient::new(
        stream,
        &config.connection.player_name,
        config.exploration.clone(),
    );
    match client.run() {
        Ok(ticks) => {
            info!("Finished in {} ticks", ticks);
            Ok(())
        }
        Err(e) => {
            error!("Game aborted: {}", e);
            Err(e)
        }
    }
}
