//! Musical Chairs - Entry Point
//!
//! Loads the configuration, starts the game and prints the narration.
//!
//! Usage: `musical_chairs [--json] [CONFIG.json]`

use std::env;

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use musical_chairs::{Game, GameConfig, GameEvent};

const USAGE: &str = "usage: musical_chairs [--json] [CONFIG.json]";

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct Cli {
    /// Print narration as JSON lines
    json: bool,
    /// Optional config file
    config: Option<PathBuf>,
}

impl Cli {
    /// Parse arguments (without the program name).
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut cli = Cli::default();
        for arg in args {
            match arg.as_str() {
                "--json" => cli.json = true,
                flag if flag.starts_with('-') => {
                    return Err(format!("unknown option '{}'\n{}", flag, USAGE));
                }
                _ if cli.config.is_some() => {
                    return Err(format!("unexpected argument '{}'\n{}", arg, USAGE));
                }
                _ => cli.config = Some(PathBuf::from(&arg)),
            }
        }
        Ok(cli)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=musical_chairs=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("musical_chairs=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse(env::args().skip(1))?;
    let json = cli.json;
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let game = Game::new(config)?;
    info!("Starting game with {} players", game.config().players);

    // Narrator task prints events as they happen
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let narrator = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if json {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => tracing::error!("Failed to serialize event: {}", e),
                }
            } else {
                println!("{}", event);
            }
        }
    });

    game.play(event_tx).await?;
    narrator.await?;

    if !json {
        println!("Musical chairs finished.");
    }
    Ok(())
}
