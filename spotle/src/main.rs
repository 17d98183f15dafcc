//! Spotle - guess the mystery artist from Spotify hints.
//!
//! ```bash
//! cargo run -p spotle                              # Mystery artist from Spotify
//! cargo run -p spotle -- --roster artists.json     # Offline with a local roster
//! ```

mod cli;
mod console;
mod display;

use spotify::Spotify;
use spotle_core::{Game, RosterCatalog, SessionConfig, SpotifyCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let env_max_guesses = std::env::var(cli::MAX_GUESSES_ENV).ok();

    let options = match cli::parse_args(&args, env_max_guesses.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if options.help {
        cli::print_help();
        return Ok(());
    }

    let config = SessionConfig::new().with_max_guesses(options.max_guesses);

    if let Some(path) = &options.roster {
        let catalog = RosterCatalog::load(path).await?;
        let game = Game::start(catalog, config).await?;
        console::run(game).await?;
        return Ok(());
    }

    let client = match Spotify::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}.");
            eprintln!("Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET");
            eprintln!("in a .env file or the environment, or play offline with --roster <PATH>.");
            std::process::exit(1);
        }
    };
    client.authenticate().await?;

    let mut catalog = SpotifyCatalog::new(client);
    if let Some(market) = options.market {
        catalog = catalog.with_market(market);
    }
    if let Some(playlist) = options.playlist {
        catalog = catalog.with_playlist(playlist);
    }

    println!("Picking a mystery artist...");
    let game = Game::start(catalog, config).await?;
    console::run(game).await?;

    Ok(())
}
