//! Quickle Game Server
//!
//! Serves the daily word game API for the Quickle frontend.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use quickle::{GameServer, ServerConfig, MAX_GUESSES, VERSION, WORD_LENGTH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Quickle Server v{}", VERSION);
    info!("Word Length: {} letters, {} guesses", WORD_LENGTH, MAX_GUESSES);

    let config = ServerConfig::from_env().context("Invalid configuration")?;
    if config.reveal_word {
        info!("Daily word will be revealed in /api/wordle/daily-word responses");
    }

    let server = GameServer::from_config(config);
    server.run().await.context("Server failed")?;

    Ok(())
}
