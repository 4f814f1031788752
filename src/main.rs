//! Binary entry point: initializes logging and the database, then dispatches
//! the parsed operator command.

use clap::Parser;
use dotenvy::dotenv;
use payout_tracker::cli::Cli;
use payout_tracker::config::database;
use payout_tracker::errors::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 3. Parse the command before touching the database so `--help` stays fast
    let cli = Cli::parse();

    // 4. Initialize database
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;
    info!("Database initialized at {}", database::get_database_url());

    // 5. Run the requested command
    payout_tracker::cli::run(&db, cli).await
}
