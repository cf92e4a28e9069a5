//! Mason binary.
//!
//! Reads configuration from the environment, connects the spreadsheet
//! store and the Discord gateway, and runs the queue scheduler until shut
//! down. Configuration faults exit nonzero before anything connects.

use clap::Parser;
use mason::{GoogleSheetsClient, MasonBot, MasonConfig};

/// Mason - sheet-driven Discord provisioning bot
#[derive(Parser, Debug)]
#[command(name = "mason")]
#[command(about = "Sheet-driven Discord provisioning bot", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = MasonConfig::from_env()?;
    let store = GoogleSheetsClient::new(&config.sheets_creds_json, &config.sheet_name)?;

    let mut bot = MasonBot::new(&config, store).await?;
    bot.start().await?;

    Ok(())
}
