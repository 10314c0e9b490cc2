mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use legione_scraper::ScraperError;

#[derive(Debug, Parser)]
#[command(name = "legione")]
#[command(about = "Legione dei Risparmiatori: Amazon product lookup and post builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the ASIN and canonical link of a product URL.
    Asin { url: String },
    /// Scrape a product page and print the record.
    Scrape {
        url: String,
        /// Print the record as pretty JSON.
        #[arg(long)]
        json: bool,
    },
    /// Scrape a product page and print the Telegram post.
    Post { url: String },
    /// Print the affiliate link for a product URL.
    Link { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = legione_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match commands::run(cli.command, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            match e.downcast_ref::<ScraperError>() {
                Some(scrape_err) => eprintln!("{}", scrape_err.user_message()),
                None => eprintln!("errore: {e:#}"),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
