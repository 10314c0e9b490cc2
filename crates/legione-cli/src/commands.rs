//! Subcommand handlers.
//!
//! Each handler writes its result to stdout; logs go to stderr so output can
//! be piped.

use legione_core::AppConfig;
use legione_scraper::{find_product_link, format_post, AmazonScraper, ScraperConfig};

use crate::Commands;

pub(crate) async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let scraper = AmazonScraper::new(ScraperConfig::from_app_config(config))?;

    match command {
        Commands::Asin { url } => {
            let resolved = scraper.resolve(link_from_input(&url)).await?;
            println!("{}\t{}", resolved.asin, resolved.canonical_url);
        }
        Commands::Scrape { url, json } => {
            let record = scraper.scrape(link_from_input(&url)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{record:#?}");
            }
        }
        Commands::Post { url } => {
            let record = scraper.scrape(link_from_input(&url)).await?;
            println!("{}", format_post(&record));
        }
        Commands::Link { url } => {
            let link = scraper.affiliate_link(link_from_input(&url))?;
            println!("{link}");
        }
    }

    Ok(())
}

/// Picks the Amazon link out of pasted text such as a shared message.
///
/// Falls back to the trimmed input so the scraper reports it as not found.
pub(crate) fn link_from_input(input: &str) -> &str {
    find_product_link(input).unwrap_or_else(|| input.trim())
}
