//! # Breachwatch CLI (`bwatch`)
//!
//! Sequential batch job that searches the web for breach-related news
//! about a list of partner companies, summarizes the matching pages, and
//! delivers the aggregated digest to a chat webhook.
//!
//! ## Usage
//!
//! ```bash
//! bwatch --config ./config/breachwatch.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bwatch run` | Full pipeline: scrape, summarize, deliver |
//! | `bwatch scrape` | Search every term and build the corpus file |
//! | `bwatch summarize` | Replay the corpus into a timestamped digest |
//! | `bwatch deliver <path>` | Send an existing digest to the webhook |
//!
//! Credentials come from the environment: `BREACHWATCH_SEARCH_KEY` for
//! the search API and `BREACHWATCH_SUMMARY_KEY` for the summarization
//! service.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use breachwatch::{config, run};

/// Breachwatch — a breach-news digest for partner companies.
#[derive(Parser)]
#[command(
    name = "bwatch",
    about = "Breachwatch — breach-news digest for partner companies",
    version,
    long_about = "Breachwatch searches the web for breach-related news about each \
    partner company in a terms file, scrapes and summarizes the matching pages, and \
    delivers the aggregated digest to a chat webhook in size-bounded pieces."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/breachwatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: scrape, summarize, deliver.
    Run,

    /// Search every term and write the corpus file.
    ///
    /// Truncates the configured corpus file and rebuilds it from fresh
    /// search results.
    Scrape,

    /// Replay the corpus file into a new timestamped digest.
    Summarize,

    /// Deliver an existing digest file to the chat webhook.
    Deliver {
        /// Path to the digest file to send.
        digest: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Run => {
            run::run_all(&cfg).await?;
        }
        Commands::Scrape => {
            run::run_scrape(&cfg).await?;
        }
        Commands::Summarize => {
            run::run_summarize(&cfg).await?;
        }
        Commands::Deliver { digest } => {
            run::run_deliver(&cfg, &digest).await?;
        }
    }

    Ok(())
}
