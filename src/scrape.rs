//! Scraping phase: search each partner company, fetch the matching
//! pages, and serialize them into the corpus file.
//!
//! Strictly sequential, one term at a time, with a fixed pause between
//! terms. A failure scoped to one term is logged and the run continues
//! with the next term; only the terms file and corpus file themselves
//! are fatal.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::corpus::CorpusWriter;
use crate::fetch::PageFetcher;
use crate::search::SearchProvider;

/// Load the partner-company terms, one per line, blank lines ignored.
pub fn load_terms(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read terms file: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Build the corpus for every term. Returns the number of records
/// written across all terms.
pub async fn run_scrape(
    config: &Config,
    provider: &dyn SearchProvider,
    fetcher: &dyn PageFetcher,
) -> Result<usize> {
    let terms = load_terms(&config.input.terms_path)?;
    let mut writer = CorpusWriter::create(&config.output.corpus_path)?;

    println!("scrape {} term(s)", terms.len());

    let mut total_records = 0usize;
    for term in &terms {
        match provider.search(term).await {
            Ok(urls) => {
                match writer
                    .append_term_block(
                        term,
                        &urls,
                        fetcher,
                        &config.blocklist,
                        config.search.max_records_per_term,
                    )
                    .await
                {
                    Ok(n) => total_records += n,
                    Err(e) => eprintln!("Warning: failed to record term '{}': {}", term, e),
                }
            }
            Err(e) => eprintln!("Warning: search failed for term '{}': {}", term, e),
        }

        tokio::time::sleep(Duration::from_secs(config.search.term_delay_secs)).await;
    }

    println!("  records written: {}", total_records);
    println!("ok");
    Ok(total_records)
}
