//! Run orchestration: wiring the scrape, replay, and delivery phases
//! together for the CLI.
//!
//! Setup failures (terms file, credentials, working files) abort here;
//! everything downstream degrades per-term, per-record, or per-window.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::corpus::{CorpusReader, RecordSink};
use crate::deliver::deliver_digest;
use crate::digest::DigestWriter;
use crate::fetch::HttpPageFetcher;
use crate::models::Record;
use crate::scrape;
use crate::search::WebSearchProvider;
use crate::summarize::{HttpSummaryProvider, Summarizer};

/// Environment variable holding the web-search subscription key.
pub const SEARCH_KEY_VAR: &str = "BREACHWATCH_SEARCH_KEY";
/// Environment variable holding the summarization-service key.
pub const SUMMARY_KEY_VAR: &str = "BREACHWATCH_SUMMARY_KEY";

fn require_env(var: &str) -> Result<String> {
    std::env::var(var).with_context(|| format!("{} is not set", var))
}

/// Bridges the corpus reader to the summarizer and digest writer: each
/// flushed record is summarized and its entry appended to the digest.
pub struct DigestSink {
    summarizer: Summarizer,
    digest: DigestWriter,
}

impl DigestSink {
    pub fn new(summarizer: Summarizer, digest: DigestWriter) -> Self {
        Self { summarizer, digest }
    }

    pub fn into_digest(self) -> DigestWriter {
        self.digest
    }
}

#[async_trait]
impl RecordSink for DigestSink {
    async fn flush(&mut self, record: &Record, first_for_term: bool) -> Result<()> {
        let summary = self
            .summarizer
            .summarize(&record.url, &record.document)
            .await;
        self.digest
            .append(&record.term, &record.url, &summary.text(), first_for_term)?;
        Ok(())
    }
}

/// Scrape phase: search every term and build the corpus file.
pub async fn run_scrape(config: &Config) -> Result<()> {
    let search_key = require_env(SEARCH_KEY_VAR)?;
    let provider = WebSearchProvider::new(&config.search, &search_key, &config.keywords)?;
    let fetcher = HttpPageFetcher::new(config.search.timeout_secs)?;
    scrape::run_scrape(config, &provider, &fetcher).await?;
    Ok(())
}

/// Replay phase: read the corpus back, summarize each record, and build
/// the digest. Returns the digest path.
pub async fn run_summarize(config: &Config) -> Result<PathBuf> {
    let summary_key = require_env(SUMMARY_KEY_VAR)?;

    let corpus = std::fs::File::open(&config.output.corpus_path).with_context(|| {
        format!(
            "Failed to open corpus file: {}",
            config.output.corpus_path.display()
        )
    })?;
    let lines = std::io::BufReader::new(corpus)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .context("Failed to read corpus file")?;

    let provider = HttpSummaryProvider::new(&config.summarizer, &summary_key)
        .map_err(anyhow::Error::from)?;
    let summarizer = Summarizer::new(
        Box::new(provider),
        &config.keywords,
        config.summarizer.max_chunk_chars,
    );
    let digest = DigestWriter::create(&config.output.digest_dir, &config.output.digest_base)?;

    println!("summarize {}", config.output.corpus_path.display());

    let mut sink = DigestSink::new(summarizer, digest);
    CorpusReader::new().replay(lines, &mut sink).await?;

    let path = sink.into_digest().path().to_path_buf();
    println!("  digest: {}", path.display());
    println!("ok");
    Ok(path)
}

/// Delivery phase: send a finished digest to the chat webhook.
pub async fn run_deliver(config: &Config, digest_path: &Path) -> Result<()> {
    deliver_digest(&config.delivery, digest_path).await
}

/// The full batch job: scrape, then summarize, then deliver.
pub async fn run_all(config: &Config) -> Result<()> {
    run_scrape(config).await?;
    let digest_path = run_summarize(config).await?;
    run_deliver(config, &digest_path).await
}
