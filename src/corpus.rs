//! The intermediate corpus file: serialization and replay.
//!
//! Scraped pages are serialized into a flat, line-oriented working file so
//! the summarization pass can run over a stable snapshot:
//!
//! ```text
//! SearchTerm: <term>
//! URL: <url>
//! Last Modified: <value-or-empty>
//! <single normalized line of document text>
//! <blank line>
//! ```
//!
//! One `SearchTerm:` header opens each block; zero or more records follow,
//! and blocks are never interleaved. [`CorpusWriter`] produces the file,
//! [`CorpusReader`] replays it line by line, re-deriving each record and
//! handing it to a [`RecordSink`] exactly once.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::BlocklistConfig;
use crate::fetch::PageFetcher;
use crate::models::Record;

/// True when the URL contains any blocked URL pattern or blocked keyword.
pub fn is_blocked_url(url: &str, blocklist: &BlocklistConfig) -> bool {
    blocklist
        .blocked_urls
        .iter()
        .chain(blocklist.blocked_keywords.iter())
        .any(|pattern| url.contains(pattern.as_str()))
}

/// Append-only writer for the corpus file. Created fresh (truncated) at
/// the start of every run.
pub struct CorpusWriter {
    file: File,
}

impl CorpusWriter {
    /// Create (or truncate) the corpus file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create corpus file: {}", path.display()))?;
        Ok(Self { file })
    }

    /// Write one search term's block: the header, then a record per
    /// accepted URL.
    ///
    /// Blocked URLs are skipped. URLs whose extracted text is empty are
    /// skipped without counting toward `max_records`; per-URL fetch
    /// failures are logged and skipped the same way. Returns the number
    /// of records written.
    pub async fn append_term_block(
        &mut self,
        term: &str,
        urls: &[String],
        fetcher: &dyn PageFetcher,
        blocklist: &BlocklistConfig,
        max_records: usize,
    ) -> Result<usize> {
        writeln!(self.file, "SearchTerm: {}", term)?;

        let mut accepted = 0usize;
        for url in urls {
            if is_blocked_url(url, blocklist) {
                continue;
            }
            if accepted >= max_records {
                break;
            }

            let page = match fetcher.fetch(url).await {
                Ok(page) => page,
                Err(e) => {
                    eprintln!("Warning: failed to scrape {}: {}", url, e);
                    continue;
                }
            };

            if page.text.trim().is_empty() {
                continue;
            }

            writeln!(self.file, "URL: {}", url)?;
            writeln!(self.file, "Last Modified: {}", page.last_modified)?;
            writeln!(self.file, "{}", page.text)?;
            writeln!(self.file)?;
            accepted += 1;
        }

        Ok(accepted)
    }
}

/// Receives each record exactly once as the corpus is replayed.
///
/// `first_for_term` is true only for the first record of a term that
/// reaches the sink successfully; the digest uses it to decide whether to
/// emit the term header.
#[async_trait]
pub trait RecordSink: Send {
    async fn flush(&mut self, record: &Record, first_for_term: bool) -> Result<()>;
}

/// Line-driven state machine that replays the corpus file.
///
/// Running state: the current term, the current URL, the buffered
/// document lines, and the first-record flag. A record is flushed when
/// the next `SearchTerm:` or `URL:` line arrives, or at end of input.
/// Flushing with an empty buffer emits nothing, so two consecutive
/// headers (an empty block) are tolerated silently, and a flushed buffer
/// is always cleared so no record is ever handed to the sink twice.
pub struct CorpusReader {
    term: Option<String>,
    url: Option<String>,
    document: Vec<String>,
    first_for_term: bool,
}

impl CorpusReader {
    pub fn new() -> Self {
        Self {
            term: None,
            url: None,
            document: Vec::new(),
            first_for_term: true,
        }
    }

    /// Replay corpus lines in order, flushing each completed record into
    /// `sink`. Sink failures are logged and replay continues with the
    /// next line.
    pub async fn replay<I, S>(mut self, lines: I, sink: &mut S) -> Result<()>
    where
        I: IntoIterator<Item = String>,
        S: RecordSink + ?Sized,
    {
        for raw in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(term) = line.strip_prefix("SearchTerm:") {
                // Flush the previous term's trailing record before the
                // term changes out from under it.
                self.flush(sink).await;
                self.term = Some(term.trim().to_string());
                self.first_for_term = true;
            } else if let Some(url) = line.strip_prefix("URL:") {
                if self.flush(sink).await {
                    self.first_for_term = false;
                }
                self.url = Some(url.trim().to_string());
                self.document.clear();
            } else if line.strip_prefix("Last Modified:").is_some() {
                // Informational only; not replayed.
            } else if self.url.is_some() {
                self.document.push(line.to_string());
            }
        }

        // Final record of the final term.
        self.flush(sink).await;
        Ok(())
    }

    /// Hand the buffered record to the sink, if there is one. Returns
    /// true only when a record was flushed successfully. The buffer is
    /// cleared either way so a failed record is skipped, not retried.
    async fn flush<S>(&mut self, sink: &mut S) -> bool
    where
        S: RecordSink + ?Sized,
    {
        let Some(url) = self.url.take() else {
            return false;
        };
        let document = self.document.join(" ");
        self.document.clear();

        if document.trim().is_empty() {
            return false;
        }

        let record = Record {
            term: self.term.clone().unwrap_or_default(),
            url,
            last_modified: String::new(),
            document,
        };

        match sink.flush(&record, self.first_for_term).await {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Warning: failed to process record {}: {}", record.url, e);
                false
            }
        }
    }
}

impl Default for CorpusReader {
    fn default() -> Self {
        Self::new()
    }
}
