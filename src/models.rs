//! Core data types that flow through the scrape → corpus → summarize →
//! digest pipeline.

/// One scraped page, as produced by the scraper and re-derived by the
/// corpus reader: a URL, an optional `Last-Modified` stamp, and the
/// page's extracted body text collapsed to a single normalized line.
///
/// A record with an empty document is never summarized and never reaches
/// the digest.
#[derive(Debug, Clone)]
pub struct Record {
    /// The partner-company search term this record belongs to.
    pub term: String,
    pub url: String,
    /// `Last-Modified` response header, empty when the server omitted it.
    pub last_modified: String,
    /// Extracted body text, whitespace-normalized to one line.
    pub document: String,
}

/// How a merged summary was selected for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// At least one chunk's sentences were narrowed to the keyword-matching
    /// subset.
    KeywordPrioritized,
    /// Every chunk fell back to the full unfiltered sentence set.
    Full,
}

/// The merged summary for one record: sentences accumulated across all
/// chunks that completed before processing stopped.
#[derive(Debug, Clone)]
pub struct SummaryResult {
    pub sentences: Vec<String>,
    pub kind: SummaryKind,
}

impl SummaryResult {
    /// Render the summary as the single paragraph written to the digest.
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }
}
