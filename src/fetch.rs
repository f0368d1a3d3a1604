//! Page fetching and body-text extraction.
//!
//! Defines the [`PageFetcher`] trait and the reqwest-backed
//! [`HttpPageFetcher`], which downloads a page and collapses its `<body>`
//! text to a single whitespace-normalized line.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

/// A fetched page: extracted body text plus the `Last-Modified` header
/// (empty when the server omitted it).
#[derive(Debug, Clone)]
pub struct Page {
    pub text: String,
    pub last_modified: String,
}

/// Fetches one URL and extracts its readable text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Page>;
}

/// HTTP fetcher with a per-request timeout.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<Page> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let last_modified = response
            .headers()
            .get(reqwest::header::LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let html = response.text().await?;
        let text = extract_body_text(&html)?;

        Ok(Page {
            text,
            last_modified,
        })
    }
}

/// Extract the `<body>` text of an HTML page, collapsing all runs of
/// whitespace to single spaces.
pub fn extract_body_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("body").map_err(|e| anyhow!("invalid body selector: {}", e))?;

    let body = document
        .select(&selector)
        .next()
        .ok_or_else(|| anyhow!("page has no <body> element"))?;

    let raw = body.text().collect::<Vec<_>>().join(" ");
    Ok(raw.split_whitespace().collect::<Vec<_>>().join(" "))
}
