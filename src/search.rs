//! Web-search provider.
//!
//! Defines the [`SearchProvider`] trait and the [`WebSearchProvider`]
//! implementation for a Bing-style web search API: subscription key in a
//! header, query parameters for freshness and market, JSON results under
//! `webPages.value`.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::SearchConfig;

/// Resolves a search term to an ordered list of candidate result URLs.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<String>>;
}

/// Bing-style web search over HTTP.
pub struct WebSearchProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    freshness: String,
    market: String,
    keywords: Vec<String>,
}

impl WebSearchProvider {
    pub fn new(config: &SearchConfig, api_key: &str, keywords: &[String]) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: api_key.to_string(),
            freshness: config.freshness.clone(),
            market: config.market.clone(),
            keywords: keywords.to_vec(),
        })
    }
}

#[async_trait]
impl SearchProvider for WebSearchProvider {
    async fn search(&self, term: &str) -> Result<Vec<String>> {
        let query = build_query(term, &self.keywords);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .query(&[
                ("q", query.as_str()),
                ("freshness", self.freshness.as_str()),
                ("mkt", self.market.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("search API error {}: {}", status, body);
        }

        let json: serde_json::Value = response.json().await?;
        Ok(parse_search_response(&json))
    }
}

/// Combine the term with the breach keywords:
/// `"<term>" AND ("breach" OR "cyber attack" OR "hack")`.
pub fn build_query(term: &str, keywords: &[String]) -> String {
    let combined = keywords
        .iter()
        .map(|k| format!("\"{}\"", k))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("\"{}\" AND ({})", term, combined)
}

/// Pull the result URLs out of `webPages.value`, in API order. A missing
/// or malformed section yields an empty list rather than an error.
fn parse_search_response(json: &serde_json::Value) -> Vec<String> {
    json.get("webPages")
        .and_then(|w| w.get("value"))
        .and_then(|v| v.as_array())
        .map(|results| {
            results
                .iter()
                .filter_map(|r| r.get("url").and_then(|u| u.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
