//! Extractive summarization: the service client and the per-record
//! merge-and-failure policy.
//!
//! A record's document is chunked, each chunk is sent to the external
//! extractive-summarization service in order, and the returned sentences
//! are merged into one combined summary. Sentences containing any of the
//! configured keywords (case-insensitively) win over the full set for
//! their chunk.
//!
//! Failure policy, per chunk, with no retries anywhere:
//! - authentication or resource-not-found → logged as an error, remaining
//!   chunks of this record abandoned;
//! - any other service-level error → logged as a warning, remaining
//!   chunks abandoned;
//! - anything else → logged as an error, remaining chunks abandoned.
//!
//! Whatever accumulated before the stop is still returned.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::chunk::split_text;
use crate::config::SummarizerConfig;
use crate::models::{SummaryKind, SummaryResult};

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("authentication failed; check the service endpoint and key")]
    Authentication,
    #[error("summarization resource not found; check the service endpoint")]
    ResourceNotFound,
    #[error("summarization service error {status}: {body}")]
    Service { status: u16, body: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One call to the extractive-summarization service for one chunk.
/// Returns the extracted sentences in service order, already narrowed to
/// extractive-summarization results.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn extract_summary(&self, chunk: &str) -> Result<Vec<String>, SummarizeError>;
}

/// HTTP client for an Azure-style language service: subscription key in a
/// header, JSON body, sentences under `results[].sentences[].text` with a
/// result `kind` tag.
pub struct HttpSummaryProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpSummaryProvider {
    pub fn new(config: &SummarizerConfig, api_key: &str) -> Result<Self, SummarizeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SummarizeError::Other(e.into()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl SummaryProvider for HttpSummaryProvider {
    async fn extract_summary(&self, chunk: &str) -> Result<Vec<String>, SummarizeError> {
        let response = self
            .client
            .post(format!("{}/extract-summary", self.endpoint))
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&serde_json::json!({ "text": chunk }))
            .send()
            .await
            .map_err(|e| SummarizeError::Other(e.into()))?;

        let status = response.status();
        match status.as_u16() {
            401 | 403 => return Err(SummarizeError::Authentication),
            404 => return Err(SummarizeError::ResourceNotFound),
            _ if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(SummarizeError::Service {
                    status: status.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SummarizeError::Other(e.into()))?;
        Ok(parse_summary_response(&json))
    }
}

/// Collect sentence texts from results tagged `ExtractiveSummarization`.
fn parse_summary_response(json: &serde_json::Value) -> Vec<String> {
    let Some(results) = json.get("results").and_then(|r| r.as_array()) else {
        return Vec::new();
    };

    results
        .iter()
        .filter(|r| {
            r.get("kind").and_then(|k| k.as_str()) == Some("ExtractiveSummarization")
        })
        .filter_map(|r| r.get("sentences").and_then(|s| s.as_array()))
        .flatten()
        .filter_map(|s| s.get("text").and_then(|t| t.as_str()))
        .map(str::to_string)
        .collect()
}

/// Summarizes one record's document through a [`SummaryProvider`].
pub struct Summarizer {
    provider: Box<dyn SummaryProvider>,
    /// Lowercased keyword set for the priority filter.
    keywords: Vec<String>,
    max_chunk_chars: usize,
}

impl Summarizer {
    pub fn new(
        provider: Box<dyn SummaryProvider>,
        keywords: &[String],
        max_chunk_chars: usize,
    ) -> Self {
        Self {
            provider,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            max_chunk_chars,
        }
    }

    /// Chunk `document`, summarize each chunk in order, and merge the
    /// results under the keyword-priority rule. Stops at the first chunk
    /// failure per the module policy; the accumulated summary so far is
    /// returned either way.
    pub async fn summarize(&self, url: &str, document: &str) -> SummaryResult {
        let mut combined = Vec::new();
        let mut kind = SummaryKind::Full;

        for chunk in split_text(document, self.max_chunk_chars) {
            match self.provider.extract_summary(&chunk).await {
                Ok(sentences) => {
                    let prioritized = self.keyword_subset(&sentences);
                    if prioritized.is_empty() {
                        combined.extend(sentences);
                    } else {
                        combined.extend(prioritized);
                        kind = SummaryKind::KeywordPrioritized;
                    }
                }
                Err(e @ SummarizeError::Authentication)
                | Err(e @ SummarizeError::ResourceNotFound) => {
                    eprintln!("Error: {} ({})", e, url);
                    break;
                }
                Err(e @ SummarizeError::Service { .. }) => {
                    eprintln!("Warning: {} ({})", e, url);
                    break;
                }
                Err(e) => {
                    eprintln!("Error: unexpected summarization failure for {}: {}", url, e);
                    break;
                }
            }
        }

        SummaryResult {
            sentences: combined,
            kind,
        }
    }

    /// Sentences containing any configured keyword, case-insensitively.
    fn keyword_subset(&self, sentences: &[String]) -> Vec<String> {
        sentences
            .iter()
            .filter(|s| {
                let lower = s.to_lowercase();
                self.keywords.iter().any(|k| lower.contains(k.as_str()))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::sync::{Arc, Mutex};

    /// Scripted provider: one prepared response per expected chunk, in
    /// order, with a shared call counter the test can keep.
    struct ScriptedProvider {
        responses: Mutex<Vec<Result<Vec<String>, SummarizeError>>>,
        calls: Arc<Mutex<usize>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<Vec<String>, SummarizeError>>) -> (Self, Arc<Mutex<usize>>) {
            let calls = Arc::new(Mutex::new(0));
            let provider = Self {
                responses: Mutex::new(responses),
                calls: Arc::clone(&calls),
            };
            (provider, calls)
        }
    }

    #[async_trait]
    impl SummaryProvider for ScriptedProvider {
        async fn extract_summary(&self, _chunk: &str) -> Result<Vec<String>, SummarizeError> {
            *self.calls.lock().unwrap() += 1;
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Ok(Vec::new());
            }
            responses.remove(0)
        }
    }

    fn sentences(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn keywords() -> Vec<String> {
        vec!["breach".to_string(), "cyber attack".to_string(), "hack".to_string()]
    }

    #[tokio::test]
    async fn test_keyword_subset_wins_over_full_set() {
        let (provider, _) = ScriptedProvider::new(vec![Ok(sentences(&[
            "Company X was breached.",
            "Stock fell.",
        ]))]);
        let summarizer = Summarizer::new(Box::new(provider), &keywords(), 1000);

        let result = summarizer.summarize("https://x.example", "short doc").await;
        assert_eq!(result.sentences, vec!["Company X was breached."]);
        assert_eq!(result.kind, SummaryKind::KeywordPrioritized);
    }

    #[tokio::test]
    async fn test_full_set_when_no_keyword_matches() {
        let (provider, _) = ScriptedProvider::new(vec![Ok(sentences(&[
            "Quarterly results improved.",
            "Stock rose.",
        ]))]);
        let summarizer = Summarizer::new(Box::new(provider), &keywords(), 1000);

        let result = summarizer.summarize("https://x.example", "short doc").await;
        assert_eq!(
            result.sentences,
            vec!["Quarterly results improved.", "Stock rose."]
        );
        assert_eq!(result.kind, SummaryKind::Full);
    }

    #[tokio::test]
    async fn test_keyword_match_is_case_insensitive() {
        let (provider, _) =
            ScriptedProvider::new(vec![Ok(sentences(&["A major BREACH occurred.", "Other."]))]);
        let summarizer = Summarizer::new(Box::new(provider), &keywords(), 1000);

        let result = summarizer.summarize("https://x.example", "short doc").await;
        assert_eq!(result.sentences, vec!["A major BREACH occurred."]);
    }

    #[tokio::test]
    async fn test_auth_failure_stops_but_keeps_accumulated() {
        // The first chunk succeeds, the second hits an auth error.
        let (provider, calls) = ScriptedProvider::new(vec![
            Ok(sentences(&["First chunk breach sentence."])),
            Err(SummarizeError::Authentication),
            Ok(sentences(&["Never reached."])),
        ]);
        let summarizer = Summarizer::new(Box::new(provider), &keywords(), 20);

        // Several chunks' worth of document; processing must stop after two.
        let doc = "aaaa aaaa aaaa aaaa. bbbb bbbb bbbb bbbb. cccc cccc cccc cccc.";
        let result = summarizer.summarize("https://x.example", doc).await;

        assert_eq!(result.sentences, vec!["First chunk breach sentence."]);
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_service_error_stops_remaining_chunks() {
        let (provider, calls) = ScriptedProvider::new(vec![
            Ok(sentences(&["Kept sentence about a hack."])),
            Err(SummarizeError::Service {
                status: 500,
                body: "boom".to_string(),
            }),
            Ok(sentences(&["Never reached."])),
        ]);
        let summarizer = Summarizer::new(Box::new(provider), &keywords(), 20);

        let doc = "aaaa aaaa aaaa aaaa. bbbb bbbb bbbb bbbb. cccc cccc cccc cccc.";
        let result = summarizer.summarize("https://x.example", doc).await;
        assert_eq!(result.sentences, vec!["Kept sentence about a hack."]);
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_http_provider_status_mapping() {
        let server = MockServer::start_async().await;

        for (status, path) in [(401, "/a"), (404, "/b"), (500, "/c")] {
            server
                .mock_async(|when, then| {
                    when.method(POST).path(format!("{}/extract-summary", path));
                    then.status(status);
                })
                .await;
        }

        let cfg = |path: &str| SummarizerConfig {
            endpoint: server.url(path),
            timeout_secs: 10,
            max_chunk_chars: 1000,
        };

        let auth = HttpSummaryProvider::new(&cfg("/a"), "k").unwrap();
        assert!(matches!(
            auth.extract_summary("text").await,
            Err(SummarizeError::Authentication)
        ));

        let not_found = HttpSummaryProvider::new(&cfg("/b"), "k").unwrap();
        assert!(matches!(
            not_found.extract_summary("text").await,
            Err(SummarizeError::ResourceNotFound)
        ));

        let service = HttpSummaryProvider::new(&cfg("/c"), "k").unwrap();
        assert!(matches!(
            service.extract_summary("text").await,
            Err(SummarizeError::Service { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_http_provider_parses_sentences() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/extract-summary")
                    .header("Ocp-Apim-Subscription-Key", "k");
                then.status(200).json_body(serde_json::json!({
                    "results": [
                        {
                            "kind": "ExtractiveSummarization",
                            "sentences": [
                                { "text": "Acme was breached." },
                                { "text": "Details are scarce." }
                            ]
                        },
                        { "kind": "SomethingElse", "sentences": [ { "text": "skip" } ] }
                    ]
                }));
            })
            .await;

        let provider = HttpSummaryProvider::new(
            &SummarizerConfig {
                endpoint: server.base_url(),
                timeout_secs: 10,
                max_chunk_chars: 1000,
            },
            "k",
        )
        .unwrap();

        let got = provider.extract_summary("chunk text").await.unwrap();
        assert_eq!(got, vec!["Acme was breached.", "Details are scarce."]);
    }
}
