use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub search: SearchConfig,
    pub summarizer: SummarizerConfig,
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub blocklist: BlocklistConfig,
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// File listing partner-company names, one per line.
    pub terms_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Working corpus file, truncated at the start of every run.
    pub corpus_path: PathBuf,
    /// Directory that receives the timestamped digest file.
    pub digest_dir: PathBuf,
    #[serde(default = "default_digest_base")]
    pub digest_base: String,
}

fn default_digest_base() -> String {
    "BreachAlertSummary".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    #[serde(default = "default_freshness")]
    pub freshness: String,
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Accepted (non-blocked, non-empty) pages kept per search term.
    #[serde(default = "default_max_records")]
    pub max_records_per_term: usize,
    /// Fixed pause between search terms, in seconds.
    #[serde(default = "default_term_delay")]
    pub term_delay_secs: u64,
}

fn default_freshness() -> String {
    "Week".to_string()
}
fn default_market() -> String {
    "en-US".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_records() -> usize {
    3
}
fn default_term_delay() -> u64 {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct SummarizerConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum chunk length passed to the summarization service, in
    /// characters.
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

fn default_max_chunk_chars() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeliveryConfig {
    pub webhook_url: String,
    #[serde(default = "default_window_chars")]
    pub window_chars: usize,
    /// Fixed pause after each delivery window, in seconds.
    #[serde(default = "default_window_delay")]
    pub window_delay_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_window_chars() -> usize {
    15_000
}
fn default_window_delay() -> u64 {
    4
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BlocklistConfig {
    /// URL substrings that disqualify a search result.
    #[serde(default)]
    pub blocked_urls: Vec<String>,
    /// Additional substrings (social platforms, countries, words).
    #[serde(default)]
    pub blocked_keywords: Vec<String>,
}

fn default_keywords() -> Vec<String> {
    vec![
        "breach".to_string(),
        "cyber attack".to_string(),
        "hack".to_string(),
    ]
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.keywords.is_empty() {
        anyhow::bail!("keywords must not be empty");
    }

    if config.summarizer.max_chunk_chars == 0 {
        anyhow::bail!("summarizer.max_chunk_chars must be > 0");
    }

    if config.delivery.window_chars == 0 {
        anyhow::bail!("delivery.window_chars must be > 0");
    }

    if config.search.max_records_per_term == 0 {
        anyhow::bail!("search.max_records_per_term must be > 0");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    const MINIMAL: &str = r#"
[input]
terms_path = "terms.txt"

[output]
corpus_path = "corpus.txt"
digest_dir = "out"

[search]
endpoint = "https://api.example.com/v7.0/search"

[summarizer]
endpoint = "https://language.example.com"

[delivery]
webhook_url = "https://hooks.example.com/abc"
"#;

    #[test]
    fn test_minimal_config_defaults() {
        let f = write_config(MINIMAL);
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.search.max_records_per_term, 3);
        assert_eq!(cfg.delivery.window_chars, 15_000);
        assert_eq!(cfg.delivery.window_delay_secs, 4);
        assert_eq!(cfg.summarizer.max_chunk_chars, 1_000_000);
        assert_eq!(cfg.keywords, vec!["breach", "cyber attack", "hack"]);
        assert!(cfg.blocklist.blocked_urls.is_empty());
    }

    #[test]
    fn test_zero_window_rejected() {
        let f = write_config(&MINIMAL.replace(
            "webhook_url = \"https://hooks.example.com/abc\"",
            "webhook_url = \"https://hooks.example.com/abc\"\nwindow_chars = 0",
        ));
        let err = load_config(f.path()).unwrap_err();
        assert!(err.to_string().contains("window_chars"));
    }

    #[test]
    fn test_empty_keywords_rejected() {
        // Top-level keys must precede the first table header.
        let f = write_config(&format!("keywords = []\n{}", MINIMAL));
        let err = load_config(f.path()).unwrap_err();
        assert!(err.to_string().contains("keywords"));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config(Path::new("/nonexistent/bw.toml")).is_err());
    }
}
