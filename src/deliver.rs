//! Webhook delivery of the finished digest.
//!
//! The digest is read back as one string and split into consecutive
//! fixed-size character windows with no boundary awareness (a window may
//! end mid-word). Windows are posted sequentially as `{"text": <window>}`
//! with a fixed pause after each send; a failed window is reported and
//! the rest are still sent. Best-effort only: no retries, no rollback.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use crate::config::DeliveryConfig;

/// Consecutive `window_chars`-character windows over `text`, in order.
pub fn split_windows(text: &str, window_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(window_chars)
        .map(|w| w.iter().collect())
        .collect()
}

/// Send the digest at `path` to the webhook, one window at a time.
pub async fn deliver_digest(config: &DeliveryConfig, path: &Path) -> Result<()> {
    let message = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read digest file: {}", path.display()))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let windows = split_windows(&message, config.window_chars);
    println!("deliver {}", path.display());
    println!("  windows: {}", windows.len());

    for (i, window) in windows.iter().enumerate() {
        let result = client
            .post(&config.webhook_url)
            .json(&serde_json::json!({ "text": window }))
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                eprintln!(
                    "Warning: failed to send window {}/{}: {} {}",
                    i + 1,
                    windows.len(),
                    status,
                    body
                );
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!(
                    "Warning: failed to send window {}/{}: {}",
                    i + 1,
                    windows.len(),
                    e
                );
            }
        }

        tokio::time::sleep(Duration::from_secs(config.window_delay_secs)).await;
    }

    println!("ok");
    Ok(())
}
