//! Digest assembly.
//!
//! The digest is a per-run, timestamped, append-only text file grouping
//! record summaries under their partner-company term. The term header is
//! written once, before the first record of the term; every record then
//! contributes a `Summary extracted from <url>:` entry.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// `<base>_<YYYYmmdd_HHMMSS>.txt`, one per run.
pub fn timestamped_filename(base: &str) -> String {
    format!("{}_{}.txt", base, Local::now().format("%Y%m%d_%H%M%S"))
}

pub struct DigestWriter {
    file: File,
    path: PathBuf,
}

impl DigestWriter {
    /// Create the digest file for this run under `dir`.
    pub fn create(dir: &Path, base: &str) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create digest directory: {}", dir.display()))?;
        let path = dir.join(timestamped_filename(base));
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("Failed to create digest file: {}", path.display()))?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record's entry, preceded by the term header when this
    /// is the first record of its term. The surrounding blank lines keep
    /// the chat rendering readable.
    pub fn append(
        &mut self,
        term: &str,
        url: &str,
        summary: &str,
        first_for_term: bool,
    ) -> Result<()> {
        if first_for_term {
            writeln!(self.file, "\n**Partner Company: {}**", term)?;
        }
        writeln!(self.file, "\nSummary extracted from {}:\n\n{}", url, summary)?;
        Ok(())
    }
}
