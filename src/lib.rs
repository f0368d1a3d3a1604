//! # Breachwatch
//!
//! A sequential, best-effort batch job that turns a list of partner-company
//! names into a digest of recent breach-related news and delivers it to a
//! chat webhook.
//!
//! ## Pipeline
//!
//! ```text
//! terms file ──▶ search ──▶ fetch pages ──▶ corpus file
//!                                               │
//!                                          replay (state machine)
//!                                               │
//!                                 chunk ──▶ summarize ──▶ digest file
//!                                                              │
//!                                                    windowed webhook delivery
//! ```
//!
//! The corpus is a flat, line-oriented working file written once per run
//! and replayed once; the digest is a timestamped, append-only text file
//! grouped by partner company. Everything runs on one logical task, and
//! failures are recovered at the smallest enclosing unit: a failed term,
//! record, chunk, or delivery window is logged and skipped while the run
//! continues.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`search`] | Web-search provider |
//! | [`fetch`] | Page fetching and body-text extraction |
//! | [`scrape`] | Scraping phase orchestration |
//! | [`corpus`] | Corpus serialization and replay |
//! | [`chunk`] | Boundary-aware text chunking |
//! | [`summarize`] | Summarization service client and merge policy |
//! | [`digest`] | Digest assembly |
//! | [`deliver`] | Windowed webhook delivery |
//! | [`run`] | Phase wiring for the CLI |

pub mod chunk;
pub mod config;
pub mod corpus;
pub mod deliver;
pub mod digest;
pub mod fetch;
pub mod models;
pub mod run;
pub mod scrape;
pub mod search;
pub mod summarize;
