//! # lubimyczytac-provider
//!
//! Audiobookshelf-compatible metadata provider for the lubimyczytac.pl
//! catalog. Resolves noisy filename-style queries ("Author - Title (2020)
//! [tags]") into ranked, enriched bibliographic records by scraping the
//! catalog's search listings and detail pages.
//!
//! ## Design
//!
//! - Normalizes queries with an ordered, independently-testable list of
//!   cleanup rules
//! - Queries the book and audiobook sub-indexes concurrently and merges
//!   candidates
//! - Ranks by Dice bigram similarity (weighted title/author blend),
//!   preferring audiobooks on exact ties
//! - Enriches the top matches concurrently from their detail pages, each
//!   fetch wrapped in its own failure boundary
//! - Caches finished result sets in-memory with a 10-minute TTL
//!
//! Failures degrade rather than propagate: a broken sub-index contributes
//! zero candidates, a broken detail page an unenriched record, and the
//! search itself always answers.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod query;
pub mod ranking;
pub mod scrape;
pub mod server;
pub mod types;

pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use provider::Provider;
pub use types::{BookRecord, Candidate, MediaType, RankedCandidate, SourceInfo};
