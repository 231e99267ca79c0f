//! The search orchestrator: normalize, fetch, rank, enrich, cache.
//!
//! Data flows strictly forward: raw query → normalized (title, author) →
//! two concurrent listing fetches → parsed candidates → merged & ranked →
//! concurrent detail enrichment → cached result. Failures along the way
//! degrade the result (one empty sub-index, one unenriched record) instead
//! of failing the request.

use crate::cache::ResultCache;
use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::http;
use crate::query::{normalize_query, NormalizedQuery};
use crate::ranking::rank_candidates;
use crate::scrape::{self, detail, listing};
use crate::types::{BookRecord, MediaType, SourceInfo};

/// The lubimyczytac.pl metadata provider.
///
/// Owns its configuration and result cache; construct once per process and
/// share behind an `Arc`.
pub struct Provider {
    config: ProviderConfig,
    cache: ResultCache,
    source: SourceInfo,
}

impl Provider {
    /// Create a provider after validating its configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        let cache = ResultCache::new(config.cache_ttl_seconds);
        let source = SourceInfo::lubimyczytac(&config.base_url);
        Ok(Self {
            config,
            cache,
            source,
        })
    }

    /// Resolve a noisy query into ranked, enriched records.
    ///
    /// Never fails: a cache hit returns the stored records, and any error
    /// left uncaught on the miss path folds into an empty match list
    /// rather than surfacing to the caller.
    pub async fn search_books(&self, query: &str, author: Option<&str>) -> Vec<BookRecord> {
        tracing::debug!(query, ?author, "search request");
        let normalized = normalize_query(query, author);
        let key = normalized.cache_key();

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(key = %key, "cache hit");
            return cached;
        }

        match self.run_search(&normalized).await {
            Ok(records) => {
                self.cache.insert(key, records.clone()).await;
                records
            }
            Err(err) => {
                tracing::error!(query, error = %err, "search failed; returning no matches");
                Vec::new()
            }
        }
    }

    /// The cache-miss pipeline: fetch both sub-indexes, parse, rank, enrich.
    async fn run_search(&self, query: &NormalizedQuery) -> Result<Vec<BookRecord>> {
        let client = http::build_client(&self.config)?;
        let title = query.title.as_str();
        let author = query.author.as_deref();

        let (books, audiobooks) = tokio::join!(
            scrape::fetch_listing(&client, &self.config.base_url, MediaType::Book, title, author),
            scrape::fetch_listing(
                &client,
                &self.config.base_url,
                MediaType::Audiobook,
                title,
                author
            ),
        );

        let mut candidates = Vec::new();
        let mut errors: Vec<String> = Vec::new();
        for (outcome, media_type) in [(books, MediaType::Book), (audiobooks, MediaType::Audiobook)]
        {
            match outcome {
                Ok(html) => {
                    candidates.extend(listing::parse_listing(&html, media_type, &self.source));
                }
                Err(err) => {
                    tracing::warn!(%media_type, error = %err, "listing fetch failed; sub-index degraded");
                    errors.push(format!("{media_type}: {err}"));
                }
            }
        }

        // No candidates and at least one sub-index broke: a failed search,
        // not a cacheable empty result.
        if candidates.is_empty() && !errors.is_empty() {
            return Err(ProviderError::Http(errors.join("; ")));
        }

        let ranked = rank_candidates(candidates, title, author, self.config.max_matches);
        tracing::debug!(count = ranked.len(), "candidates ranked");

        let enriched = futures::future::join_all(
            ranked
                .into_iter()
                .map(|candidate| detail::enrich(&client, candidate)),
        )
        .await;

        Ok(enriched)
    }
}
