//! In-memory TTL cache for finished result sets.
//!
//! Keyed by the normalized `title-author` pair and holding the fully
//! enriched, ordered records. An explicit component owned by the provider,
//! constructed once per process; entries expire on TTL only.

use std::time::Duration;

use moka::future::Cache;

use crate::types::BookRecord;

/// Maximum number of cached result sets. Expiry is otherwise TTL-only.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Time-bounded memo of finished searches. Cloning is cheap and shares the
/// underlying store.
#[derive(Clone)]
pub struct ResultCache {
    inner: Cache<String, Vec<BookRecord>>,
}

impl ResultCache {
    /// Create a cache whose entries live for `ttl_seconds` from insertion.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build(),
        }
    }

    /// Look up an unexpired result set.
    pub async fn get(&self, key: &str) -> Option<Vec<BookRecord>> {
        self.inner.get(key).await
    }

    /// Store a finished result set under the normalized key.
    pub async fn insert(&self, key: String, records: Vec<BookRecord>) {
        self.inner.insert(key, records).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Candidate, MediaType, RankedCandidate, SourceInfo};

    fn make_records(title: &str) -> Vec<BookRecord> {
        vec![BookRecord::degraded(RankedCandidate {
            candidate: Candidate {
                id: "1".to_string(),
                title: title.to_string(),
                authors: vec![],
                url: "https://lubimyczytac.pl/ksiazka/1/x".to_string(),
                media_type: MediaType::Book,
                source: SourceInfo::lubimyczytac("https://lubimyczytac.pl"),
            },
            similarity: 1.0,
        })]
    }

    #[tokio::test]
    async fn miss_returns_none() {
        let cache = ResultCache::new(600);
        assert!(cache.get("missing-").await.is_none());
    }

    #[tokio::test]
    async fn insert_and_retrieve() {
        let cache = ResultCache::new(600);
        cache
            .insert("diuna-frank herbert".to_string(), make_records("Diuna"))
            .await;
        let cached = cache.get("diuna-frank herbert").await.expect("cached");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].ranked.candidate.title, "Diuna");
    }

    #[tokio::test]
    async fn keys_cached_independently() {
        let cache = ResultCache::new(600);
        cache.insert("a-".to_string(), make_records("A")).await;
        cache.insert("b-".to_string(), make_records("B")).await;
        assert_eq!(
            cache.get("a-").await.expect("a cached")[0].ranked.candidate.title,
            "A"
        );
        assert_eq!(
            cache.get("b-").await.expect("b cached")[0].ranked.candidate.title,
            "B"
        );
    }

    #[tokio::test]
    async fn overwrite_replaces_value() {
        let cache = ResultCache::new(600);
        cache.insert("k-".to_string(), make_records("Old")).await;
        cache.insert("k-".to_string(), make_records("New")).await;
        assert_eq!(
            cache.get("k-").await.expect("cached")[0].ranked.candidate.title,
            "New"
        );
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let cache = ResultCache::new(600);
        let clone = cache.clone();
        cache.insert("k-".to_string(), make_records("X")).await;
        assert!(clone.get("k-").await.is_some());
    }
}
