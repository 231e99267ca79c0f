//! Provider configuration with sensible defaults.
//!
//! [`ProviderConfig`] controls the catalog base URL, HTTP timeouts, caching,
//! and the cap on how many matches are enriched per query.

use crate::error::ProviderError;

/// Default catalog base URL.
pub const DEFAULT_BASE_URL: &str = "https://lubimyczytac.pl";

/// Configuration for the metadata provider.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour (tests point `base_url` at a mock
/// server).
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Catalog base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request HTTP timeout in seconds, applied to listing and detail
    /// fetches alike.
    pub timeout_seconds: u64,
    /// How long finished result sets stay cached, in seconds.
    pub cache_ttl_seconds: u64,
    /// Maximum number of ranked matches that proceed to detail enrichment.
    /// Bounds the detail-fetch fan-out per query.
    pub max_matches: usize,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 8,
            cache_ttl_seconds: 600,
            max_matches: 20,
            user_agent: None,
        }
    }
}

impl ProviderConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must be non-empty and parse as an absolute URL
    /// - `timeout_seconds` must be greater than 0
    /// - `max_matches` must be greater than 0
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.base_url.is_empty() {
            return Err(ProviderError::Config("base_url must not be empty".into()));
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ProviderError::Config(format!(
                "base_url is not a valid URL: {}",
                self.base_url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(ProviderError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_matches == 0 {
            return Err(ProviderError::Config(
                "max_matches must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
