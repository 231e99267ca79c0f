//! Error types for the provider crate.
//!
//! Fetch and parse failures are handled close to where they occur and
//! degrade the result (empty sub-index, unenriched record, absent field)
//! rather than surfacing to callers; these variants exist for the few
//! seams where an error still crosses a function boundary.

/// Errors that can occur while querying and scraping the catalog.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// An HTTP request to the catalog failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A listing or detail document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid provider configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for provider results.
pub type Result<T> = std::result::Result<T, ProviderError>;
