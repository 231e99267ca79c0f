//! Catalog access: listing URL construction and document fetches.
//!
//! Each sub-index (books, audiobooks) is queried with the cleaned title as
//! the required `phrase` parameter and the extracted author as an optional
//! refinement. Fetches return UTF-8 text; transport failures surface as
//! [`ProviderError::Http`] and are degraded by the orchestrator, never by
//! this module.

pub(crate) mod consts;
pub mod detail;
pub mod lang;
pub mod listing;

use crate::error::{ProviderError, Result};
use crate::types::MediaType;
use url::Url;

/// Build the listing search URL for one sub-index.
pub fn listing_url(
    base_url: &str,
    media_type: MediaType,
    title: &str,
    author: Option<&str>,
) -> Result<String> {
    let base = Url::parse(base_url)
        .map_err(|e| ProviderError::Config(format!("invalid base URL {base_url}: {e}")))?;
    let mut url = base
        .join(media_type.search_path())
        .map_err(|e| ProviderError::Config(format!("invalid search path: {e}")))?;
    url.query_pairs_mut().append_pair("phrase", title);
    if let Some(author) = author {
        url.query_pairs_mut().append_pair("author", author);
    }
    Ok(url.into())
}

/// Fetch one sub-index listing document as UTF-8 text.
///
/// # Errors
///
/// Returns [`ProviderError::Http`] on transport failure or a non-success
/// status. The caller treats either as an empty sub-index.
pub async fn fetch_listing(
    client: &reqwest::Client,
    base_url: &str,
    media_type: MediaType,
    title: &str,
    author: Option<&str>,
) -> Result<String> {
    let url = listing_url(base_url, media_type, title, author)?;
    tracing::trace!(%url, %media_type, "listing fetch");
    fetch_page(client, &url).await
}

/// Fetch any catalog page as UTF-8 text.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProviderError::Http(format!("request to {url} failed: {e}")))?
        .error_for_status()
        .map_err(|e| ProviderError::Http(format!("{url} returned an error status: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| ProviderError::Http(format!("reading {url} failed: {e}")))?;

    tracing::trace!(bytes = html.len(), "page fetched");
    Ok(html)
}
