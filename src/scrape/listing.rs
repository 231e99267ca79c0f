//! Listing document parsing: one search-results page into candidates.
//!
//! Entries are scanned in document order and the output preserves that
//! order — ranking happens later, on the merged candidate set.

use crate::scrape::consts::{
    AUTHOR_LINK_SELECTOR, LISTING_ENTRY_SELECTOR, LISTING_ENTRY_TEXT_SELECTOR,
    LISTING_TITLE_SELECTOR,
};
use crate::types::{Candidate, MediaType, SourceInfo};
use scraper::Html;

/// Parse a listing document into candidates for one sub-index.
///
/// Each entry contributes its title, relative detail URL, and author
/// links. Entries without a title or without a URL cannot be enriched and
/// are skipped. The candidate id is the last path segment of the detail
/// URL, matching the catalog's own entry identifier.
pub fn parse_listing(html: &str, media_type: MediaType, source: &SourceInfo) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for entry in document.select(&LISTING_ENTRY_SELECTOR) {
        let scope = entry
            .select(&LISTING_ENTRY_TEXT_SELECTOR)
            .next()
            .unwrap_or(entry);

        let Some(title_el) = scope.select(&LISTING_TITLE_SELECTOR).next() else {
            continue;
        };
        let title = title_el.text().collect::<String>().trim().to_string();
        let Some(href) = title_el.value().attr("href") else {
            continue;
        };
        if title.is_empty() || href.is_empty() {
            continue;
        }

        let authors: Vec<String> = scope
            .select(&AUTHOR_LINK_SELECTOR)
            .map(|a| a.text().collect::<String>().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        let id = href.split('/').next_back().unwrap_or_default().to_string();

        candidates.push(Candidate {
            id,
            title,
            authors,
            url: format!("{}{}", source.base_url, href),
            media_type,
            source: source.clone(),
        });
    }

    tracing::debug!(count = candidates.len(), %media_type, "listing parsed");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_LISTING_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="authorAllBooks__single">
    <div class="authorAllBooks__singleText">
        <a class="authorAllBooks__singleTextTitle" href="/ksiazka/4967509/diuna">Diuna</a>
        <a href="/autor/20930/frank-herbert">Frank Herbert</a>
    </div>
</div>
<div class="authorAllBooks__single">
    <div class="authorAllBooks__singleText">
        <a class="authorAllBooks__singleTextTitle" href="/ksiazka/123/mesjasz-diuny">Mesjasz Diuny</a>
        <a href="/autor/20930/frank-herbert">Frank Herbert</a>
        <a href="/autor/999/inny-autor">Inny Autor</a>
    </div>
</div>
<div class="authorAllBooks__single">
    <div class="authorAllBooks__singleText">
        <span class="authorAllBooks__singleTextTitle">Entry without link</span>
    </div>
</div>
</body>
</html>"#;

    fn source() -> SourceInfo {
        SourceInfo::lubimyczytac("https://lubimyczytac.pl")
    }

    #[test]
    fn parses_entries_in_document_order() {
        let candidates = parse_listing(MOCK_LISTING_HTML, MediaType::Book, &source());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "Diuna");
        assert_eq!(candidates[1].title, "Mesjasz Diuny");
    }

    #[test]
    fn candidate_fields_extracted() {
        let candidates = parse_listing(MOCK_LISTING_HTML, MediaType::Audiobook, &source());
        let first = &candidates[0];
        assert_eq!(first.id, "diuna");
        assert_eq!(first.url, "https://lubimyczytac.pl/ksiazka/4967509/diuna");
        assert_eq!(first.authors, vec!["Frank Herbert"]);
        assert_eq!(first.media_type, MediaType::Audiobook);
        assert_eq!(first.source.id, "lubimyczytac");
    }

    #[test]
    fn multiple_authors_collected_in_order() {
        let candidates = parse_listing(MOCK_LISTING_HTML, MediaType::Book, &source());
        assert_eq!(candidates[1].authors, vec!["Frank Herbert", "Inny Autor"]);
    }

    #[test]
    fn entry_without_url_is_skipped() {
        let candidates = parse_listing(MOCK_LISTING_HTML, MediaType::Book, &source());
        assert!(candidates.iter().all(|c| c.title != "Entry without link"));
    }

    #[test]
    fn entry_without_title_is_skipped() {
        let html = r#"
<div class="authorAllBooks__single">
    <div class="authorAllBooks__singleText">
        <a class="authorAllBooks__singleTextTitle" href="/ksiazka/1/x">   </a>
    </div>
</div>"#;
        assert!(parse_listing(html, MediaType::Book, &source()).is_empty());
    }

    #[test]
    fn empty_document_yields_no_candidates() {
        assert!(parse_listing("<html><body></body></html>", MediaType::Book, &source()).is_empty());
    }

    #[test]
    fn media_type_tag_follows_sub_index() {
        let books = parse_listing(MOCK_LISTING_HTML, MediaType::Book, &source());
        let audio = parse_listing(MOCK_LISTING_HTML, MediaType::Audiobook, &source());
        assert!(books.iter().all(|c| c.media_type == MediaType::Book));
        assert!(audio.iter().all(|c| c.media_type == MediaType::Audiobook));
    }
}
