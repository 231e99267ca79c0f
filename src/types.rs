//! Core types for catalog candidates and enriched metadata records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two catalog sub-indexes a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Print/ebook edition.
    Book,
    /// Audiobook edition.
    Audiobook,
}

impl MediaType {
    /// Returns the lowercase wire name of this media type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Audiobook => "audiobook",
        }
    }

    /// Catalog search path for this sub-index, relative to the base URL.
    pub fn search_path(&self) -> &'static str {
        match self {
            Self::Book => "szukaj/ksiazki",
            Self::Audiobook => "szukaj/audiobooki",
        }
    }

    /// Rank used to break exact similarity ties: audiobooks sort ahead of
    /// books when scores are equal.
    pub(crate) fn tie_break_rank(&self) -> u8 {
        match self {
            Self::Audiobook => 1,
            Self::Book => 0,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptor of the catalog a candidate came from, attached verbatim to
/// every candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub base_url: String,
}

impl SourceInfo {
    /// The lubimyczytac.pl source descriptor for a given base URL.
    pub fn lubimyczytac(base_url: &str) -> Self {
        Self {
            id: "lubimyczytac".to_string(),
            name: "Lubimy Czytać".to_string(),
            base_url: base_url.to_string(),
        }
    }
}

/// A minimally-identified catalog entry parsed from a listing document,
/// before ranking and enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Last path segment of the catalog URL.
    pub id: String,
    pub title: String,
    /// Author names in listing order; may be empty (detail pages carry a
    /// fallback author link).
    pub authors: Vec<String>,
    /// Absolute URL of the candidate's detail page.
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub source: SourceInfo,
}

/// A candidate with its similarity score attached by the ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    /// Similarity in `[0, 1]`; deterministic for a given candidate and
    /// normalized query.
    pub similarity: f64,
}

/// Identifiers extracted from a detail document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// The catalog's own identifier for this entry.
    pub lubimyczytac: String,
}

/// A ranked candidate enriched with full metadata from its detail page.
///
/// When the detail fetch or parse fails the record degrades to the ranked
/// candidate's fields with every enrichment field absent — it is never
/// dropped from the result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(flatten)]
    pub ranked: RankedCandidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-639 language codes where the catalog name is known, original
    /// tokens otherwise.
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
    /// Reader rating scaled from the catalog's 0–10 scale to 0–5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_index: Option<u32>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrator: Option<String>,
    /// Audiobook running time in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator: Option<String>,
    pub identifiers: Identifiers,
}

impl BookRecord {
    /// A record carrying only the ranked candidate's fields, used when the
    /// detail fetch or parse fails.
    pub fn degraded(ranked: RankedCandidate) -> Self {
        let id = ranked.candidate.id.clone();
        Self {
            ranked,
            cover: None,
            description: None,
            languages: Vec::new(),
            publisher: None,
            published_date: None,
            rating: None,
            series: None,
            series_index: None,
            genres: Vec::new(),
            tags: Vec::new(),
            narrator: None,
            duration: None,
            pages: None,
            translator: None,
            identifiers: Identifiers {
                isbn: None,
                lubimyczytac: id,
            },
        }
    }
}
