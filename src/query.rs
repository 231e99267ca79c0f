//! Query normalization: turning noisy `"Author - Title (2020) [tags]"`
//! folder names into a clean `(title, author)` pair.
//!
//! Cleanup is an ordered list of independent regex rules so each removal
//! can be tested in isolation and reordered safely. The rules target the
//! noise audiobook rippers append to folder names: year groups, bracket
//! tags, bitrate markers, narrator credits, and locale suffixes.

use regex::Regex;
use std::sync::LazyLock;

/// One independent cleanup rule. Every match of `pattern` is removed from
/// the working title, then the title is re-trimmed.
struct CleanupRule {
    /// Short label used in trace logging and tests.
    name: &'static str,
    pattern: Regex,
}

macro_rules! rule {
    ($name:literal, $regex:literal) => {
        CleanupRule {
            name: $name,
            pattern: Regex::new($regex).unwrap(),
        }
    };
}

/// Title cleanup rules, applied in order to unquoted titles.
static CLEANUP_RULES: LazyLock<Vec<CleanupRule>> = LazyLock::new(|| {
    vec![
        // Release year in parentheses: "Title (2020)"
        rule!("year-group", r"\s*\(\d{4}\)"),
        // Bracket tags: "[FLAC]", "[PL] [superaudiobook]"
        rule!("bracket-group", r"\s*\[[^\]]*\]"),
        // Bitrate markers: "128kbps", "64 kbps"
        rule!("bitrate", r"(?i)\d+\s*kbps"),
        // Variable-bitrate marker and everything after it
        rule!("vbr-tail", r"(?i)\bVBR\b.*$"),
        // Narrator credit ("czyt. Jan Kowalski") and everything after it
        rule!("narrator-tail", r"(?i)czyt\. .*"),
        rule!("superproduction", r"(?i)superprodukcja"),
        rule!("audiobook-keyword", r"(?i)audiobook"),
        // Trailing language suffix: "Title PL"
        rule!("locale-suffix", r"(?i)\s+PL$"),
    ]
});

/// A title fully wrapped in double quotes is taken verbatim.
static QUOTED_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^".*"$"#).unwrap());

/// A raw query resolved into its cleaned title and extracted author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub title: String,
    pub author: Option<String>,
}

impl NormalizedQuery {
    /// Cache key for this query: lowercased `title-author`, with an empty
    /// author slot when none was extracted.
    pub fn cache_key(&self) -> String {
        format!(
            "{}-{}",
            self.title.trim().to_lowercase(),
            self.author.as_deref().unwrap_or("").trim().to_lowercase()
        )
    }
}

/// Normalize a raw query string, optionally with an explicitly supplied
/// author.
///
/// Without an explicit author, a `" - "` separator splits the query on its
/// FIRST occurrence: the left segment becomes the author and the remaining
/// segments are rejoined as the title, so titles containing `" - "`
/// themselves survive intact.
///
/// A title fully wrapped in double quotes bypasses cleanup entirely — the
/// quotes are stripped and the inner text used verbatim. Otherwise each
/// [`CleanupRule`] is applied in turn. If cleanup strips the title to
/// nothing (a noise-only query), the pre-cleanup title is kept so a
/// non-empty input always yields a non-empty search phrase.
pub fn normalize_query(raw: &str, author: Option<&str>) -> NormalizedQuery {
    let mut extracted_author = author
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);
    let mut title = raw.trim().to_string();

    // A fully quoted query is an exact title; never split it on " - ".
    if extracted_author.is_none() && !QUOTED_TITLE.is_match(&title) {
        if let Some((left, rest)) = title.split_once(" - ") {
            if !rest.is_empty() {
                extracted_author = Some(left.trim().to_string());
                title = rest.trim().to_string();
            }
        }
    }

    if QUOTED_TITLE.is_match(&title) {
        // Explicitly quoted titles are already exact; strip the quotes only.
        title = title[1..title.len() - 1].to_string();
    } else {
        let before_cleanup = title.clone();
        for rule in CLEANUP_RULES.iter() {
            let cleaned = rule.pattern.replace_all(&title, "");
            if cleaned != title {
                tracing::trace!(rule = rule.name, "cleanup rule matched");
            }
            title = cleaned.trim().to_string();
        }
        if title.is_empty() {
            // Noise-only query: keep the uncleaned title rather than
            // searching for an empty phrase.
            title = before_cleanup;
        }
    }

    tracing::debug!(title = %title, author = ?extracted_author, "query normalized");
    NormalizedQuery {
        title,
        author: extracted_author,
    }
}
