//! Detail document parsing: one catalog entry page into a full record.
//!
//! Every field is extracted through an ordered fallback chain and yields
//! `None` (or an empty list) when nothing matches. A failed detail fetch
//! degrades to the unenriched candidate; it never fails the batch.

use crate::scrape::consts::*;
use crate::scrape::lang::language_code;
use crate::scrape::fetch_page;
use crate::types::{BookRecord, Identifiers, RankedCandidate};
use chrono::NaiveDate;
use scraper::{ElementRef, Html};

/// Placeholder text the catalog shows for entries with no description.
const NO_DESCRIPTION_PHRASE: &str = "Ta książka nie posiada jeszcze opisu.";
/// Replacement emitted in place of the catalog's placeholder.
const NO_DESCRIPTION_REPLACEMENT: &str = "Brak opisu.";

/// Fetch and parse a ranked candidate's detail page.
///
/// On any fetch failure the candidate is returned unenriched — degraded,
/// logged, and still present in the result set.
pub async fn enrich(client: &reqwest::Client, ranked: RankedCandidate) -> BookRecord {
    let url = ranked.candidate.url.clone();
    match fetch_page(client, &url).await {
        Ok(html) => parse_detail(&html, ranked),
        Err(err) => {
            tracing::warn!(
                title = %ranked.candidate.title,
                error = %err,
                "detail fetch failed; returning unenriched candidate"
            );
            BookRecord::degraded(ranked)
        }
    }
}

/// Parse a detail document into an enriched record.
///
/// Extraction is total: a field whose chain finds nothing stays absent and
/// malformed dates/numbers are logged and dropped, never propagated.
pub fn parse_detail(html: &str, mut ranked: RankedCandidate) -> BookRecord {
    let document = Html::parse_document(html);
    let datalist = Datalist::new(&document);

    let cover = select_attr(&document, &COVER_IMG_SELECTOR, "src")
        .or_else(|| select_attr(&document, &OG_IMAGE_SELECTOR, "content"));

    let publisher = select_text(&document, &PUBLISHER_LINK_SELECTOR)
        .or_else(|| datalist.link_text("Wydawnictwo:"));

    let languages: Vec<String> = datalist
        .text("Język:")
        .map(|value| value.split(", ").map(language_code).collect())
        .unwrap_or_default();

    let (series, series_index) = extract_series(&document);
    let genres = select_text(&document, &CATEGORY_LINK_SELECTOR)
        .map(|text| {
            text.split(',')
                .map(|genre| genre.trim().to_string())
                .filter(|genre| !genre.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let tags: Vec<String> = document
        .select(&TAG_LINK_SELECTOR)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    let rating = extract_rating(&document);

    let isbn = datalist
        .text("ISBN:")
        .or_else(|| select_attr(&document, &ISBN_META_SELECTOR, "content"));

    // Listings occasionally omit the author links; the detail page always
    // carries at least one.
    if ranked.candidate.authors.is_empty() {
        if let Some(author) = select_text(&document, &AUTHOR_FALLBACK_SELECTOR) {
            ranked.candidate.authors = vec![author];
        }
    }

    let published_date = extract_published_date(&datalist);
    let pages = extract_pages(&document, &datalist);
    let translator = datalist.link_text("Tłumacz:");
    let narrator = datalist.text("Lektor:");
    let duration = extract_duration(&document, &datalist);

    let description = build_description(
        &document,
        pages,
        published_date,
        translator.as_deref(),
    );

    let id = ranked.candidate.id.clone();
    BookRecord {
        ranked,
        cover,
        description,
        languages,
        publisher,
        published_date,
        rating,
        series,
        series_index,
        genres,
        tags,
        narrator,
        duration,
        pages,
        translator,
        identifiers: Identifiers {
            isbn,
            lubimyczytac: id,
        },
    }
}

// ── dt/dd label map ─────────────────────────────────────────────────────

/// Definition-list lookup over a detail document.
///
/// Pairs every `dt` with its next `dd` sibling, addressable by label text
/// (substring match, mirroring the catalog's `Label:` headings) or by the
/// `dt`'s `data-original-title` attribute.
struct Datalist<'a> {
    entries: Vec<DatalistEntry<'a>>,
}

struct DatalistEntry<'a> {
    label: String,
    original_title: Option<&'a str>,
    dd: ElementRef<'a>,
}

impl<'a> Datalist<'a> {
    fn new(document: &'a Html) -> Self {
        let mut entries = Vec::new();
        for dt in document.select(&DT_SELECTOR) {
            let Some(dd) = dt
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "dd")
            else {
                continue;
            };
            entries.push(DatalistEntry {
                label: dt.text().collect::<String>().trim().to_string(),
                original_title: dt.value().attr("data-original-title"),
                dd,
            });
        }
        Self { entries }
    }

    fn find(&self, label: &str) -> Option<ElementRef<'a>> {
        self.entries
            .iter()
            .find(|entry| entry.label.contains(label))
            .map(|entry| entry.dd)
    }

    /// Trimmed text of the `dd` under the given label, if non-empty.
    fn text(&self, label: &str) -> Option<String> {
        self.find(label)
            .map(|dd| dd.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Trimmed text of the first link inside the `dd` under the given label.
    fn link_text(&self, label: &str) -> Option<String> {
        self.find(label)
            .and_then(|dd| dd.select(&ANCHOR_SELECTOR).next())
            .map(|a| a.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Trimmed `dd` text addressed by the `dt`'s `data-original-title`.
    fn text_by_original_title(&self, value: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| entry.original_title == Some(value))
            .map(|entry| entry.dd.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

// ── Field extraction ────────────────────────────────────────────────────

fn select_text(document: &Html, selector: &scraper::Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn select_attr(document: &Html, selector: &scraper::Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
        .filter(|value| !value.is_empty())
}

fn select_inner_html(document: &Html, selector: &scraper::Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.inner_html())
        .filter(|html| !html.trim().is_empty())
}

/// First series/cycle link: name with the trailing `(tom N…)` group
/// removed, index parsed from it.
fn extract_series(document: &Html) -> (Option<String>, Option<u32>) {
    let series_text = document
        .select(&SERIES_SPAN_SELECTOR)
        .filter(|span| {
            let text = span.text().collect::<String>();
            text.contains("Cykl:") || text.contains("Seria:")
        })
        .filter_map(|span| span.select(&ANCHOR_SELECTOR).next())
        .map(|a| a.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty());

    let Some(series_text) = series_text else {
        return (None, None);
    };

    let index = SERIES_INDEX_REGEX
        .captures(&series_text)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok());
    let name = SERIES_NAME_TRIM_REGEX
        .replace(&series_text, "")
        .trim()
        .to_string();

    (Some(name), index)
}

/// Reader rating, scaled from the catalog's 0–10 scale to 0–5.
///
/// Comma decimals are converted before parsing. A missing, non-numeric, or
/// zero value yields `None` — a zero on the source site means "unrated".
fn extract_rating(document: &Html) -> Option<f64> {
    select_text(document, &RATING_VALUE_SELECTOR)
        .map(|text| text.replace(',', "."))
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|value| *value != 0.0)
        .map(|value| value / 10.0 * 5.0)
}

fn extract_published_date(datalist: &Datalist<'_>) -> Option<NaiveDate> {
    let text = datalist
        .text("Data wydania:")
        .or_else(|| datalist.text_by_original_title("Data pierwszego wydania polskiego"))?;
    parse_date(&text)
}

/// The catalog renders day-first dates; ISO appears in embedded metadata.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|err| {
            tracing::warn!(text, error = %err, "unparseable release date");
            err
        })
        .ok()
}

/// Leading integer of a text node, `parseInt`-style.
fn leading_int(text: &str) -> Option<u64> {
    text.trim().split_whitespace().next()?.parse().ok()
}

fn extract_pages(document: &Html, datalist: &Datalist<'_>) -> Option<u32> {
    if let Some(text) = select_text(document, &PAGES_SPAN_SELECTOR) {
        if let Some(pages) = PAGES_REGEX
            .captures(&text)
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            return Some(pages);
        }
    }
    datalist
        .text("Liczba stron:")
        .and_then(|text| leading_int(&text))
        .map(|pages| pages as u32)
}

/// Running time in seconds, from the dedicated hours/minutes span pair or
/// the labelled duration text. Missing parts count as zero.
fn extract_duration(document: &Html, datalist: &Datalist<'_>) -> Option<u64> {
    if let Some(span) = document.select(&HOURS_SPAN_SELECTOR).next() {
        let mut parts = span.select(&SPAN_SELECTOR);
        let hours = parts
            .next()
            .and_then(|el| leading_int(&el.text().collect::<String>()))
            .unwrap_or(0);
        let minutes = parts
            .next()
            .and_then(|el| leading_int(&el.text().collect::<String>()))
            .unwrap_or(0);
        return Some(hours * 3600 + minutes * 60);
    }

    let text = datalist.text("Czas trwania:")?;
    let captures = DURATION_REGEX.captures(&text)?;
    let hours: u64 = captures
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let minutes: u64 = captures
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some((hours * 60 + minutes) * 60)
}

// ── Description ─────────────────────────────────────────────────────────

fn strip_html_tags(html: &str) -> String {
    HTML_TAG_REGEX.replace_all(html, "").trim().to_string()
}

/// Assemble the final description: first matching source block, stripped of
/// markup, placeholder replaced, then appended page-count, first-edition,
/// and translator paragraphs.
fn build_description(
    document: &Html,
    pages: Option<u32>,
    published_date: Option<NaiveDate>,
    translator: Option<&str>,
) -> Option<String> {
    let raw = select_inner_html(document, &COLLAPSE_DESCRIPTION_SELECTOR)
        .or_else(|| select_inner_html(document, &DESCRIPTION_CONTAINER_SELECTOR))
        .or_else(|| select_attr(document, &OG_DESCRIPTION_SELECTOR, "content"))
        .unwrap_or_default();

    let mut description = strip_html_tags(&raw);
    if description == NO_DESCRIPTION_PHRASE {
        description = NO_DESCRIPTION_REPLACEMENT.to_string();
    }

    if let Some(pages) = pages {
        description.push_str(&format!("\n\nKsiążka ma {pages} stron."));
    }
    if let Some(date) = published_date {
        description.push_str(&format!(
            "\n\nData pierwszego wydania: {}",
            date.format("%d.%m.%Y")
        ));
    }
    if let Some(translator) = translator {
        description.push_str(&format!("\n\nTłumacz: {translator}"));
    }

    let description = description.trim().to_string();
    (!description.is_empty()).then_some(description)
}
