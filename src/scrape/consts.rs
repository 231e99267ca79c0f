//! Shared CSS selectors and field patterns for catalog documents.

use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// ── Listing documents ───────────────────────────────────────────────────

selector!(LISTING_ENTRY_SELECTOR, ".authorAllBooks__single");
selector!(LISTING_ENTRY_TEXT_SELECTOR, ".authorAllBooks__singleText");
selector!(LISTING_TITLE_SELECTOR, ".authorAllBooks__singleTextTitle");
selector!(AUTHOR_LINK_SELECTOR, r#"a[href*="/autor/"]"#);

// ── Detail documents ────────────────────────────────────────────────────

selector!(COVER_IMG_SELECTOR, "img.img-fluid");
selector!(OG_IMAGE_SELECTOR, r#"meta[property="og:image"]"#);
selector!(PUBLISHER_LINK_SELECTOR, r#"span.book__txt a[href*="/wydawnictwo/"]"#);
selector!(COLLAPSE_DESCRIPTION_SELECTOR, ".collapse-content-js");
selector!(
    DESCRIPTION_CONTAINER_SELECTOR,
    ".book-description-container__description-text"
);
selector!(OG_DESCRIPTION_SELECTOR, r#"meta[property="og:description"]"#);
selector!(SERIES_SPAN_SELECTOR, "span.d-none.d-sm-block.mt-1");
selector!(CATEGORY_LINK_SELECTOR, "a.book__category");
selector!(TAG_LINK_SELECTOR, r#"a[href*="/ksiazki/t/"]"#);
selector!(RATING_VALUE_SELECTOR, ".rating-value .big-number");
selector!(ISBN_META_SELECTOR, r#"meta[property="books:isbn"]"#);
selector!(AUTHOR_FALLBACK_SELECTOR, "span.author a");
selector!(PAGES_SPAN_SELECTOR, "span.book__pages.pr-2");
selector!(HOURS_SPAN_SELECTOR, "span.book__hours");
selector!(SPAN_SELECTOR, "span");
selector!(ANCHOR_SELECTOR, "a");
selector!(DT_SELECTOR, "dt");

regex!(SERIES_INDEX_REGEX, r"\(tom (\d+)");
regex!(SERIES_NAME_TRIM_REGEX, r"\s*\(tom \d+[^)]*\)\s*$");
regex!(PAGES_REGEX, r"(\d+)\s*str");
regex!(DURATION_REGEX, r"(?i)(\d+)\s*godz.*?(\d+)?\s*min");
regex!(HTML_TAG_REGEX, r"<[^>]*>");
