//! Catalog language-name to ISO-639 code mapping.
//!
//! The catalog labels languages with Polish display names ("polski",
//! "angielski"). Names without a known code pass through unchanged so the
//! record never loses information.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Map of lowercased catalog language names to ISO-639-2 codes.
static LANGUAGE_CODES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| HashMap::from([("polski", "pol"), ("angielski", "eng")]));

/// Returns the ISO-639 code for a catalog language name, or the name
/// itself when no mapping is known.
pub fn language_code(name: &str) -> String {
    LANGUAGE_CODES
        .get(name.trim().to_lowercase().as_str())
        .map(|code| (*code).to_string())
        .unwrap_or_else(|| name.to_string())
}
