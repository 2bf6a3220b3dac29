use crate::regex::Regex;
use crate::utils::strip_trailing_period;
use std::sync::LazyLock;

static BOOK_SOURCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:In\s+)?(?:Chapter \d+\s+in\s+)?(.*?)(?:\s+\(pp\. .*?\))?\.$").unwrap()
});

static BOOK_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:In\s+)?(?:Chapter \d+\s+in\s+)?").unwrap());

static CHAPTER_PAGES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pp\.\s*([A-Za-z0-9_–-]+)").unwrap());

static PUBLISHER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^\[(.,]+)").unwrap());

/// Book title from a chapter `source` such as
/// `Chapter 9 in Interdisciplinary Approaches in Management Education.`
///
/// Strips a leading `In ` / `Chapter N in ` and a trailing ` (pp. …).`.
pub fn book_title(source: &str) -> String {
    let source = source.trim();
    if let Some(title) = BOOK_SOURCE_REGEX
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
    {
        return title.to_string();
    }

    let without_prefix = BOOK_PREFIX_REGEX.replace(source, "");
    strip_trailing_period(&without_prefix).trim().to_string()
}

/// Chapter page range from a `pp. X-Y` marker in the details.
pub fn chapter_pages(details: &str) -> Option<&str> {
    CHAPTER_PAGES_REGEX
        .captures(details)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Publisher name leading a chapter's details, e.g. `Apple Academic Press` from
/// `Apple Academic Press (CRC Press). [ISBN: 9781774916469]`.
///
/// Returns `None` for single characters and ISBN markers.
pub fn publisher(details: &str) -> Option<&str> {
    let candidate = PUBLISHER_REGEX
        .captures(details)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())?;

    if candidate.chars().count() <= 1 || candidate.to_lowercase().contains("isbn") {
        tracing::debug!(details, candidate, "rejected publisher candidate");
        return None;
    }
    Some(candidate)
}
