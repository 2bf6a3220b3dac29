use crate::regex::Regex;
use std::sync::LazyLock;

static DOI_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://(?:dx\.)?doi\.org/(.+)$").unwrap());

static LEADING_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}").unwrap());

static ANY_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

static AUTHOR_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*&\s*|\s+and\s+").unwrap());

static INITIALS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z]\.?[\s-]*)+$").unwrap());

static PAGE_DASH_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*[-–]+\s*").unwrap());

static WHITESPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Returns the four digits a year string starts with, if any.
pub(crate) fn leading_year(year: &str) -> Option<&str> {
    LEADING_YEAR_REGEX.find(year.trim()).map(|m| m.as_str())
}

/// Returns the first run of four digits anywhere in a year string.
pub(crate) fn find_year(year: &str) -> Option<&str> {
    ANY_YEAR_REGEX.find(year).map(|m| m.as_str())
}

/// Removes a single trailing period.
pub(crate) fn strip_trailing_period(s: &str) -> &str {
    s.strip_suffix('.').unwrap_or(s)
}

/// Strips a `https://doi.org/` style prefix, leaving the bare DOI.
///
/// Unlike a full DOI normalisation this keeps the original case.
pub(crate) fn strip_doi_prefix(doi_link: &str) -> &str {
    let doi_link = doi_link.trim();
    match DOI_URL_REGEX.captures(doi_link) {
        Some(captures) => captures.get(1).map_or(doi_link, |m| m.as_str()),
        None => doi_link,
    }
}

/// Collapses every whitespace run, including a lone tab or line break, to one space.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN_REGEX.replace_all(s, " ").into_owned()
}

/// Rewrites a hyphen or en-dash page range with the BibTeX `--` separator.
pub(crate) fn format_page_range(pages: &str) -> String {
    PAGE_DASH_REGEX.replace_all(pages.trim(), "--").into_owned()
}

/// Surname of the first author, as written.
///
/// Everything up to the first comma, ampersand or `and` separator.
pub(crate) fn first_author_surname(authors: &str) -> &str {
    let first = authors.split(',').next().unwrap_or("");
    AUTHOR_SEPARATOR_REGEX
        .split(first)
        .next()
        .unwrap_or("")
        .trim()
}

/// Splits an author string such as `Singh, J., Batra, G. S., & Chatrath, S.K.`
/// into individual `Surname, Initials` names.
///
/// A comma-separated token is attached to the preceding surname when it consists
/// of initials only; any other token starts a new name.
pub(crate) fn split_authors(authors: &str) -> Vec<String> {
    let normalized = AUTHOR_SEPARATOR_REGEX.replace_all(authors, ", ");

    let mut names = Vec::new();
    let mut surname: Option<&str> = None;
    for token in normalized.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match surname {
            Some(last) if INITIALS_REGEX.is_match(token) => {
                names.push(format!("{last}, {token}"));
                surname = None;
            }
            Some(last) => {
                names.push(last.to_string());
                surname = Some(token);
            }
            None => surname = Some(token),
        }
    }
    if let Some(last) = surname {
        names.push(last.to_string());
    }
    names
}
