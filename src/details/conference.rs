use crate::regex::Regex;
use crate::utils::strip_trailing_period;
use std::sync::LazyLock;

const POSTER_PREFIX: &str = "Poster Accepted. Presentation: ";

static ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([^,]+,\s*[^,]+)$").unwrap());

/// Conference date/location text with the poster prefix and the trailing period removed.
pub fn conference_details(details: &str) -> String {
    let details = details.trim();
    let details = strip_trailing_period(details);
    details.replacen(POSTER_PREFIX, "", 1).trim().to_string()
}

/// Trailing `City, Country` segment of a conference's details.
pub fn conference_address(details: &str) -> Option<String> {
    let cleaned = conference_details(details);
    ADDRESS_REGEX
        .captures(&cleaned)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}
