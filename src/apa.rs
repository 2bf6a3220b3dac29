//! APA 7 reference formatting.
//!
//! Each [`PublicationType`] has its own title styling and source layout:
//!
//! | Type | Title | Source |
//! |---|---|---|
//! | Journal | plain | *Journal*, *volume*(issue), pages |
//! | Book chapter | plain | In *Book Title* (pp. X-Y). Publisher |
//! | Conference | italic | \[Paper presentation\]. Conference, location |
//! | Working paper, in progress, report | italic | \[Preprint\] / \[Working Paper\] / \[Technical Report\]. Source |
//! | Book proposal | italic | \[Book Proposal\]. Source |
//!
//! # Example
//!
//! ```
//! use pubcite::{CitationFormatter, Publication, PublicationType};
//! use pubcite::apa::ApaFormatter;
//!
//! let publication = Publication::new(
//!     "bc1",
//!     PublicationType::BookChapter,
//!     "Singh, J., & Sharma, D.",
//!     "Contemporary Challenges of Management Education in India",
//!     "Chapter 9 in Interdisciplinary Approaches in Management Education.",
//!     2024,
//! )
//! .with_details("Apple Academic Press (CRC Press). [ISBN: 9781774916469]");
//!
//! assert_eq!(
//!     ApaFormatter::new().format(&publication),
//!     "Singh, J., & Sharma, D. (2024). Contemporary Challenges of Management Education in India. \
//!      In *Interdisciplinary Approaches in Management Education*. Apple Academic Press."
//! );
//! ```

use crate::details::{
    book_title, chapter_pages, conference_details, extract_journal_parts, publisher,
};
use crate::regex::Regex;
use crate::utils::{collapse_whitespace, find_year, strip_trailing_period};
use crate::{CitationFormatter, Publication, PublicationType, Year};
use std::sync::LazyLock;

static TRAILING_DOUBLE_PERIOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\.$").unwrap());

static SPACE_BEFORE_PERIOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\.").unwrap());

/// How italic text is marked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emphasis {
    /// `*text*`
    #[default]
    Markdown,
    /// `<i>text</i>`
    Html,
    /// No markup.
    Plain,
}

impl Emphasis {
    fn apply(&self, text: &str) -> String {
        match self {
            Emphasis::Markdown => format!("*{text}*"),
            Emphasis::Html => format!("<i>{text}</i>"),
            Emphasis::Plain => text.to_string(),
        }
    }
}

/// Configuration for [`ApaFormatter`].
#[derive(Debug, Clone, Default)]
pub struct ApaConfig {
    /// Markup used for italic titles, journal names and volumes.
    pub emphasis: Emphasis,
}

/// Formats publications as APA 7 reference-list entries.
#[derive(Debug, Clone, Default)]
pub struct ApaFormatter {
    config: ApaConfig,
}

impl ApaFormatter {
    /// Creates a formatter with Markdown emphasis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ApaConfig) -> Self {
        self.config = config;
        self
    }

    fn em(&self, text: &str) -> String {
        self.config.emphasis.apply(text)
    }

    /// Title in italics, ending in exactly one period unless it is a question
    /// or exclamation.
    fn italic_title(&self, title: &str) -> String {
        let title = title.trim();
        if title.ends_with('?') || title.ends_with('!') {
            self.em(title)
        } else {
            format!("{}.", self.em(strip_trailing_period(title)))
        }
    }

    fn journal_source(&self, publication: &Publication) -> String {
        let parts = extract_journal_parts(publication.details.as_deref());

        let mut source = self.em(strip_trailing_period(publication.source.trim()));
        if let Some(volume) = &parts.volume {
            source.push_str(", ");
            source.push_str(&self.em(volume));
        }
        if let Some(issue) = &parts.issue {
            source.push_str(&format!("({issue})"));
        }
        if let Some(pages) = &parts.pages {
            source.push_str(", ");
            source.push_str(pages);
        } else if parts.is_unstructured() && !parts.cleaned.is_empty() {
            // Article numbers and other unrecognised details
            source.push_str(", ");
            source.push_str(&parts.cleaned);
        }
        terminate(source)
    }

    fn chapter_source(&self, publication: &Publication) -> String {
        let mut source = format!("In {}", self.em(&book_title(&publication.source)));
        if let Some(details) = publication.details.as_deref() {
            if let Some(pages) = chapter_pages(details) {
                source.push_str(&format!(" (pp. {pages})"));
            }
            if let Some(publisher) = publisher(details) {
                source.push_str(". ");
                source.push_str(publisher);
            }
        }
        terminate(source)
    }

    fn conference_source(&self, publication: &Publication) -> String {
        let mut source = format!(
            "[Paper presentation]. {}",
            strip_trailing_period(publication.source.trim())
        );
        if let Some(details) = publication.details.as_deref() {
            let details = conference_details(details);
            if !details.is_empty() {
                source.push_str(", ");
                source.push_str(&details);
            }
        }
        source.push('.');
        source
    }
}

impl CitationFormatter for ApaFormatter {
    type Output = String;

    fn format(&self, publication: &Publication) -> String {
        let authors = format_authors(&publication.authors);
        let year = format_year(&publication.year);
        let source_plain = match strip_trailing_period(publication.source.trim()).trim() {
            "" => String::new(),
            source => format!("{source}."),
        };

        // (title, bracketed kind, source)
        let (title, kind, source) = match publication.publication_type {
            PublicationType::Journal => (
                plain_title(&publication.title),
                String::new(),
                self.journal_source(publication),
            ),
            PublicationType::BookChapter => (
                plain_title(&publication.title),
                String::new(),
                self.chapter_source(publication),
            ),
            PublicationType::Conference => (
                self.italic_title(&publication.title),
                String::new(),
                self.conference_source(publication),
            ),
            PublicationType::WorkingPaper
            | PublicationType::InProgress
            | PublicationType::Report => (
                self.italic_title(&publication.title),
                kind_tag(publication).unwrap_or_default().to_string(),
                source_plain,
            ),
            PublicationType::BookProposal => (
                self.italic_title(&publication.title),
                format!("[Book Proposal]. {source_plain}"),
                String::new(),
            ),
        };

        let body = format!(
            "{authors} ({year}). {} {} {}",
            title.trim(),
            kind.trim(),
            source.trim()
        );
        let body = collapse_whitespace(body.trim());
        let body = SPACE_BEFORE_PERIOD_REGEX.replace_all(body.trim(), ".");
        let mut citation = TRAILING_DOUBLE_PERIOD_REGEX
            .replace(&body, ".")
            .into_owned();

        match locator(publication) {
            Some(locator) => {
                citation.push(' ');
                citation.push_str(&locator);
            }
            None => {
                if !citation.ends_with(['.', '?', '!']) {
                    citation.push('.');
                }
            }
        }

        tracing::trace!(id = %publication.id, "formatted APA citation");
        citation.trim().to_string()
    }
}

/// Trims the author list and drops a trailing comma.
fn format_authors(authors: &str) -> &str {
    let authors = authors.trim();
    authors.strip_suffix(',').unwrap_or(authors)
}

/// `2025 (Expected)` and `Communicated 2024` reduce to the bare year; other values
/// are kept as written.
fn format_year(year: &Year) -> String {
    let text = year.to_string();
    if text.contains("Expected") || text.contains("Communicated") {
        if let Some(year) = find_year(&text) {
            return year.to_string();
        }
    }
    text
}

fn plain_title(title: &str) -> String {
    let title = title.trim();
    if title.ends_with('.') || title.ends_with('?') {
        title.to_string()
    } else {
        format!("{title}.")
    }
}

/// Bracketed description for grey literature; a preprint status wins over the type.
fn kind_tag(publication: &Publication) -> Option<&'static str> {
    if publication.is_preprint() {
        return Some("[Preprint].");
    }
    match publication.publication_type {
        PublicationType::WorkingPaper => Some("[Working Paper]."),
        PublicationType::Report => Some("[Technical Report]."),
        _ => None,
    }
}

/// DOI, or a retrieval URL for items without a formal venue.
fn locator(publication: &Publication) -> Option<String> {
    if let Some(doi) = non_empty(publication.doi_link.as_deref()) {
        return Some(doi.to_string());
    }

    let retrievable = matches!(
        publication.publication_type,
        PublicationType::WorkingPaper | PublicationType::InProgress | PublicationType::Report
    ) || publication.is_preprint();

    non_empty(publication.link.as_deref())
        .filter(|_| retrievable)
        .map(|link| format!("Retrieved from {link}"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn terminate(mut segment: String) -> String {
    let trimmed_len = segment.trim_end().len();
    segment.truncate(trimmed_len);
    if !segment.ends_with('.') {
        segment.push('.');
    }
    segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn journal(details: &str) -> Publication {
        Publication::new(
            "prja1",
            PublicationType::Journal,
            "Singh, J., & Singh, M.",
            "Addressing unproductive credit consumption.",
            "Cities",
            2024,
        )
        .with_details(details)
        .with_doi_link("https://doi.org/10.1016/j.cities.2023.104729")
    }

    #[test]
    fn test_journal_volume_pages() {
        let citation = journal("145, 104729. [IF: 6.7]").to_apa();
        assert_eq!(
            citation,
            "Singh, J., & Singh, M. (2024). Addressing unproductive credit consumption. \
             *Cities*, *145*, 104729. https://doi.org/10.1016/j.cities.2023.104729"
        );
    }

    #[test]
    fn test_journal_volume_issue_pages() {
        let publication = Publication::new(
            "prja2",
            PublicationType::Journal,
            "Singh, J., & Singh, M.",
            "Alleviating urban poverty in India",
            "International Journal of Social Economics",
            2024,
        )
        .with_details("51(10), 1314-1335. [IF: 1.9]")
        .with_doi_link("https://doi.org/10.1108/IJSE-07-2023-0514");
        assert_eq!(
            publication.to_apa(),
            "Singh, J., & Singh, M. (2024). Alleviating urban poverty in India. \
             *International Journal of Social Economics*, *51*(10), 1314-1335. \
             https://doi.org/10.1108/IJSE-07-2023-0514"
        );
    }

    #[test]
    fn test_journal_article_number_fallback() {
        let citation = journal("09721509231222609 (Online First). [IF: 2.4]").to_apa();
        assert!(citation.contains("*Cities*, 09721509231222609 (Online First). https://"));
    }

    #[test]
    fn test_journal_without_details_or_doi() {
        let publication = Publication::new(
            "prja9",
            PublicationType::Journal,
            "Singh, J., & Sharma, D.,",
            "Does financial inclusion impact socio-economic stability?",
            "Journal of Communication Engineering & Systems",
            2018,
        )
        .with_link("https://example.org/article");
        assert_eq!(
            publication.to_apa(),
            "Singh, J., & Sharma, D. (2018). Does financial inclusion impact socio-economic stability? \
             *Journal of Communication Engineering & Systems*."
        );
    }

    #[test]
    fn test_book_chapter_with_pages_and_publisher() {
        let publication = Publication::new(
            "bc9",
            PublicationType::BookChapter,
            "Singh, J.",
            "Digital public goods",
            "In Handbook of Urban Finance (pp. 45-67).",
            2023,
        )
        .with_details("Springer, pp. 45-67.");
        assert_eq!(
            publication.to_apa(),
            "Singh, J. (2023). Digital public goods. In *Handbook of Urban Finance* (pp. 45-67). Springer."
        );
    }

    #[test]
    fn test_book_chapter_expected_year() {
        let publication = Publication::new(
            "bc2",
            PublicationType::BookChapter,
            "Singh, J.",
            "Integrating Microcredit.",
            "In (Book Title TBD). River Publishers.",
            "2025 (Expected)",
        )
        .with_status("Targeting Q1-Scopus, In Press");
        assert_eq!(
            publication.to_apa(),
            "Singh, J. (2025). Integrating Microcredit. In *(Book Title TBD). River Publishers*."
        );
    }

    #[test]
    fn test_conference() {
        let publication = Publication::new(
            "cp1",
            PublicationType::Conference,
            "Singh, J.",
            "Self-Help Groups (SHGs): A Tool for Developing Economies' Socio-Economic Development.",
            "International Social Marketing Conference",
            2025,
        )
        .with_details("Poster Accepted. Presentation: 13-15 May 2025, QT Canberra, Australia.");
        assert_eq!(
            publication.to_apa(),
            "Singh, J. (2025). *Self-Help Groups (SHGs): A Tool for Developing Economies' \
             Socio-Economic Development*. [Paper presentation]. International Social Marketing \
             Conference, 13-15 May 2025, QT Canberra, Australia."
        );
    }

    #[test]
    fn test_conference_question_title_keeps_punctuation() {
        let publication = Publication::new(
            "cp2",
            PublicationType::Conference,
            "Singh, J.",
            "Do SHGs work?",
            "Annual Finance Meeting.",
            2022,
        );
        assert_eq!(
            publication.to_apa(),
            "Singh, J. (2022). *Do SHGs work?* [Paper presentation]. Annual Finance Meeting."
        );
    }

    #[test]
    fn test_working_paper_preprint_status_wins() {
        let publication = Publication::new(
            "wp1",
            PublicationType::WorkingPaper,
            "Singh, J., Batra, G.S., & Chatrath, S.K.",
            "Blockchain's Role in Social Welfare.",
            "SSRN Electronic Journal",
            "2024/2025",
        )
        .with_details("Targeting: Cities. SSRN ID 5105250.")
        .with_link("https://ssrn.com/abstract=5105250")
        .with_status("Communicated 2024 / SSRN Preprint");
        assert_eq!(
            publication.to_apa(),
            "Singh, J., Batra, G.S., & Chatrath, S.K. (2024/2025). *Blockchain's Role in Social Welfare*. \
             [Preprint]. SSRN Electronic Journal. Retrieved from https://ssrn.com/abstract=5105250"
        );
    }

    #[test]
    fn test_working_paper_default_tag() {
        let publication = Publication::new(
            "wp4",
            PublicationType::WorkingPaper,
            "Singh, J.",
            "Credit utilisation patterns",
            "Punjabi University Working Paper Series.",
            2021,
        );
        assert_eq!(
            publication.to_apa(),
            "Singh, J. (2021). *Credit utilisation patterns*. [Working Paper]. Punjabi University Working Paper Series."
        );
    }

    #[test]
    fn test_in_progress_communicated_year() {
        let publication = Publication::new(
            "wp3",
            PublicationType::InProgress,
            "Singh, J.",
            "Empowering India's Informal Workers Through AI and Blockchain.",
            "Targeting: Information Technology for Development.",
            "Communicated 2024",
        )
        .with_status("Communicated 2024");
        assert_eq!(
            publication.to_apa(),
            "Singh, J. (2024). *Empowering India's Informal Workers Through AI and Blockchain*. \
             Targeting: Information Technology for Development."
        );
    }

    #[test]
    fn test_report_with_link() {
        let publication = Publication::new(
            "rp1",
            PublicationType::Report,
            "Doe, A.",
            "Urban Credit Markets",
            "National Institute of Finance",
            2022,
        )
        .with_link("https://example.org/report");
        assert_eq!(
            publication.to_apa(),
            "Doe, A. (2022). *Urban Credit Markets*. [Technical Report]. National Institute of Finance. \
             Retrieved from https://example.org/report"
        );
    }

    #[test]
    fn test_book_proposal() {
        let publication = Publication::new(
            "bp1",
            PublicationType::BookProposal,
            "Singh, J.",
            "Fintech for Social Good",
            "Routledge.",
            2025,
        );
        assert_eq!(
            publication.to_apa(),
            "Singh, J. (2025). *Fintech for Social Good*. [Book Proposal]. Routledge."
        );
    }

    #[test]
    fn test_doi_takes_precedence_over_link() {
        let publication = Publication::new(
            "wp5",
            PublicationType::WorkingPaper,
            "Singh, J.",
            "Title",
            "SSRN",
            2024,
        )
        .with_doi_link("https://doi.org/10.2139/ssrn.1")
        .with_link("https://ssrn.com/abstract=1");
        let citation = publication.to_apa();
        assert!(citation.ends_with(" https://doi.org/10.2139/ssrn.1"));
        assert!(!citation.contains("Retrieved from"));
        assert!(!citation.contains("abstract=1"));
    }

    #[rstest]
    #[case(Emphasis::Markdown, "*Cities*, *145*, 104729.")]
    #[case(Emphasis::Html, "<i>Cities</i>, <i>145</i>, 104729.")]
    #[case(Emphasis::Plain, "Cities, 145, 104729.")]
    fn test_emphasis(#[case] emphasis: Emphasis, #[case] expected: &str) {
        let formatter = ApaFormatter::new().with_config(ApaConfig { emphasis });
        let citation = formatter.format(&journal("145, 104729"));
        assert!(citation.contains(expected), "{citation}");
    }

    #[rstest]
    #[case(Year::Numeric(2024), "2024")]
    #[case(Year::from("2025 (Expected)"), "2025")]
    #[case(Year::from("Communicated 2024"), "2024")]
    #[case(Year::from("2024/2025"), "2024/2025")]
    #[case(Year::from("Expected"), "Expected")]
    fn test_format_year(#[case] year: Year, #[case] expected: &str) {
        assert_eq!(format_year(&year), expected);
    }

    #[test]
    fn test_format_is_deterministic() {
        let publication = journal("51(10), 1314-1335. [IF: 1.9]");
        assert_eq!(publication.to_apa(), publication.to_apa());
    }

    #[rstest]
    #[case(PublicationType::Journal)]
    #[case(PublicationType::BookChapter)]
    #[case(PublicationType::Conference)]
    #[case(PublicationType::InProgress)]
    #[case(PublicationType::BookProposal)]
    #[case(PublicationType::WorkingPaper)]
    #[case(PublicationType::Report)]
    fn test_empty_fields_degrade(#[case] publication_type: PublicationType) {
        for source in ["", " . "] {
            let publication = Publication::new("x", publication_type, "", "", source, "");
            let citation = publication.to_apa();
            assert!(!citation.contains("  "), "{citation:?}");
            assert!(!citation.ends_with(".."), "{citation:?}");
            assert!(citation.ends_with('.'), "{citation:?}");
        }
    }

    #[rstest]
    #[case(PublicationType::BookProposal, "Singh, J. (2025). *Fintech*. [Book Proposal].")]
    #[case(PublicationType::WorkingPaper, "Singh, J. (2025). *Fintech*. [Working Paper].")]
    #[case(PublicationType::Report, "Singh, J. (2025). *Fintech*. [Technical Report].")]
    #[case(PublicationType::InProgress, "Singh, J. (2025). *Fintech*.")]
    fn test_blank_source_has_single_final_period(
        #[case] publication_type: PublicationType,
        #[case] expected: &str,
    ) {
        for source in ["", " . "] {
            let publication =
                Publication::new("a", publication_type, "Singh, J.", "Fintech", source, 2025);
            assert_eq!(publication.to_apa(), expected);
        }
    }

    #[test]
    fn test_line_breaks_are_collapsed() {
        let publication = Publication::new(
            "rp2",
            PublicationType::Report,
            "Doe, A.",
            "Urban\nCredit\tMarkets",
            "National Institute\nof Finance",
            2022,
        );
        assert_eq!(
            publication.to_apa(),
            "Doe, A. (2022). *Urban Credit Markets*. [Technical Report]. National Institute of Finance."
        );
    }
}
