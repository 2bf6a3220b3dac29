//! Publication records and JSON loading.
//!
//! # Example
//!
//! ```
//! use pubcite::{JsonParser, PublicationParser, PublicationType};
//!
//! let input = r#"[{
//!     "id": "prja1",
//!     "type": "Peer-Reviewed Journal Articles",
//!     "authors": "Singh, J., & Singh, M.",
//!     "title": "Addressing unproductive credit consumption.",
//!     "source": "Cities",
//!     "year": 2024,
//!     "details": "145, 104729. [IF: 6.7]"
//! }]"#;
//!
//! let publications = JsonParser::new().parse(input).unwrap();
//! assert_eq!(publications[0].publication_type, PublicationType::Journal);
//! ```

use nanoid::nanoid;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::utils::{find_year, leading_year};
use crate::{CitationError, CitationFormatter, Result};

/// Closed set of publication categories.
///
/// The declaration order is the canonical display order used by
/// [`group_by_type`](crate::sort::group_by_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicationType {
    #[serde(rename = "Peer-Reviewed Journal Articles", alias = "Journal")]
    Journal,
    #[serde(rename = "Book Chapters", alias = "BookChapter")]
    BookChapter,
    #[serde(rename = "Conference Papers", alias = "Conference")]
    Conference,
    #[serde(
        rename = "Communicated Research & Work in Progress",
        alias = "InProgress"
    )]
    InProgress,
    #[serde(rename = "Book Proposals (As Editor)", alias = "BookProposal")]
    BookProposal,
    #[serde(rename = "Working Papers & Preprints", alias = "WorkingPaper")]
    WorkingPaper,
    #[serde(rename = "Technical Reports & Monographs", alias = "Report")]
    Report,
}

impl PublicationType {
    /// All types in canonical order.
    pub const ALL: [PublicationType; 7] = [
        PublicationType::Journal,
        PublicationType::BookChapter,
        PublicationType::Conference,
        PublicationType::InProgress,
        PublicationType::BookProposal,
        PublicationType::WorkingPaper,
        PublicationType::Report,
    ];

    /// Section heading used by the portfolio for this type.
    pub fn label(&self) -> &'static str {
        match self {
            PublicationType::Journal => "Peer-Reviewed Journal Articles",
            PublicationType::BookChapter => "Book Chapters",
            PublicationType::Conference => "Conference Papers",
            PublicationType::InProgress => "Communicated Research & Work in Progress",
            PublicationType::BookProposal => "Book Proposals (As Editor)",
            PublicationType::WorkingPaper => "Working Papers & Preprints",
            PublicationType::Report => "Technical Reports & Monographs",
        }
    }

    /// Short variant name, e.g. `BookChapter`.
    pub fn name(&self) -> &'static str {
        match self {
            PublicationType::Journal => "Journal",
            PublicationType::BookChapter => "BookChapter",
            PublicationType::Conference => "Conference",
            PublicationType::InProgress => "InProgress",
            PublicationType::BookProposal => "BookProposal",
            PublicationType::WorkingPaper => "WorkingPaper",
            PublicationType::Report => "Report",
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PublicationType {
    type Err = CitationError;

    /// Accepts either the section label or the variant name.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        PublicationType::ALL
            .into_iter()
            .find(|t| t.label() == s || t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CitationError::InvalidFieldValue {
                field: "type".to_string(),
                message: format!("unknown publication type \"{s}\""),
            })
    }
}

/// Publication year: a plain number or a free-text value such as `2025 (Expected)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Numeric(u32),
    Text(String),
}

impl Year {
    /// The leading four-digit year, if the value starts with one.
    pub fn leading(&self) -> Option<u32> {
        match self {
            Year::Numeric(year) => Some(*year),
            Year::Text(text) => leading_year(text).and_then(|y| y.parse().ok()),
        }
    }

    /// The first four-digit year anywhere in the value.
    pub fn first_year(&self) -> Option<String> {
        match self {
            Year::Numeric(year) => Some(year.to_string()),
            Year::Text(text) => find_year(text).map(str::to_string),
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Numeric(year) => write!(f, "{year}"),
            Year::Text(text) => f.write_str(text),
        }
    }
}

impl From<u32> for Year {
    fn from(year: u32) -> Self {
        Year::Numeric(year)
    }
}

impl From<i32> for Year {
    fn from(year: i32) -> Self {
        u32::try_from(year).map_or_else(|_| Year::Text(year.to_string()), Year::Numeric)
    }
}

impl From<&str> for Year {
    fn from(year: &str) -> Self {
        Year::Text(year.to_string())
    }
}

/// A journal ranking or score shown next to a publication, e.g. `Scopus Quartile: Q1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetric {
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A single publication record.
///
/// Only `type`, `authors`, `title`, `source` and `year` are required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Anchor id; a random one is assigned on load when missing.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub publication_type: PublicationType,
    /// Free-text authors, conventionally `Last, F., & Last, F.`
    pub authors: String,
    pub title: String,
    /// Journal name, book reference, conference name or repository.
    pub source: String,
    pub year: Year,
    /// Loosely structured volume/issue/pages/publisher text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Annotation such as `Preprint` or `In Press`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub impact_metrics: Vec<ImpactMetric>,
}

impl Publication {
    /// Creates a publication with the required fields and no optional metadata.
    pub fn new(
        id: impl Into<String>,
        publication_type: PublicationType,
        authors: impl Into<String>,
        title: impl Into<String>,
        source: impl Into<String>,
        year: impl Into<Year>,
    ) -> Self {
        Self {
            id: id.into(),
            publication_type,
            authors: authors.into(),
            title: title.into(),
            source: source.into(),
            year: year.into(),
            details: None,
            doi_link: None,
            link: None,
            status: None,
            summary: None,
            insight_snippet: None,
            tags: Vec::new(),
            impact_metrics: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_doi_link(mut self, doi_link: impl Into<String>) -> Self {
        self.doi_link = Some(doi_link.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Whether the status marks this item as a preprint.
    pub fn is_preprint(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains("preprint"))
    }

    /// APA 7 reference with the default configuration.
    pub fn to_apa(&self) -> String {
        crate::apa::ApaFormatter::new().format(self)
    }

    /// BibTeX entry with the default configuration.
    pub fn to_bibtex(&self) -> String {
        crate::bibtex::BibtexFormatter::new().format(self)
    }

    /// schema.org `ScholarlyArticle` record.
    pub fn to_scholarly_article(&self) -> serde_json::Value {
        crate::schema::scholarly_article(self)
    }
}

/// Trait for loading publication lists.
pub trait PublicationParser {
    /// Parse a string containing zero or more publications.
    ///
    /// # Errors
    ///
    /// Returns `CitationError` if the input is empty, malformed, or repeats an `id`.
    /// Records without an `id` are given a generated one.
    fn parse(&self, input: &str) -> Result<Vec<Publication>>;
}

/// Loads publications from a JSON array.
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PublicationParser for JsonParser {
    fn parse(&self, input: &str) -> Result<Vec<Publication>> {
        if input.trim().is_empty() {
            return Err(CitationError::InvalidFormat("Empty input".into()));
        }

        let mut publications: Vec<Publication> = serde_json::from_str(input)?;
        for publication in publications.iter_mut().filter(|p| p.id.trim().is_empty()) {
            publication.id = nanoid!();
            tracing::debug!(id = %publication.id, "assigned id to publication without one");
        }

        let mut seen = HashSet::with_capacity(publications.len());
        for publication in &publications {
            if !seen.insert(publication.id.as_str()) {
                return Err(CitationError::DuplicateId(publication.id.clone()));
            }
        }

        tracing::debug!(count = publications.len(), "loaded publications");
        Ok(publications)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
