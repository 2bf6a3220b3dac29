//! Citation generation for an academic publication list.
//!
//! `pubcite` turns the loosely structured publication records of a personal
//! academic portfolio into reference-manager ready output.
//!
//! # Key Features
//!
//! - **APA 7 references** with per-type italics, ordering and punctuation
//! - **BibTeX entries** with generated citation keys and escaped field values
//! - **schema.org `ScholarlyArticle`** JSON-LD for search engines
//! - **Details extraction**: volume, issue, pages and publisher pulled out of
//!   free-text strings like `51(10), 1314-1335. [IF: 1.9]`
//! - **List handling**: JSON loading, year/impact sorting, grouping by type
//!
//! # Basic Usage
//!
//! ```rust
//! use pubcite::{Publication, PublicationType};
//!
//! let publication = Publication::new(
//!     "prja1",
//!     PublicationType::Journal,
//!     "Singh, J., & Singh, M.",
//!     "Addressing unproductive credit consumption.",
//!     "Cities",
//!     2024,
//! )
//! .with_details("145, 104729. [IF: 6.7]")
//! .with_doi_link("https://doi.org/10.1016/j.cities.2023.104729");
//!
//! assert_eq!(
//!     publication.to_apa(),
//!     "Singh, J., & Singh, M. (2024). Addressing unproductive credit consumption. \
//!      *Cities*, *145*, 104729. https://doi.org/10.1016/j.cities.2023.104729"
//! );
//! assert!(publication.to_bibtex().starts_with("@article{singh2024addressingunproductive,"));
//! ```
//!
//! # Custom Formatting
//!
//! ```rust
//! use pubcite::{CitationFormatter, Publication, PublicationType};
//! use pubcite::apa::{ApaConfig, ApaFormatter, Emphasis};
//! use pubcite::bibtex::{BibtexConfig, BibtexFormatter};
//!
//! let publication = Publication::new(
//!     "cp1",
//!     PublicationType::Conference,
//!     "Singh, J.",
//!     "Self-Help Groups.",
//!     "International Social Marketing Conference",
//!     2025,
//! );
//!
//! let apa = ApaFormatter::new().with_config(ApaConfig { emphasis: Emphasis::Html });
//! assert!(apa.format(&publication).contains("<i>Self-Help Groups</i>."));
//!
//! let bibtex = BibtexFormatter::new().with_config(BibtexConfig {
//!     align_fields: false,
//!     ..Default::default()
//! });
//! assert!(bibtex.format(&publication).contains("  title = {Self-Help Groups.}"));
//! ```
//!
//! # Error Handling
//!
//! Formatting never fails: malformed or partial fields produce a degraded
//! citation rather than an error. Loading and serialization return the crate's
//! [`Result`] type wrapping [`CitationError`]:
//!
//! ```rust
//! use pubcite::{CitationError, JsonParser, PublicationParser};
//!
//! match JsonParser::new().parse("not json") {
//!     Ok(publications) => println!("Loaded {} publications", publications.len()),
//!     Err(CitationError::Json(e)) => eprintln!("Malformed list: {e}"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```
//!
//! # Thread Safety
//!
//! All formatters are stateless apart from their configuration and can be shared
//! between threads.

use thiserror::Error;

pub mod apa;
pub mod bibtex;
pub mod details;
pub mod publication;
pub mod schema;
pub mod sort;
mod regex;
mod utils;

// Reexports
pub use apa::ApaFormatter;
pub use bibtex::BibtexFormatter;
pub use publication::{
    ImpactMetric, JsonParser, Publication, PublicationParser, PublicationType, Year,
};
pub use schema::ScholarlyFormatter;
pub use sort::SortOrder;

/// A specialized Result type for citation operations.
pub type Result<T> = std::result::Result<T, CitationError>;

/// Errors from loading publication lists and serializing output.
#[derive(Error, Debug)]
pub enum CitationError {
    #[error("Parse error: {0}")]
    InvalidFormat(String),

    #[error("Invalid field value: {field} - {message}")]
    InvalidFieldValue { field: String, message: String },

    #[error("Duplicate publication id: {0}")]
    DuplicateId(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for implementing citation formatters.
pub trait CitationFormatter {
    /// The rendered citation type.
    type Output;

    /// Format a single publication.
    ///
    /// Formatting is total: missing or unparseable fields are omitted or rendered
    /// verbatim, never reported as errors.
    fn format(&self, publication: &Publication) -> Self::Output;

    /// Format every publication, preserving order.
    fn format_all(&self, publications: &[Publication]) -> Vec<Self::Output> {
        publications.iter().map(|p| self.format(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_error_display() {
        let error = CitationError::InvalidFormat("Empty input".to_string());
        assert_eq!(error.to_string(), "Parse error: Empty input");

        let error = CitationError::DuplicateId("prja1".to_string());
        assert_eq!(error.to_string(), "Duplicate publication id: prja1");
    }

    #[test]
    fn test_formatters_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApaFormatter>();
        assert_send_sync::<BibtexFormatter>();
        assert_send_sync::<ScholarlyFormatter>();
        assert_send_sync::<Publication>();
    }
}
