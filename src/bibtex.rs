//! BibTeX entry generation.
//!
//! Each publication type maps to one BibTeX entry type:
//!
//! - Journal: `@article` with `journal`, `volume`, `number` and `pages`
//! - Book chapter: `@incollection` with `booktitle`, `publisher` and `pages`
//! - Conference: `@inproceedings` with `address` or `note`
//! - Working paper / in progress: `@unpublished` with a status `note`
//! - Report: `@techreport` with `institution`
//! - Book proposal: `@misc` with a combined `note`
//!
//! # Example
//!
//! ```
//! use pubcite::{CitationFormatter, Publication, PublicationType};
//! use pubcite::bibtex::BibtexFormatter;
//!
//! let publication = Publication::new(
//!     "prja2",
//!     PublicationType::Journal,
//!     "Singh, J., & Singh, M.",
//!     "Alleviating urban poverty in India",
//!     "International Journal of Social Economics",
//!     2024,
//! )
//! .with_details("51(10), 1314-1335. [IF: 1.9]");
//!
//! let bibtex = BibtexFormatter::new().format(&publication);
//! assert!(bibtex.contains("  number    = {10}"));
//! assert!(bibtex.contains("  pages     = {1314--1335}"));
//! ```

mod entry;
mod key;

pub use entry::{BibtexEntry, BibtexField, EntryType, escape_bibtex};
pub use key::citation_key;

use crate::details::{
    book_title, chapter_pages, conference_address, conference_details, extract_journal_parts,
    publisher,
};
use crate::utils::{format_page_range, split_authors, strip_doi_prefix, strip_trailing_period};
use crate::{CitationFormatter, Publication, PublicationType};

/// Configuration for [`BibtexFormatter`].
#[derive(Debug, Clone)]
pub struct BibtexConfig {
    /// Pad field names so the `=` signs line up.
    pub align_fields: bool,
    /// Spaces before each field.
    pub indent: usize,
}

impl Default for BibtexConfig {
    fn default() -> Self {
        Self {
            align_fields: true,
            indent: 2,
        }
    }
}

/// Formats publications as BibTeX entries.
#[derive(Debug, Clone, Default)]
pub struct BibtexFormatter {
    config: BibtexConfig,
}

impl BibtexFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: BibtexConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the structured entry without rendering it.
    pub fn entry(&self, publication: &Publication) -> BibtexEntry {
        let mut entry = BibtexEntry::new(
            citation_key(publication),
            EntryType::from(publication.publication_type),
        );
        let year = publication.year.first_year().unwrap_or_default();
        let source = strip_trailing_period(publication.source.trim());
        let details = publication.details.as_deref().map(str::trim).unwrap_or("");

        entry.add_field("author", escape_bibtex(&split_authors(&publication.authors).join(" and ")));
        entry.add_field("title", escape_bibtex(publication.title.trim()));

        match publication.publication_type {
            PublicationType::Journal => {
                let parts = extract_journal_parts(publication.details.as_deref());
                entry.add_field("journal", escape_bibtex(publication.source.trim()));
                entry.add_field("year", year);
                if let Some(volume) = parts.volume {
                    entry.add_field("volume", escape_bibtex(&volume));
                }
                if let Some(issue) = parts.issue {
                    entry.add_field("number", escape_bibtex(&issue));
                }
                if let Some(pages) = parts.pages {
                    entry.add_field("pages", escape_bibtex(&format_page_range(&pages)));
                }
            }
            PublicationType::BookChapter => {
                entry.add_field("booktitle", escape_bibtex(&book_title(&publication.source)));
                if let Some(publisher) = publisher(details) {
                    entry.add_field("publisher", escape_bibtex(publisher));
                }
                if let Some(pages) = chapter_pages(details) {
                    entry.add_field("pages", escape_bibtex(&format_page_range(pages)));
                }
                entry.add_field("year", year);
            }
            PublicationType::Conference => {
                entry.add_field(
                    "booktitle",
                    format!("Proceedings of the {}", escape_bibtex(source)),
                );
                entry.add_field("year", year);
                match conference_address(details) {
                    Some(address) => entry.add_field("address", escape_bibtex(&address)),
                    None => entry.add_field("note", escape_bibtex(&conference_details(details))),
                }
            }
            PublicationType::WorkingPaper | PublicationType::InProgress => {
                let mut note = escape_bibtex(source);
                if let Some(status) = non_empty(publication.status.as_deref()) {
                    note.push_str(&format!(". Status: {}", escape_bibtex(status)));
                }
                entry.add_field("note", note);
                entry.add_field("year", year);
                add_url(&mut entry, publication);
            }
            PublicationType::Report => {
                entry.add_field("institution", escape_bibtex(source));
                entry.add_field("year", year);
                add_url(&mut entry, publication);
            }
            PublicationType::BookProposal => {
                entry.add_field("year", year);
                let note = [Some(source), non_empty(Some(details))]
                    .into_iter()
                    .flatten()
                    .map(escape_bibtex)
                    .chain(
                        non_empty(publication.status.as_deref())
                            .map(|status| format!("Status: {}", escape_bibtex(status))),
                    )
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(". ");
                entry.add_field("note", note);
                add_url(&mut entry, publication);
            }
        }

        if let Some(doi) = non_empty(publication.doi_link.as_deref()) {
            entry.add_field("doi", strip_doi_prefix(doi));
        }
        entry
    }

    /// Renders a list of publications as one `.bib` document, entries separated
    /// by a blank line.
    pub fn format_bibliography(&self, publications: &[Publication]) -> String {
        self.format_all(publications).join("\n\n")
    }
}

impl CitationFormatter for BibtexFormatter {
    type Output = String;

    fn format(&self, publication: &Publication) -> String {
        let entry = self.entry(publication);
        tracing::trace!(
            id = %publication.id,
            key = %entry.cite_key,
            entry_type = %entry.entry_type,
            "formatted BibTeX entry"
        );
        entry.render(&self.config)
    }
}

fn add_url(entry: &mut BibtexEntry, publication: &Publication) {
    if let Some(link) = non_empty(publication.link.as_deref()) {
        entry.add_field("url", link);
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
