//! schema.org `ScholarlyArticle` JSON-LD.
//!
//! Builds the structured-data record a web page embeds in a
//! `<script type="application/ld+json">` tag so that search engines can index a
//! publication. Fields with no value are removed rather than emitted as `null`.
//!
//! # Example
//!
//! ```
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
//! .with_details("145, 104729. [IF: 6.7]");
//!
//! let article = publication.to_scholarly_article();
//! assert_eq!(article["@type"], "ScholarlyArticle");
//! assert_eq!(article["isPartOf"]["volumeNumber"], "145");
//! assert_eq!(article["author"][1]["name"], "Singh, M.");
//! ```

use serde_json::{Value, json};

use crate::details::{
    book_title, chapter_pages, conference_address, conference_details, extract_journal_parts,
    publisher,
};
use crate::utils::{split_authors, strip_doi_prefix};
use crate::{CitationFormatter, Publication, PublicationType, Result, Year};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Produces schema.org `ScholarlyArticle` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScholarlyFormatter;

impl ScholarlyFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CitationFormatter for ScholarlyFormatter {
    type Output = Value;

    fn format(&self, publication: &Publication) -> Value {
        scholarly_article(publication)
    }
}

/// Builds the `ScholarlyArticle` record for a publication.
pub fn scholarly_article(publication: &Publication) -> Value {
    let mut article = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ScholarlyArticle",
        "headline": publication.title.trim(),
        "author": authors(&publication.authors),
        "datePublished": date_published(&publication.year),
        "abstract": non_empty(publication.summary.as_deref())
            .or_else(|| non_empty(publication.insight_snippet.as_deref())),
        "keywords": publication.tags.join(", "),
    });

    if let Some(doi) = non_empty(publication.doi_link.as_deref()) {
        article["url"] = json!(doi);
        article["sameAs"] = json!(doi);
        article["identifier"] = json!({
            "@type": "PropertyValue",
            "propertyID": "DOI",
            "value": strip_doi_prefix(doi),
        });
    } else if let Some(link) = non_empty(publication.link.as_deref()) {
        article["url"] = json!(link);
    }

    let source = publication.source.trim();
    let details = publication.details.as_deref().unwrap_or("");
    match publication.publication_type {
        PublicationType::Journal => {
            let parts = extract_journal_parts(publication.details.as_deref());
            let mut issue = json!({
                "@type": "PublicationIssue",
                "isPartOf": { "@type": "Periodical", "name": source },
            });
            if let Some(volume) = &parts.volume {
                issue["volumeNumber"] = json!(volume);
                issue["issueNumber"] = json!(parts.issue.as_deref().unwrap_or("N/A"));
            }
            article["isPartOf"] = issue;
            article["pagination"] = json!(parts.pages);
        }
        PublicationType::BookChapter => {
            article["isPartOf"] = json!({
                "@type": "Book",
                "name": book_title(source),
                "publisher": publisher(details)
                    .map(|name| json!({ "@type": "Organization", "name": name })),
            });
            article["pagination"] = json!(chapter_pages(details));
        }
        PublicationType::Conference => {
            article["isPartOf"] = json!({ "@type": "Event", "name": source });
            match conference_address(details) {
                Some(address) => {
                    article["locationCreated"] = json!({ "@type": "Place", "name": address });
                }
                None => article["description"] = json!(conference_details(details)),
            }
        }
        PublicationType::Report => {
            article["isPartOf"] = json!({ "@type": "PublicationVolume", "name": source });
            article["description"] = json!(details.trim());
        }
        PublicationType::WorkingPaper
        | PublicationType::InProgress
        | PublicationType::BookProposal => {}
    }

    prune(&mut article);
    tracing::trace!(id = %publication.id, "built scholarly article");
    article
}

/// Serializes [`scholarly_article`] to a compact JSON-LD string.
///
/// # Errors
///
/// Returns [`CitationError::Json`](crate::CitationError::Json) if serialization fails.
pub fn to_json_ld(publication: &Publication) -> Result<String> {
    Ok(serde_json::to_string(&scholarly_article(publication))?)
}

/// A list of `Person` objects for several authors, a single object otherwise.
fn authors(authors: &str) -> Value {
    let mut people: Vec<Value> = split_authors(authors)
        .into_iter()
        .map(|name| json!({ "@type": "Person", "name": name }))
        .collect();

    match people.len() {
        0 if authors.trim().is_empty() => Value::Null,
        0 => json!({ "@type": "Person", "name": authors.trim() }),
        1 => people.remove(0),
        _ => Value::Array(people),
    }
}

fn date_published(year: &Year) -> String {
    match year.leading() {
        Some(year) => year.to_string(),
        None => year.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Recursively removes nulls, blank strings, and objects or arrays left empty.
fn prune(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.values_mut().for_each(prune);
            map.retain(|_, v| !is_blank(v));
        }
        Value::Array(items) => {
            items.iter_mut().for_each(prune);
            items.retain(|v| !is_blank(v));
        }
        _ => {}
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
