//! Ordering and grouping of publication lists.
//!
//! # Example
//!
//! ```
//! use pubcite::{Publication, PublicationType, SortOrder};
//! use pubcite::sort::{group_by_type, sorted};
//!
//! let publications = vec![
//!     Publication::new("a", PublicationType::Report, "Doe, A.", "Old", "NIF", 2019),
//!     Publication::new("b", PublicationType::Journal, "Doe, A.", "New", "Cities", 2024),
//! ];
//!
//! let order: SortOrder = "year-desc".parse().unwrap();
//! let ordered = sorted(&publications, order);
//! assert_eq!(ordered[0].id, "b");
//!
//! let groups = group_by_type(ordered);
//! assert_eq!(groups[0].0, PublicationType::Journal);
//! ```

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{CitationError, Publication, PublicationType, Result};

/// List ordering. Every order is stable: ties keep their input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Newest first; within a year, higher impact first.
    #[default]
    YearDesc,
    /// Oldest first; within a year, lower impact first.
    YearAsc,
    /// Higher impact first; within a score, newest first.
    Impact,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::YearDesc, SortOrder::YearAsc, SortOrder::Impact];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::YearDesc => "year-desc",
            SortOrder::YearAsc => "year-asc",
            SortOrder::Impact => "impact",
        }
    }

    /// Compares two publications under this order.
    pub fn compare(&self, a: &Publication, b: &Publication) -> Ordering {
        let (year_a, year_b) = (year_key(a), year_key(b));
        let (impact_a, impact_b) = (impact_score(a), impact_score(b));
        match self {
            SortOrder::YearDesc => year_b.cmp(&year_a).then(impact_b.cmp(&impact_a)),
            SortOrder::YearAsc => year_a.cmp(&year_b).then(impact_a.cmp(&impact_b)),
            SortOrder::Impact => impact_b.cmp(&impact_a).then(year_b.cmp(&year_a)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CitationError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CitationError::InvalidFieldValue {
                field: "sort".to_string(),
                message: format!("expected one of year-desc, year-asc, impact; got \"{s}\""),
            })
    }
}

/// Quartile score from the impact metrics: `Q1` = 3, `Q2` = 2, `Q3` = 1, else 0.
///
/// The best quartile wins when several are listed.
pub fn impact_score(publication: &Publication) -> u8 {
    publication
        .impact_metrics
        .iter()
        .map(|metric| match metric.value.trim() {
            "Q1" => 3,
            "Q2" => 2,
            "Q3" => 1,
            _ => 0,
        })
        .max()
        .unwrap_or(0)
}

/// Leading four-digit year, or 0 for values like `Communicated 2024`.
fn year_key(publication: &Publication) -> u32 {
    publication.year.leading().unwrap_or(0)
}

/// Sorts in place.
pub fn sort_publications(publications: &mut [Publication], order: SortOrder) {
    publications.sort_by(|a, b| order.compare(a, b));
}

/// Returns references in sorted order, leaving the input untouched.
pub fn sorted(publications: &[Publication], order: SortOrder) -> Vec<&Publication> {
    publications
        .iter()
        .sorted_by(|a, b| order.compare(a, b))
        .collect()
}

/// Groups publications by type in canonical [`PublicationType::ALL`] order.
///
/// Types with no publications are omitted; each group keeps the input order.
pub fn group_by_type<'a>(
    publications: impl IntoIterator<Item = &'a Publication>,
) -> Vec<(PublicationType, Vec<&'a Publication>)> {
    let mut groups = publications
        .into_iter()
        .into_group_map_by(|publication| publication.publication_type);

    let grouped: Vec<_> = PublicationType::ALL
        .into_iter()
        .filter_map(|publication_type| {
            groups
                .remove(&publication_type)
                .map(|members| (publication_type, members))
        })
        .collect();

    tracing::debug!(groups = grouped.len(), "grouped publications by type");
    grouped
}
