//! Field extraction from the free-text `details` and `source` strings.
//!
//! Publication records keep volume, issue, pages, publisher and venue information
//! in loosely formatted strings such as `51(10), 1314-1335. [IF: 1.9]` or
//! `Chapter 9 in Interdisciplinary Approaches in Management Education.`.
//! The helpers here pull those apart for every formatter.
//!
//! # Design Decision
//!
//! ## Ordered Rules
//! - **Journal details**: an ordered list of patterns, first match wins, see
//!   [`extract_journal_parts`]
//! - **Degrade, never fail**: text no rule recognises is returned as-is and
//!   rendered verbatim by the formatters
//!
//! # Example
//!
//! ```
//! use pubcite::details::extract_journal_parts;
//!
//! let parts = extract_journal_parts(Some("51(10), 1314-1335. [IF: 1.9]"));
//! assert_eq!(parts.volume.as_deref(), Some("51"));
//! assert_eq!(parts.issue.as_deref(), Some("10"));
//! assert_eq!(parts.pages.as_deref(), Some("1314-1335"));
//! ```

mod chapter;
mod conference;
mod journal;

pub use chapter::{book_title, chapter_pages, publisher};
pub use conference::{conference_address, conference_details};
pub use journal::{JournalParts, JournalRule, extract_journal_parts};
