use crate::PublicationType;
use std::fmt;

use super::BibtexConfig;

/// Column that aligned field names are padded to (`booktitle`, `publisher`).
const ALIGN_WIDTH: usize = 9;

/// BibTeX entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Article,
    InCollection,
    InProceedings,
    Unpublished,
    TechReport,
    Misc,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::InCollection => "incollection",
            Self::InProceedings => "inproceedings",
            Self::Unpublished => "unpublished",
            Self::TechReport => "techreport",
            Self::Misc => "misc",
        }
    }
}

impl From<PublicationType> for EntryType {
    fn from(publication_type: PublicationType) -> Self {
        match publication_type {
            PublicationType::Journal => Self::Article,
            PublicationType::BookChapter => Self::InCollection,
            PublicationType::Conference => Self::InProceedings,
            PublicationType::WorkingPaper | PublicationType::InProgress => Self::Unpublished,
            PublicationType::Report => Self::TechReport,
            PublicationType::BookProposal => Self::Misc,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single BibTeX field (key-value pair)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibtexField {
    pub name: &'static str,
    pub value: String,
}

/// An entry ready to be rendered. Field values are stored as they will be
/// written, so escaping happens before [`BibtexEntry::add_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibtexEntry {
    pub entry_type: EntryType,
    pub cite_key: String,
    pub fields: Vec<BibtexField>,
}

impl BibtexEntry {
    pub fn new(cite_key: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            entry_type,
            cite_key: cite_key.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field; blank values are skipped.
    pub fn add_field(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.fields.push(BibtexField { name, value });
    }

    /// Get a field value by name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Renders `@type{key,` followed by one braced field per line. The last
    /// field carries no trailing comma.
    pub fn render(&self, config: &BibtexConfig) -> String {
        let indent = " ".repeat(config.indent);
        let width = if config.align_fields { ALIGN_WIDTH } else { 0 };

        let fields = self
            .fields
            .iter()
            .map(|field| format!("{indent}{:<width$} = {{{}}}", field.name, field.value))
            .collect::<Vec<_>>()
            .join(",\n");

        let mut result = format!("@{}{{{},\n", self.entry_type, self.cite_key);
        if !fields.is_empty() {
            result.push_str(&fields);
            result.push('\n');
        }
        result.push('}');
        result
    }
}

/// Backslash-escapes the BibTeX special characters `{ } & % $ # _`.
///
/// A character already preceded by a backslash is left alone, so escaping an
/// escaped value is a no-op.
pub fn escape_bibtex(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous = None;
    for c in value.chars() {
        if matches!(c, '{' | '}' | '&' | '%' | '$' | '#' | '_') && previous != Some('\\') {
            result.push('\\');
        }
        result.push(c);
        previous = Some(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Finance & Development", "Finance \\& Development")]
    #[case("50% of {households}", "50\\% of \\{households\\}")]
    #[case("$100 #1 snake_case", "\\$100 \\#1 snake\\_case")]
    #[case("Already \\& escaped", "Already \\& escaped")]
    #[case("No specials", "No specials")]
    #[case("", "")]
    fn test_escape_bibtex(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_bibtex(input), expected);
    }

    #[test]
    fn test_escape_is_idempotent() {
        let once = escape_bibtex("R&D {costs} 10% $5 #3 a_b");
        assert_eq!(escape_bibtex(&once), once);
    }

    #[test]
    fn test_render_aligned() {
        let mut entry = BibtexEntry::new("smith2024great", EntryType::Article);
        entry.add_field("author", "Smith, J.");
        entry.add_field("booktitle", "Proceedings");
        entry.add_field("institution", "NIF");
        entry.add_field("note", "  ");

        assert_eq!(
            entry.render(&BibtexConfig::default()),
            "@article{smith2024great,\n  author    = {Smith, J.},\n  booktitle = {Proceedings},\n  institution = {NIF}\n}"
        );
        assert_eq!(entry.field("note"), None);
    }

    #[test]
    fn test_render_unaligned_with_indent() {
        let mut entry = BibtexEntry::new("k", EntryType::Misc);
        entry.add_field("title", "T");
        entry.add_field("year", "2024");

        let config = BibtexConfig {
            align_fields: false,
            indent: 4,
        };
        assert_eq!(entry.render(&config), "@misc{k,\n    title = {T},\n    year = {2024}\n}");
    }

    #[test]
    fn test_render_without_fields() {
        let entry = BibtexEntry::new("empty", EntryType::Unpublished);
        assert_eq!(entry.render(&BibtexConfig::default()), "@unpublished{empty,\n}");
    }

    #[test]
    fn test_entry_type_mapping() {
        let mapped: Vec<&str> = PublicationType::ALL
            .iter()
            .map(|t| EntryType::from(*t).as_str())
            .collect();
        assert_eq!(
            mapped,
            vec![
                "article",
                "incollection",
                "inproceedings",
                "unpublished",
                "misc",
                "unpublished",
                "techreport"
            ]
        );
    }
}
