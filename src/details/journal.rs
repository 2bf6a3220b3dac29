use crate::regex::{Captures, Regex};
use std::sync::LazyLock;

static BRACKET_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]+\]").unwrap());

static TRAILING_PUNCTUATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,\s]+$").unwrap());

static VOLUME_ISSUE_PAGES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)\s*\(([A-Za-z0-9_-]+)\)\s*,\s*([A-Za-z0-9_-]+[-–][A-Za-z0-9_-]+|[A-Za-z0-9]+)$").unwrap()
});

static VOLUME_PAGES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)\s*,\s*([A-Za-z0-9_-]+[-–][A-Za-z0-9_-]+|[A-Za-z0-9]+)$").unwrap()
});

static VOLUME_ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+)\s*\(([A-Za-z0-9_-]+)\)$").unwrap());

static PAGES_ONLY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z0-9_-]+[-–][A-Za-z0-9_-]+|[A-Za-z0-9]+)$").unwrap());

/// Volume, issue and pages pulled out of a journal `details` string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalParts {
    pub volume: Option<String>,
    pub issue: Option<String>,
    /// Page range or article number, with the original separator.
    pub pages: Option<String>,
    /// The details string with bracketed annotations and trailing punctuation removed.
    pub cleaned: String,
}

impl JournalParts {
    /// True when no rule recognised the details.
    pub fn is_unstructured(&self) -> bool {
        self.volume.is_none() && self.issue.is_none() && self.pages.is_none()
    }
}

/// The extraction rules, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalRule {
    /// `51(10), 1314-1335`
    VolumeIssuePages,
    /// `145, 104729`
    VolumePages,
    /// `28(1)`
    VolumeIssue,
    /// `1314-1335` or `e071674`
    PagesOnly,
}

impl JournalRule {
    /// Precedence order. [`JournalRule::VolumeIssuePages`] must stay ahead of
    /// [`JournalRule::VolumePages`].
    pub const ORDER: [JournalRule; 4] = [
        JournalRule::VolumeIssuePages,
        JournalRule::VolumePages,
        JournalRule::VolumeIssue,
        JournalRule::PagesOnly,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            JournalRule::VolumeIssuePages => &*VOLUME_ISSUE_PAGES_REGEX,
            JournalRule::VolumePages => &*VOLUME_PAGES_REGEX,
            JournalRule::VolumeIssue => &*VOLUME_ISSUE_REGEX,
            JournalRule::PagesOnly => &*PAGES_ONLY_REGEX,
        }
    }

    /// Applies this rule alone to an already cleaned details string.
    pub fn apply(&self, cleaned: &str) -> Option<JournalParts> {
        let captures = self.regex().captures(cleaned)?;
        let group = |i: usize| capture(&captures, i);
        let (volume, issue, pages) = match self {
            JournalRule::VolumeIssuePages => (group(1), group(2), group(3)),
            JournalRule::VolumePages => (group(1), None, group(2)),
            JournalRule::VolumeIssue => (group(1), group(2), None),
            JournalRule::PagesOnly => (None, None, Some(cleaned.to_string())),
        };
        Some(JournalParts {
            volume,
            issue,
            pages,
            cleaned: cleaned.to_string(),
        })
    }
}

fn capture(captures: &Captures<'_>, i: usize) -> Option<String> {
    captures.get(i).map(|m| m.as_str().to_string())
}

/// Removes the first bracketed annotation (and anything after it) plus trailing
/// commas, periods and whitespace.
pub(crate) fn clean_details(details: &str) -> String {
    let head = match BRACKET_REGEX.find(details) {
        Some(m) => &details[..m.start()],
        None => details,
    };
    TRAILING_PUNCTUATION_REGEX
        .replace(head.trim(), "")
        .into_owned()
}

/// Parses a journal `details` string into volume, issue and pages.
///
/// Rules are tried in [`JournalRule::ORDER`]; the first match wins. Text that
/// matches no rule is returned in [`JournalParts::cleaned`] with every
/// structured field empty.
pub fn extract_journal_parts(details: Option<&str>) -> JournalParts {
    let Some(details) = details else {
        return JournalParts::default();
    };

    let cleaned = clean_details(details);
    for rule in JournalRule::ORDER {
        if let Some(parts) = rule.apply(&cleaned) {
            tracing::trace!(?rule, details, "matched journal details");
            return parts;
        }
    }

    if !cleaned.is_empty() {
        tracing::debug!(details, "journal details not recognised, keeping raw text");
    }
    JournalParts {
        cleaned,
        ..Default::default()
    }
}
