use chrono::NaiveDate;
use std::fmt;

use crate::config::ClassificationConfig;
use crate::domain::commit::{CommitRecord, ParsedCommit};

/// Body used when a release has nothing worth listing
pub const NO_NOTABLE_CHANGES: &str = "*No notable changes*";

/// Grouping of changelog bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSection {
    Features,
    BugFixes,
    Other,
}

impl ChangeSection {
    /// Emission order of sections in an entry
    pub const ORDER: [ChangeSection; 3] = [
        ChangeSection::Features,
        ChangeSection::BugFixes,
        ChangeSection::Other,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChangeSection::Features => "Features",
            ChangeSection::BugFixes => "Bug Fixes",
            ChangeSection::Other => "Other",
        }
    }
}

/// Bullets grouped by section, in commit order within each section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedChanges {
    pub features: Vec<String>,
    pub bug_fixes: Vec<String>,
    pub other: Vec<String>,
}

impl GroupedChanges {
    pub fn section(&self, section: ChangeSection) -> &[String] {
        match section {
            ChangeSection::Features => &self.features,
            ChangeSection::BugFixes => &self.bug_fixes,
            ChangeSection::Other => &self.other,
        }
    }

    fn section_mut(&mut self, section: ChangeSection) -> &mut Vec<String> {
        match section {
            ChangeSection::Features => &mut self.features,
            ChangeSection::BugFixes => &mut self.bug_fixes,
            ChangeSection::Other => &mut self.other,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.bug_fixes.is_empty() && self.other.is_empty()
    }

    /// Markdown body: `### Title` blocks for non-empty sections, or the placeholder
    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_NOTABLE_CHANGES.to_string();
        }

        ChangeSection::ORDER
            .iter()
            .filter(|section| !self.section(**section).is_empty())
            .map(|section| {
                format!(
                    "### {}\n\n{}",
                    section.title(),
                    self.section(*section).join("\n")
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Decides which section, if any, a parsed commit belongs to.
pub fn classify(
    record: &CommitRecord,
    parsed: &ParsedCommit,
    rules: &ClassificationConfig,
) -> Option<ChangeSection> {
    let commit_type = parsed.r#type.as_deref();
    let is_one_of = |types: &[String]| commit_type.is_some_and(|t| types.iter().any(|x| x == t));

    if is_one_of(&rules.feature_types) {
        return Some(ChangeSection::Features);
    }
    if is_one_of(&rules.fix_types) {
        return Some(ChangeSection::BugFixes);
    }

    let subject = record.subject.to_lowercase();
    let is_maintenance = rules
        .skip_markers
        .iter()
        .any(|marker| subject.contains(&marker.to_lowercase()));

    if record.is_merge() || is_maintenance {
        None
    } else {
        Some(ChangeSection::Other)
    }
}

/// Classifies commits into sections and renders each one as a bullet.
pub fn group_commits(
    commits: &[CommitRecord],
    rules: &ClassificationConfig,
    repository_url: Option<&str>,
) -> GroupedChanges {
    let mut grouped = GroupedChanges::default();

    for record in commits {
        let parsed = ParsedCommit::parse(&record.subject);
        if let Some(section) = classify(record, &parsed, rules) {
            let bullet = parsed.bullet(&record.link(repository_url));
            grouped.section_mut(section).push(bullet);
        }
    }

    grouped
}

/// A rendered changelog entry for one version
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseNotes {
    /// Normalized version (no leading `v`)
    pub version: String,
    pub date: NaiveDate,
    pub body: String,
}

impl ReleaseNotes {
    pub fn new(version: impl Into<String>, date: NaiveDate, body: impl Into<String>) -> Self {
        let body = body.into();
        let body = if body.trim().is_empty() {
            NO_NOTABLE_CHANGES.to_string()
        } else {
            body.trim().to_string()
        };

        ReleaseNotes {
            version: version.into(),
            date,
            body,
        }
    }

    /// Entry for a release with nothing to report
    pub fn placeholder(version: impl Into<String>, date: NaiveDate) -> Self {
        ReleaseNotes::new(version, date, NO_NOTABLE_CHANGES)
    }

    pub fn header(&self) -> String {
        format!("## [{}] - {}", self.version, self.date.format("%Y-%m-%d"))
    }

    pub fn is_placeholder(&self) -> bool {
        self.body == NO_NOTABLE_CHANGES
    }
}

impl fmt::Display for ReleaseNotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.header(), self.body)
    }
}
