//! Splicing release entries into an existing changelog.
//!
//! The document is treated as a preamble (title and boilerplate) followed by
//! version entries, each starting at a `## [x.y.z]` or `## x.y.z` header.
//! Merging removes any entry for the same version before inserting, so
//! running twice for one tag leaves a single entry.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::notes::ReleaseNotes;
use crate::domain::tag::normalize_version;

/// Preamble written when the changelog does not exist yet.
pub const DEFAULT_PREAMBLE: &str =
    "# Changelog\n\nAll notable changes to this project will be documented in this file.";

fn version_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^##\s+(?:\[([^\]]+)\]|v?(\d+\.\d+\.\d+\S*))")
            .expect("version header pattern is valid")
    })
}

/// Version named by an entry header line, normalized without a leading `v`.
pub fn header_version(line: &str) -> Option<String> {
    let captures = version_header_regex().captures(line)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| normalize_version(m.as_str()).to_string())
}

fn is_version_header(line: &str) -> bool {
    version_header_regex().is_match(line)
}

fn is_preamble_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || (trimmed.starts_with("# ") || trimmed == "#") {
        return true;
    }

    let lower = trimmed.to_lowercase();
    [
        "changelog",
        "keep a changelog",
        "keepachangelog",
        "semantic versioning",
        "semver",
        "notable changes",
        "format is based on",
        "adheres to",
    ]
    .iter()
    .any(|needle| lower.contains(needle))
}

/// Result of merging an entry into a document
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDocument {
    pub content: String,
    /// Whether an older entry for the same version was removed
    pub replaced_existing: bool,
}

/// Line terminator a document is written back with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// CRLF when the text contains any `\r\n`, LF otherwise
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A changelog held in memory as lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangelogDocument {
    lines: Vec<String>,
    line_ending: LineEnding,
}

impl ChangelogDocument {
    pub fn parse(content: &str) -> Self {
        ChangelogDocument {
            lines: content.lines().map(str::to_string).collect(),
            line_ending: LineEnding::detect(content),
        }
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Versions of all entries, top to bottom
    pub fn versions(&self) -> Vec<String> {
        self.lines.iter().filter_map(|l| header_version(l)).collect()
    }

    /// Drops every block whose header names `version`.
    ///
    /// A block runs from its header up to the next version header or end of file.
    /// Returns whether anything was removed.
    pub fn remove_version(&mut self, version: &str) -> bool {
        let version = normalize_version(version);
        let mut kept = Vec::with_capacity(self.lines.len());
        let mut skipping = false;
        let mut removed = false;

        for line in self.lines.drain(..) {
            if let Some(found) = header_version(&line) {
                skipping = found == version;
                removed |= skipping;
            }
            if !skipping {
                kept.push(line);
            }
        }

        self.lines = kept;
        removed
    }

    /// Index where a new entry goes.
    ///
    /// Just before the first version header, or after the leading run of
    /// preamble lines when there are no entries.
    pub fn insertion_index(&self) -> usize {
        if let Some(idx) = self.lines.iter().position(|l| is_version_header(l)) {
            return idx;
        }

        self.lines
            .iter()
            .position(|l| !is_preamble_line(l))
            .unwrap_or(self.lines.len())
    }

    /// Splices `entry` at the insertion point with one blank line on each side.
    pub fn insert_entry(&mut self, entry: &str) {
        let at = self.insertion_index();
        let mut after = self.lines.split_off(at);

        while self.lines.last().is_some_and(|l| l.trim().is_empty()) {
            self.lines.pop();
        }
        let leading_blanks = after.iter().take_while(|l| l.trim().is_empty()).count();
        after.drain(..leading_blanks);

        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.extend(entry.trim().lines().map(str::to_string));
        if !after.is_empty() {
            self.lines.push(String::new());
            self.lines.extend(after);
        }
    }

    pub fn render(&self) -> String {
        let newline = self.line_ending.as_str();
        let mut out = self.lines.join(newline);
        out.push_str(newline);
        out
    }
}

/// Merges `notes` into `existing` changelog text.
///
/// `existing` of `None` or whitespace-only starts a new document, with the
/// default preamble when `create_preamble` is set.
pub fn merge_entry(
    existing: Option<&str>,
    notes: &ReleaseNotes,
    create_preamble: bool,
) -> MergedDocument {
    let mut document = ChangelogDocument::parse(existing.unwrap_or_default());

    if document.is_blank() {
        let line_ending = document.line_ending;
        document = if create_preamble {
            ChangelogDocument::parse(DEFAULT_PREAMBLE)
        } else {
            ChangelogDocument::default()
        };
        document.line_ending = line_ending;
    }

    let replaced_existing = document.remove_version(&notes.version);
    document.insert_entry(&notes.to_string());

    MergedDocument {
        content: document.render(),
        replaced_existing,
    }
}
