use regex::Regex;
use std::sync::OnceLock;

/// One commit in the resolved range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub subject: String,
    pub short_hash: String,
    pub full_hash: String,
}

impl CommitRecord {
    /// Build a record from a full hash, abbreviating it to seven characters
    pub fn new(subject: impl Into<String>, full_hash: impl Into<String>) -> Self {
        let full_hash = full_hash.into();
        let short_hash = full_hash.chars().take(7).collect();
        CommitRecord {
            subject: subject.into(),
            short_hash,
            full_hash,
        }
    }

    /// Whether the subject is one git writes for merges
    pub fn is_merge(&self) -> bool {
        self.subject.starts_with("Merge ")
    }

    /// Markdown link to the commit, or the bare short hash when no base URL is known
    pub fn link(&self, repository_url: Option<&str>) -> String {
        match repository_url {
            Some(base) => format!(
                "[{}]({}/commit/{})",
                self.short_hash,
                base.trim_end_matches('/'),
                self.full_hash
            ),
            None => self.short_hash.clone(),
        }
    }
}

/// Parsed representation of a conventional commit subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    /// `None` for subjects that do not follow the convention
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub description: String,
}

fn conventional_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z]+)(?:\(([^)]*)\))?!?:\s*(.*)$")
            .expect("conventional commit pattern is valid")
    })
}

impl ParsedCommit {
    /// Parse a commit subject according to conventional commits
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    /// - non-conventional text
    ///
    /// The `!` marker is accepted; breaking changes land in their type's section.
    pub fn parse(subject: &str) -> Self {
        let subject = subject.trim();

        if let Some(captures) = conventional_regex().captures(subject) {
            let r#type = captures.get(1).map(|m| m.as_str().to_lowercase());
            let scope = captures
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty());
            let description = captures
                .get(3)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();

            if !description.is_empty() {
                return ParsedCommit {
                    r#type,
                    scope,
                    description,
                };
            }
        }

        ParsedCommit {
            r#type: None,
            scope: None,
            description: subject.to_string(),
        }
    }

    /// Render as a changelog bullet
    pub fn bullet(&self, link: &str) -> String {
        match &self.scope {
            Some(scope) => format!("* **{}:** {} ({})", scope, self.description, link),
            None => format!("* {} ({})", self.description, link),
        }
    }
}
