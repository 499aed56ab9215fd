use crate::config::ClassificationConfig;
use crate::domain::notes::group_commits;
use crate::error::Result;
use crate::notes::NoteGenerator;
use crate::resolver::CommitRange;

/// Groups commits into Features / Bug Fixes / Other by conventional-commit type
pub struct LocalFormatter {
    rules: ClassificationConfig,
    repository_url: Option<String>,
}

impl LocalFormatter {
    pub fn new(rules: ClassificationConfig, repository_url: Option<String>) -> Self {
        LocalFormatter {
            rules,
            repository_url,
        }
    }
}

impl NoteGenerator for LocalFormatter {
    fn describe(&self) -> String {
        "local commit classification".to_string()
    }

    fn generate(&self, range: &CommitRange) -> Result<String> {
        let grouped = group_commits(&range.commits, &self.rules, self.repository_url.as_deref());
        tracing::debug!(
            features = grouped.features.len(),
            fixes = grouped.bug_fixes.len(),
            other = grouped.other.len(),
            "classified commits"
        );
        Ok(grouped.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommitRecord, Tag, NO_NOTABLE_CHANGES};

    fn range(subjects: &[&str]) -> CommitRange {
        CommitRange {
            from: Some(Tag::new("v1.0.0")),
            to: Tag::new("v1.1.0"),
            commits: subjects
                .iter()
                .map(|s| CommitRecord::new(*s, "1234567890abcdef1234567890abcdef12345678"))
                .collect(),
        }
    }

    #[test]
    fn test_local_formatter_sections() {
        let formatter = LocalFormatter::new(
            ClassificationConfig::default(),
            Some("https://github.com/acme/widgets".to_string()),
        );
        let body = formatter
            .generate(&range(&["feat(api): add X", "fix: bug Y", "Merge branch 'x'"]))
            .unwrap();

        let link = "[1234567](https://github.com/acme/widgets/commit/1234567890abcdef1234567890abcdef12345678)";
        assert_eq!(
            body,
            format!(
                "### Features\n\n* **api:** add X ({link})\n\n### Bug Fixes\n\n* bug Y ({link})"
            )
        );
    }

    #[test]
    fn test_local_formatter_empty_range() {
        let formatter = LocalFormatter::new(ClassificationConfig::default(), None);
        assert_eq!(formatter.generate(&range(&[])).unwrap(), NO_NOTABLE_CHANGES);
    }
}
