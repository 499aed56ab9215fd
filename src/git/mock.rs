use crate::domain::CommitRecord;
use crate::error::{ChangelogError, Result};
use crate::git::Repository;
use std::collections::HashMap;

/// Mock repository holding a single linear history
///
/// Commits are stored oldest first; a tag points at an index into that list.
pub struct MockRepository {
    commits: Vec<CommitRecord>,
    tags: HashMap<String, usize>,
    remotes: HashMap<String, String>,
    fail_history: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: HashMap::new(),
            remotes: HashMap::new(),
            fail_history: false,
        }
    }

    /// Append a commit with a generated hash and return that hash
    pub fn commit(&mut self, subject: &str) -> String {
        let index = self.commits.len();
        let full_hash = format!("{:07x}{:033x}", 0xabc0000 + index, index);
        self.commits.push(CommitRecord::new(subject, full_hash.clone()));
        full_hash
    }

    /// Tag the most recent commit
    pub fn tag(&mut self, name: impl Into<String>) {
        let index = self.commits.len().saturating_sub(1);
        self.tags.insert(name.into(), index);
    }

    pub fn with_remote(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.remotes.insert(name.into(), url.into());
        self
    }

    /// Make history walks fail, as a corrupt repository would
    pub fn fail_history(mut self) -> Self {
        self.fail_history = true;
        self
    }

    fn tag_index(&self, tag_name: &str) -> Result<usize> {
        self.tags
            .get(tag_name)
            .copied()
            .ok_or_else(|| ChangelogError::not_found(format!("Tag {} does not exist", tag_name)))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        Ok(self.tags.contains_key(tag_name))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.keys().cloned().collect())
    }

    fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitRecord>> {
        if self.fail_history {
            return Err(git2::Error::from_str("object not found - no match for id").into());
        }
        if self.commits.is_empty() {
            return Ok(Vec::new());
        }

        let end = self.tag_index(to)?;
        let start = match from {
            Some(tag) => self.tag_index(tag)? + 1,
            None => 0,
        };

        if start > end {
            return Ok(Vec::new());
        }
        Ok(self.commits[start..=end].to_vec())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        Ok(self.remotes.get(remote).cloned())
    }
}
