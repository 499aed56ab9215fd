//! Tag and commit-range resolution.
//!
//! The predecessor of a release tag is its neighbour in the descending
//! version-sorted tag list. There is no positional fallback: a tag missing
//! from the listing is an error.

use crate::domain::tag::{sort_descending, Tag};
use crate::domain::CommitRecord;
use crate::error::{ChangelogError, Result};
use crate::git::Repository;

/// The release tag and the one before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTags {
    pub current: Tag,
    /// `None` for a first release
    pub previous: Option<Tag>,
}

impl ResolvedTags {
    pub fn is_first_release(&self) -> bool {
        self.previous.is_none()
    }
}

/// Commits that make up one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub from: Option<Tag>,
    pub to: Tag,
    /// Oldest first
    pub commits: Vec<CommitRecord>,
}

impl CommitRange {
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Finds `tag_name` and its predecessor.
///
/// # Errors
/// * `NotFound` - the tag does not exist, or is missing from the tag listing
pub fn resolve_tags<R: Repository + ?Sized>(repo: &R, tag_name: &str) -> Result<ResolvedTags> {
    if !repo.tag_exists(tag_name)? {
        return Err(ChangelogError::not_found(format!(
            "Tag {} does not exist in the repository.",
            tag_name
        )));
    }

    let mut tags = repo.list_tags()?;
    sort_descending(&mut tags);
    tracing::debug!(count = tags.len(), "listed tags");

    let index = tags.iter().position(|t| t == tag_name).ok_or_else(|| {
        ChangelogError::not_found(format!("Current tag {} not found in tag list.", tag_name))
    })?;

    Ok(ResolvedTags {
        current: Tag::new(tag_name),
        previous: tags.get(index + 1).map(Tag::new),
    })
}

/// Lists the commits between the resolved tags.
///
/// A first release covers the whole history behind the current tag.
/// History walk failures are fatal.
pub fn resolve_range<R: Repository + ?Sized>(repo: &R, tags: &ResolvedTags) -> Result<CommitRange> {
    let from = tags.previous.as_ref().map(|t| t.name.as_str());
    let commits = repo.commits_between(from, &tags.current.name)?;

    Ok(CommitRange {
        from: tags.previous.clone(),
        to: tags.current.clone(),
        commits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn tagged_repo(tags: &[&str]) -> MockRepository {
        let mut repo = MockRepository::new();
        for tag in tags {
            repo.commit(&format!("chore: prepare {}", tag));
            repo.tag(*tag);
        }
        repo
    }

    #[test]
    fn test_previous_is_next_lower_version() {
        let repo = tagged_repo(&["v1.2.0", "v1.10.0", "v1.9.0", "v0.1.0"]);
        let resolved = resolve_tags(&repo, "v1.10.0").unwrap();
        assert_eq!(resolved.previous, Some(Tag::new("v1.9.0")));

        let resolved = resolve_tags(&repo, "v1.9.0").unwrap();
        assert_eq!(resolved.previous, Some(Tag::new("v1.2.0")));
    }

    #[test]
    fn test_every_tag_predecessor_follows_sort_order() {
        let names = ["v0.1.0", "v0.2.0", "v0.10.0", "v1.0.0", "v1.0.1"];
        let repo = tagged_repo(&names);
        for window in names.windows(2) {
            let resolved = resolve_tags(&repo, window[1]).unwrap();
            assert_eq!(resolved.previous, Some(Tag::new(window[0])));
        }
        assert!(resolve_tags(&repo, "v0.1.0").unwrap().is_first_release());
    }

    #[test]
    fn test_only_tag_is_first_release() {
        let repo = tagged_repo(&["v0.1.0"]);
        let resolved = resolve_tags(&repo, "v0.1.0").unwrap();
        assert!(resolved.is_first_release());
        assert_eq!(resolved.current.name, "v0.1.0");
    }

    #[test]
    fn test_missing_tag_is_not_found() {
        let repo = tagged_repo(&["v0.1.0"]);
        let err = resolve_tags(&repo, "v0.2.0").unwrap_err();
        assert!(matches!(err, ChangelogError::NotFound(_)));
        assert!(err.to_string().contains("v0.2.0"));
    }

    #[test]
    fn test_range_between_tags() {
        let mut repo = MockRepository::new();
        repo.commit("feat: a");
        repo.tag("v0.1.0");
        repo.commit("fix: b");
        repo.commit("feat: c");
        repo.tag("v0.2.0");

        let tags = resolve_tags(&repo, "v0.2.0").unwrap();
        let range = resolve_range(&repo, &tags).unwrap();
        let subjects: Vec<_> = range.commits.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, vec!["fix: b", "feat: c"]);
        assert_eq!(range.from, Some(Tag::new("v0.1.0")));
    }

    #[test]
    fn test_first_release_range_is_full_history() {
        let mut repo = MockRepository::new();
        repo.commit("feat: a");
        repo.commit("fix: b");
        repo.tag("v0.1.0");

        let tags = resolve_tags(&repo, "v0.1.0").unwrap();
        let range = resolve_range(&repo, &tags).unwrap();
        assert_eq!(range.commits.len(), 2);
        assert_eq!(range.from, None);
    }

    #[test]
    fn test_two_tags_on_one_commit_give_empty_range() {
        let mut repo = MockRepository::new();
        repo.commit("feat: a");
        repo.tag("v0.1.0");
        repo.tag("v0.1.1");

        let tags = resolve_tags(&repo, "v0.1.1").unwrap();
        let range = resolve_range(&repo, &tags).unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn test_history_failure_is_fatal() {
        let repo = tagged_repo(&["v0.1.0"]).fail_history();
        let tags = resolve_tags(&repo, "v0.1.0").unwrap();
        assert!(matches!(
            resolve_range(&repo, &tags),
            Err(ChangelogError::Git(_))
        ));
    }
}
