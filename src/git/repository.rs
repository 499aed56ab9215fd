use crate::domain::CommitRecord;
use crate::error::{ChangelogError, Result};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree, `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Peel a tag (lightweight or annotated) to the commit it marks
    fn tag_commit_oid(&self, tag_name: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| {
                if e.code() == git2::ErrorCode::NotFound {
                    ChangelogError::not_found(format!("Tag {} does not exist", tag_name))
                } else {
                    ChangelogError::Git(e)
                }
            })?;

        Ok(reference.peel_to_commit()?.id())
    }
}

impl super::Repository for Git2Repository {
    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            // Names git refuses as ref names cannot be tags either
            Err(e) if e.code() == git2::ErrorCode::InvalidSpec => Ok(false),
            Err(e) => Err(ChangelogError::Git(e)),
        }
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitRecord>> {
        let to_oid = self.tag_commit_oid(to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;
        revwalk.push(to_oid)?;

        if let Some(from) = from {
            revwalk.hide(self.tag_commit_oid(from)?)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let subject = commit.summary().unwrap_or("(empty message)").to_string();

            commits.push(CommitRecord::new(subject, oid.to_string()));
        }

        Ok(commits)
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(ChangelogError::Git(e)),
        }
    }
}
