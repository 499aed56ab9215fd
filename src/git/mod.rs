//! Git query abstraction layer
//!
//! The updater only ever reads from git: which tags exist, what commits lie
//! between two tags, and where the repository is hosted. Those questions are
//! captured by the [Repository] trait so the rest of the crate can be tested
//! without a checkout.
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory linear history for tests
//!
//! ```rust
//! # use changelog_updater::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> changelog_updater::Result<()> {
//! let commits = repo.commits_between(Some("v1.0.0"), "v1.1.0")?;
//! for commit in commits {
//!     println!("{} {}", commit.short_hash, commit.subject);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitRecord;
use crate::error::Result;

/// Read-only git operations needed to build a changelog entry
///
/// All methods return [crate::error::Result<T>]. Implementations map their
/// underlying failures to [crate::error::ChangelogError] variants.
pub trait Repository {
    /// Whether `refs/tags/<tag_name>` exists
    fn tag_exists(&self, tag_name: &str) -> Result<bool>;

    /// All tag names, in no particular order
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Commits reachable from `to` but not from `from`, oldest first.
    ///
    /// With `from` of `None` the whole history behind `to` is returned.
    fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitRecord>>;

    /// Fetch URL of the named remote, if configured
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;
}

/// Turns a git remote URL into an https base URL for commit links.
///
/// Handles `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// `https://host/owner/repo(.git)`. Other schemes (local paths, `file://`)
/// yield `None`.
pub fn web_url_from_remote(remote_url: &str) -> Option<String> {
    let url = remote_url.trim().trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);

    let (host, path) = if let Some(rest) = url.strip_prefix("https://") {
        rest.split_once('/')?
    } else if let Some(rest) = url.strip_prefix("http://") {
        rest.split_once('/')?
    } else if let Some(rest) = url.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map_or(rest, |(_, r)| r);
        rest.split_once('/')?
    } else if let Some((user_host, path)) = url.split_once(':') {
        if user_host.contains('/') || path.starts_with("//") {
            return None;
        }
        let host = user_host.split_once('@').map_or(user_host, |(_, h)| h);
        (host, path)
    } else {
        return None;
    };

    // ssh://host:port/path keeps the port on the host; the web UI does not use it
    let host = host.split_once(':').map_or(host, |(h, _)| h);
    let host = host.split_once('@').map_or(host, |(_, h)| h);

    if host.is_empty() || path.is_empty() {
        return None;
    }

    Some(format!("https://{}/{}", host, path))
}

/// Picks a base URL for commit links.
///
/// Order: explicit configuration, the GitHub Actions environment
/// (`GITHUB_SERVER_URL` + `GITHUB_REPOSITORY`), then the `origin` remote.
pub fn resolve_repository_url<R, F>(repo: &R, configured: Option<&str>, lookup: F) -> Option<String>
where
    R: Repository + ?Sized,
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = configured.filter(|u| !u.trim().is_empty()) {
        return Some(url.trim().trim_end_matches('/').to_string());
    }

    if let Some(repository) = lookup("GITHUB_REPOSITORY").filter(|r| !r.is_empty()) {
        let server = lookup("GITHUB_SERVER_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "https://github.com".to_string());
        return Some(format!("{}/{}", server.trim_end_matches('/'), repository));
    }

    match repo.remote_url("origin") {
        Ok(Some(url)) => web_url_from_remote(&url),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!("could not read origin remote: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_url_from_scp_style() {
        assert_eq!(
            web_url_from_remote("git@github.com:acme/widgets.git"),
            Some("https://github.com/acme/widgets".to_string())
        );
    }

    #[test]
    fn test_web_url_from_https() {
        assert_eq!(
            web_url_from_remote("https://gitlab.com/acme/tools/widgets.git"),
            Some("https://gitlab.com/acme/tools/widgets".to_string())
        );
        assert_eq!(
            web_url_from_remote("https://github.com/acme/widgets/"),
            Some("https://github.com/acme/widgets".to_string())
        );
    }

    #[test]
    fn test_web_url_from_ssh_scheme() {
        assert_eq!(
            web_url_from_remote("ssh://git@git.example.com:2222/acme/widgets.git"),
            Some("https://git.example.com/acme/widgets".to_string())
        );
    }

    #[test]
    fn test_web_url_from_local_path() {
        assert_eq!(web_url_from_remote("/srv/git/widgets.git"), None);
        assert_eq!(web_url_from_remote("file:///srv/git/widgets.git"), None);
    }

    #[test]
    fn test_configured_url_wins() {
        let repo = MockRepository::new().with_remote("origin", "git@github.com:acme/other.git");
        let url = resolve_repository_url(&repo, Some("https://example.com/acme/w/"), |_| {
            Some("ignored".to_string())
        });
        assert_eq!(url.as_deref(), Some("https://example.com/acme/w"));
    }

    #[test]
    fn test_github_env_before_remote() {
        let repo = MockRepository::new().with_remote("origin", "git@github.com:acme/other.git");
        let url = resolve_repository_url(&repo, None, |k| match k {
            "GITHUB_REPOSITORY" => Some("acme/widgets".to_string()),
            _ => None,
        });
        assert_eq!(url.as_deref(), Some("https://github.com/acme/widgets"));
    }

    #[test]
    fn test_falls_back_to_origin() {
        let repo = MockRepository::new().with_remote("origin", "git@github.com:acme/other.git");
        let url = resolve_repository_url(&repo, None, |_| None);
        assert_eq!(url.as_deref(), Some("https://github.com/acme/other"));
    }

    #[test]
    fn test_no_url_available() {
        let repo = MockRepository::new();
        assert_eq!(resolve_repository_url(&repo, None, |_| None), None);
    }
}
