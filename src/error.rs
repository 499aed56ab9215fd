use thiserror::Error;

/// Unified error type for changelog-updater operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Subprocess failed: {0}")]
    Subprocess(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in changelog-updater
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        ChangelogError::NotFound(msg.into())
    }

    /// Create a subprocess error with context
    pub fn subprocess(msg: impl Into<String>) -> Self {
        ChangelogError::Subprocess(msg.into())
    }

    /// Whether a run can still produce an entry after this error.
    ///
    /// Only generator failures are recoverable; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChangelogError::Subprocess(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChangelogError::config("no release tag");
        assert_eq!(err.to_string(), "Configuration error: no release tag");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ChangelogError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_git2() {
        let err: ChangelogError = git2::Error::from_str("bad revwalk").into();
        assert_eq!(err.to_string(), "Git operation failed: bad revwalk");
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ChangelogError::config("x"), "Configuration error"),
            (ChangelogError::not_found("x"), "Not found"),
            (ChangelogError::subprocess("x"), "Subprocess failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_only_subprocess_errors_are_recoverable() {
        assert!(ChangelogError::subprocess("npx exited with 1").is_recoverable());
        assert!(!ChangelogError::config("missing tag").is_recoverable());
        assert!(!ChangelogError::not_found("v9.9.9").is_recoverable());
        assert!(!ChangelogError::Git(git2::Error::from_str("x")).is_recoverable());
    }
}
