use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChangelogError, Result};

/// Environment variables consulted for the release tag, in priority order.
pub const TAG_ENV_VARS: [&str; 2] = ["GITHUB_REF_NAME", "RELEASE_TAG"];

const CONFIG_FILE_NAME: &str = "changelog-updater.toml";

/// Represents the complete configuration for changelog-updater.
///
/// Contains the changelog file settings, the note generation strategy and
/// the commit classification rules used by the local formatter.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub classification: ClassificationConfig,
}

/// Where the changelog lives and how a fresh one is started.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_path")]
    pub path: PathBuf,

    #[serde(default = "default_true")]
    pub create_preamble: bool,
}

fn default_changelog_path() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_true() -> bool {
    true
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            path: default_changelog_path(),
            create_preamble: true,
        }
    }
}

/// How release notes are produced.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NoteStrategy {
    /// Classify commit subjects in-process
    #[default]
    Local,
    /// Shell out to a conventional-commits changelog generator
    Delegated,
}

/// Configuration for note generation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesConfig {
    #[serde(default)]
    pub strategy: NoteStrategy,

    /// Base URL used for commit links, e.g. `https://github.com/owner/repo`
    #[serde(default)]
    pub repository_url: Option<String>,

    #[serde(default = "default_generator_command")]
    pub generator_command: String,

    #[serde(default = "default_generator_args")]
    pub generator_args: Vec<String>,
}

fn default_generator_command() -> String {
    "npx".to_string()
}

fn default_generator_args() -> Vec<String> {
    vec!["conventional-changelog".to_string()]
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            strategy: NoteStrategy::default(),
            repository_url: None,
            generator_command: default_generator_command(),
            generator_args: default_generator_args(),
        }
    }
}

/// Returns the default commit types grouped under "Features".
fn default_feature_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default commit types grouped under "Bug Fixes".
fn default_fix_types() -> Vec<String> {
    vec!["fix".to_string()]
}

/// Returns the default subject markers of changelog maintenance commits.
fn default_skip_markers() -> Vec<String> {
    vec![
        "chore(release)".to_string(),
        "[skip changelog]".to_string(),
        "update changelog".to_string(),
    ]
}

/// Configuration for local commit classification.
///
/// Types are matched exactly against the conventional-commit type token.
/// Skip markers are matched case-insensitively anywhere in the subject.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassificationConfig {
    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,

    #[serde(default = "default_fix_types")]
    pub fix_types: Vec<String>,

    #[serde(default = "default_skip_markers")]
    pub skip_markers: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        ClassificationConfig {
            feature_types: default_feature_types(),
            fix_types: default_fix_types(),
            skip_markers: default_skip_markers(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog-updater.toml` in current directory
/// 3. `.changelog-updater.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML configuration document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ChangelogError::config(format!("invalid config: {}", e)))
}

/// Picks the release tag: an explicit value first, then the environment.
///
/// `lookup` is consulted for each of [`TAG_ENV_VARS`] in order; the first
/// non-empty value wins.
pub fn resolve_release_tag<F>(explicit: Option<&str>, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(tag) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(tag.to_string());
    }

    TAG_ENV_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .ok_or_else(|| {
            ChangelogError::config(
                "No current tag provided. Set GITHUB_REF_NAME or RELEASE_TAG environment variable.",
            )
        })
}

/// Reads the release tag from the process environment.
pub fn release_tag_from_env(explicit: Option<&str>) -> Result<String> {
    resolve_release_tag(explicit, |var| std::env::var(var).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_github_ref_name_wins() {
        let env = env_of(&[("GITHUB_REF_NAME", "v1.2.0"), ("RELEASE_TAG", "v0.9.0")]);
        let tag = resolve_release_tag(None, |k| env.get(k).cloned()).unwrap();
        assert_eq!(tag, "v1.2.0");
    }

    #[test]
    fn test_empty_github_ref_name_falls_through() {
        let env = env_of(&[("GITHUB_REF_NAME", ""), ("RELEASE_TAG", "v0.9.0")]);
        let tag = resolve_release_tag(None, |k| env.get(k).cloned()).unwrap();
        assert_eq!(tag, "v0.9.0");
    }

    #[test]
    fn test_explicit_tag_overrides_env() {
        let env = env_of(&[("GITHUB_REF_NAME", "v1.2.0")]);
        let tag = resolve_release_tag(Some("v2.0.0"), |k| env.get(k).cloned()).unwrap();
        assert_eq!(tag, "v2.0.0");
    }

    #[test]
    fn test_missing_tag_is_config_error() {
        let err = resolve_release_tag(None, |_| None).unwrap_err();
        assert!(matches!(err, ChangelogError::Config(_)));
        assert!(err.to_string().contains("GITHUB_REF_NAME"));
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
[notes]
strategy = "delegated"
"#,
        )
        .unwrap();
        assert_eq!(config.notes.strategy, NoteStrategy::Delegated);
        assert_eq!(config.notes.generator_command, "npx");
        assert_eq!(config.changelog.path, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.classification.feature_types, vec!["feat"]);
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = parse_config("[notes]\nstrategy = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ChangelogError::Config(_)));
    }
}
