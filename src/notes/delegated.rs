use std::path::PathBuf;
use std::process::Command;

use crate::error::{ChangelogError, Result};
use crate::notes::NoteGenerator;
use crate::resolver::CommitRange;

/// Runs an external conventional-changelog generator and keeps its body
///
/// The tool writes to stdout; its own release heading is dropped because the
/// entry header is always rebuilt by the updater.
pub struct DelegatedGenerator {
    command: String,
    base_args: Vec<String>,
    workdir: PathBuf,
}

impl DelegatedGenerator {
    /// # Arguments
    /// * `command` - Program to run (e.g. `npx`)
    /// * `base_args` - Leading arguments (e.g. `["conventional-changelog"]`)
    /// * `workdir` - Project root; also where `.versionrc.json` / `package.json` are looked up
    pub fn new(command: impl Into<String>, base_args: Vec<String>, workdir: impl Into<PathBuf>) -> Self {
        DelegatedGenerator {
            command: command.into(),
            base_args,
            workdir: workdir.into(),
        }
    }

    /// Full argument list for a range.
    ///
    /// - `-p conventionalcommits` unless the project ships a `.versionrc.json`
    /// - `-k package.json` when the project has one
    /// - `--from/--to` for a range, `-r 0` for a first release
    pub fn build_args(&self, range: &CommitRange) -> Vec<String> {
        let mut args = self.base_args.clone();

        if !self.workdir.join(".versionrc.json").exists() {
            args.extend(["-p".to_string(), "conventionalcommits".to_string()]);
        }
        if self.workdir.join("package.json").exists() {
            args.extend(["-k".to_string(), "package.json".to_string()]);
        }

        match &range.from {
            Some(from) => args.extend([
                "--from".to_string(),
                from.name.clone(),
                "--to".to_string(),
                range.to.name.clone(),
            ]),
            None => args.extend(["-r".to_string(), "0".to_string()]),
        }

        args
    }

    fn command_line(&self, args: &[String]) -> String {
        std::iter::once(self.command.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Strips release headings from generator output and tidies blank lines.
///
/// Headings are `#` or `##` lines; `###` section titles are kept.
pub fn extract_body(output: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in output.lines() {
        let trimmed = line.trim_start();
        let is_release_heading = trimmed.starts_with("# ") || trimmed.starts_with("## ");
        if is_release_heading {
            continue;
        }

        let blank = line.trim().is_empty();
        let previous_blank = lines.last().map_or(true, |l| l.trim().is_empty());
        if blank && previous_blank {
            continue;
        }
        lines.push(line.trim_end());
    }

    lines.join("\n").trim().to_string()
}

impl NoteGenerator for DelegatedGenerator {
    fn describe(&self) -> String {
        self.command_line(&self.base_args)
    }

    fn generate(&self, range: &CommitRange) -> Result<String> {
        let args = self.build_args(range);
        let command_line = self.command_line(&args);
        tracing::info!("Running: {}", command_line);

        let output = Command::new(&self.command)
            .args(&args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| {
                ChangelogError::subprocess(format!("failed to run '{}': {}", command_line, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChangelogError::subprocess(format!(
                "'{}' exited with code {}: {}",
                command_line,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let body = extract_body(&String::from_utf8_lossy(&output.stdout));
        if body.is_empty() {
            return Err(ChangelogError::subprocess(format!(
                "'{}' produced no output",
                command_line
            )));
        }

        Ok(body)
    }
}
