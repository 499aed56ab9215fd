//! Main workflow orchestration logic
//!
//! One run walks a fixed sequence of stages:
//! `Start → TagResolved → RangeResolved → NotesFormatted → DocumentMerged → Done`.
//! Any unrecoverable error moves the run to `Failed` and is returned to the
//! caller. Git access, note generation and the changelog file are all passed
//! in, so the workflow can run against mocks.

use chrono::{NaiveDate, Utc};
use std::path::Path;

use crate::boundary::BoundaryWarning;
use crate::config::{Config, NoteStrategy};
use crate::domain::{merge_entry, ReleaseNotes};
use crate::error::Result;
use crate::git::{resolve_repository_url, Repository};
use crate::notes::{DelegatedGenerator, LocalFormatter, NoteGenerator};
use crate::resolver::{resolve_range, resolve_tags, CommitRange, ResolvedTags};
use crate::store::DocumentStore;

/// Arguments for one changelog update
///
/// Decoupled from clap so the workflow can be called programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateWorkflowArgs {
    /// Release tag to document, e.g. `v1.2.0`
    pub tag: String,

    /// Date written into the entry header
    pub date: NaiveDate,

    /// Build the entry but leave the changelog untouched
    pub dry_run: bool,

    /// Fabricate a title/preamble when the changelog is empty
    pub create_preamble: bool,
}

/// Progress of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    TagResolved,
    RangeResolved,
    NotesFormatted,
    DocumentMerged,
    Done,
    Failed,
}

/// Result of a successful update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Normalized version of the entry
    pub version: String,

    /// Commits the entry was built from
    pub range: CommitRange,

    /// Rendered entry, header included
    pub entry: String,

    /// Whether an older entry for the same version was replaced
    pub replaced_existing: bool,

    /// Whether the changelog was written
    pub written: bool,

    /// Non-fatal conditions met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Runs the resolve → format → merge pipeline for one tag
pub struct ChangelogUpdater<'a, R: ?Sized, S: ?Sized> {
    repo: &'a R,
    store: &'a S,
    generator: &'a dyn NoteGenerator,
    stage: RunStage,
    warnings: Vec<BoundaryWarning>,
}

impl<'a, R, S> ChangelogUpdater<'a, R, S>
where
    R: Repository + ?Sized,
    S: DocumentStore + ?Sized,
{
    pub fn new(repo: &'a R, store: &'a S, generator: &'a dyn NoteGenerator) -> Self {
        ChangelogUpdater {
            repo,
            store,
            generator,
            stage: RunStage::Start,
            warnings: Vec::new(),
        }
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    /// Run every stage; on error the updater is left in [RunStage::Failed].
    pub fn run(&mut self, args: &UpdateWorkflowArgs) -> Result<UpdateOutcome> {
        self.stage = RunStage::Start;
        self.warnings.clear();

        match self.run_stages(args) {
            Ok(outcome) => {
                self.stage = RunStage::Done;
                Ok(outcome)
            }
            Err(e) => {
                self.stage = RunStage::Failed;
                Err(e)
            }
        }
    }

    fn run_stages(&mut self, args: &UpdateWorkflowArgs) -> Result<UpdateOutcome> {
        let tags = resolve_tags(self.repo, &args.tag)?;
        tracing::info!(
            current = %tags.current,
            previous = tags.previous.as_ref().map(|t| t.name.as_str()).unwrap_or("none"),
            "resolved tags"
        );
        if tags.is_first_release() {
            self.warn(BoundaryWarning::FirstRelease {
                tag: tags.current.name.clone(),
            });
        }
        self.stage = RunStage::TagResolved;

        let range = resolve_range(self.repo, &tags)?;
        tracing::info!(commits = range.commits.len(), "resolved commit range");
        if let Some(previous) = tags.previous.as_ref().filter(|_| range.is_empty()) {
            self.warn(BoundaryWarning::EmptyRange {
                previous_tag: previous.name.clone(),
                tag: tags.current.name.clone(),
            });
        }
        self.stage = RunStage::RangeResolved;

        let notes = self.format_notes(&tags, &range, args.date)?;
        self.stage = RunStage::NotesFormatted;

        let existing = self.store.read()?;
        let merged = merge_entry(existing.as_deref(), &notes, args.create_preamble);
        if merged.replaced_existing {
            self.warn(BoundaryWarning::ReplacedEntry {
                version: notes.version.clone(),
            });
        }

        if args.dry_run {
            tracing::info!("dry run: changelog left untouched");
        } else {
            self.store.write(&merged.content)?;
        }
        self.stage = RunStage::DocumentMerged;

        Ok(UpdateOutcome {
            version: notes.version.clone(),
            range,
            entry: notes.to_string(),
            replaced_existing: merged.replaced_existing,
            written: !args.dry_run,
            warnings: self.warnings.clone(),
        })
    }

    fn format_notes(
        &mut self,
        tags: &ResolvedTags,
        range: &CommitRange,
        date: NaiveDate,
    ) -> Result<ReleaseNotes> {
        let version = tags.current.version_part().to_string();

        match self.generator.generate(range) {
            Ok(body) => Ok(ReleaseNotes::new(version, date, body)),
            Err(e) if e.is_recoverable() => {
                tracing::warn!(generator = %self.generator.describe(), "{}", e);
                self.warn(BoundaryWarning::GeneratorFailed {
                    reason: e.to_string(),
                });
                Ok(ReleaseNotes::placeholder(version, date))
            }
            Err(e) => Err(e),
        }
    }

    fn warn(&mut self, warning: BoundaryWarning) {
        tracing::debug!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Date for the entry header: `explicit`, or today's UTC date.
pub fn entry_date(explicit: Option<NaiveDate>) -> NaiveDate {
    explicit.unwrap_or_else(|| Utc::now().date_naive())
}

/// Builds the note generator selected by `strategy`.
///
/// `workdir` is the project root the external generator runs in; `lookup`
/// reads environment variables for the commit-link base URL.
pub fn build_generator<R, F>(
    strategy: NoteStrategy,
    config: &Config,
    repo: &R,
    workdir: &Path,
    lookup: F,
) -> Box<dyn NoteGenerator>
where
    R: Repository + ?Sized,
    F: Fn(&str) -> Option<String>,
{
    match strategy {
        NoteStrategy::Local => {
            let url = resolve_repository_url(repo, config.notes.repository_url.as_deref(), lookup);
            tracing::debug!(repository_url = url.as_deref().unwrap_or("none"), "commit links");
            Box::new(LocalFormatter::new(config.classification.clone(), url))
        }
        NoteStrategy::Delegated => Box::new(DelegatedGenerator::new(
            config.notes.generator_command.clone(),
            config.notes.generator_args.clone(),
            workdir,
        )),
    }
}
