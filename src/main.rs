use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use changelog_updater::cli::{build_generator, entry_date, ChangelogUpdater, UpdateWorkflowArgs};
use changelog_updater::config::{self, NoteStrategy};
use changelog_updater::git::Git2Repository;
use changelog_updater::store::FileStore;
use changelog_updater::ui;

#[derive(clap::Parser)]
#[command(
    name = "changelog-updater",
    version,
    about = "Write the CHANGELOG.md entry for a release tag from its git history"
)]
struct Args {
    #[arg(
        short,
        long,
        help = "Release tag to document (defaults to $GITHUB_REF_NAME, then $RELEASE_TAG)"
    )]
    tag: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Changelog file to update (default: CHANGELOG.md)")]
    changelog: Option<PathBuf>,

    #[arg(long, value_enum, help = "How release notes are produced")]
    strategy: Option<NoteStrategy>,

    #[arg(long, help = "Entry date as YYYY-MM-DD (default: today, UTC)")]
    date: Option<NaiveDate>,

    #[arg(
        long,
        help = "Path inside the git repository (default: current directory); the generator runs in its work tree"
    )]
    repo: Option<PathBuf>,

    #[arg(long, help = "Print the entry without writing the changelog")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // Resolve the tag first so a missing input fails before anything is touched
    let tag = config::release_tag_from_env(args.tag.as_deref())?;
    ui::display_status(&format!("Processing changelog for tag: {}", tag));

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let strategy = args.strategy.unwrap_or(config.notes.strategy);
    let changelog_path = args
        .changelog
        .clone()
        .unwrap_or_else(|| config.changelog.path.clone());

    let repo_path = args.repo.as_deref().unwrap_or(Path::new("."));
    let repo = Git2Repository::open(repo_path).context("Git repository error")?;
    let workdir = match &args.repo {
        Some(path) => repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("Repository at {} has no working tree", path.display()))?,
        None => std::env::current_dir().context("Cannot determine working directory")?,
    };
    let generator = build_generator(strategy, &config, &repo, &workdir, |var| {
        std::env::var(var).ok()
    });
    tracing::debug!(generator = %generator.describe(), "selected note generator");

    let store = FileStore::new(&changelog_path);
    let workflow_args = UpdateWorkflowArgs {
        tag,
        date: entry_date(args.date),
        dry_run: args.dry_run,
        create_preamble: config.changelog.create_preamble,
    };

    let mut updater = ChangelogUpdater::new(&repo, &store, generator.as_ref());
    let outcome = updater.run(&workflow_args)?;

    ui::display_range_summary(&outcome.range);
    for warning in &outcome.warnings {
        ui::display_boundary_warning(warning);
    }

    if outcome.written {
        ui::display_success(&format!(
            "{} updated with {} ({} commits)",
            store.path().display(),
            outcome.version,
            outcome.range.commits.len()
        ));
    } else {
        ui::display_entry_preview(&outcome.entry);
        ui::display_status("Dry run: changelog not modified");
    }

    Ok(())
}
