//! Pure formatting functions for UI output.
//!
//! Styling goes through `console`, which drops colors when the output is not
//! a terminal (e.g. redirected CI logs).

use console::style;

use crate::boundary::BoundaryWarning;
use crate::resolver::CommitRange;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One-line description of a commit range, e.g. `3 commits in v1.0.0..v1.1.0`.
pub fn range_summary(range: &CommitRange) -> String {
    let noun = if range.commits.len() == 1 {
        "commit"
    } else {
        "commits"
    };
    match &range.from {
        Some(from) => format!(
            "{} {} in {}..{}",
            range.commits.len(),
            noun,
            from,
            range.to
        ),
        None => format!(
            "{} {} up to {} (first release)",
            range.commits.len(),
            noun,
            range.to
        ),
    }
}

/// Display the commit range and up to 10 of its subjects.
pub fn display_range_summary(range: &CommitRange) {
    display_status(&range_summary(range));

    for (i, commit) in range.commits.iter().take(10).enumerate() {
        let subject: String = commit.subject.chars().take(60).collect();
        println!("  {}. {} {}", i + 1, style(&commit.short_hash).dim(), subject);
    }

    if range.commits.len() > 10 {
        println!("  ... and {} more commits", range.commits.len() - 10);
    }
}

/// Print a rendered entry, used by dry runs.
pub fn display_entry_preview(entry: &str) {
    println!("\n{}", style("Changelog entry:").bold());
    println!("{}\n", entry);
}
