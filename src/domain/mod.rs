//! Domain logic - pure changelog rules independent of git and the filesystem

pub mod commit;
pub mod document;
pub mod notes;
pub mod tag;

pub use commit::{CommitRecord, ParsedCommit};
pub use document::{merge_entry, ChangelogDocument, LineEnding, MergedDocument};
pub use notes::{group_commits, ChangeSection, GroupedChanges, ReleaseNotes, NO_NOTABLE_CHANGES};
pub use tag::{normalize_version, version_cmp, Tag};
