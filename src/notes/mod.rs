//! Release note generation
//!
//! Two interchangeable strategies produce the markdown body of an entry:
//!
//! - [local::LocalFormatter] classifies commit subjects in-process
//! - [delegated::DelegatedGenerator] runs an external conventional-changelog tool
//!
//! Which one runs is decided by [crate::config::NoteStrategy]; a run never
//! uses both.

pub mod delegated;
pub mod local;

pub use delegated::DelegatedGenerator;
pub use local::LocalFormatter;

use crate::error::Result;
use crate::resolver::CommitRange;

/// Produces the body of a changelog entry for a commit range
pub trait NoteGenerator {
    /// Short human-readable name used in log output
    fn describe(&self) -> String;

    /// Markdown body without the version header.
    ///
    /// An empty string means there is nothing notable. A `Subprocess` error is
    /// recoverable: callers fall back to the placeholder body.
    fn generate(&self, range: &CommitRange) -> Result<String>;
}
