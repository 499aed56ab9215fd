use std::fmt;

/// Conditions at the edges of the tag history that do not stop a run.
/// These are reported to the user and recorded in the run outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The current tag is the earliest one; the whole history is used
    FirstRelease { tag: String },
    /// No commits between the previous and the current tag
    EmptyRange { previous_tag: String, tag: String },
    /// The external generator failed; the placeholder entry was used
    GeneratorFailed { reason: String },
    /// An entry for this version already existed and was replaced
    ReplacedEntry { version: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::FirstRelease { tag } => {
                write!(f, "No tag precedes '{}'; treating it as the first release", tag)
            }
            BoundaryWarning::EmptyRange { previous_tag, tag } => {
                write!(f, "No commits between '{}' and '{}'", previous_tag, tag)
            }
            BoundaryWarning::GeneratorFailed { reason } => {
                write!(
                    f,
                    "Changelog generator failed ({}); writing a 'no notable changes' entry",
                    reason
                )
            }
            BoundaryWarning::ReplacedEntry { version } => {
                write!(f, "Replaced existing changelog entry for {}", version)
            }
        }
    }
}
