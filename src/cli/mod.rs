//! Command-line workflow: argument types and stage orchestration

pub mod orchestration;

pub use orchestration::{
    build_generator, entry_date, ChangelogUpdater, RunStage, UpdateOutcome, UpdateWorkflowArgs,
};
