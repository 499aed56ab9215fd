pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod notes;
pub mod resolver;
pub mod store;
pub mod ui;

pub use error::{ChangelogError, Result};
