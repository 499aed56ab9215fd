//! User interface module - console output for CI logs.
//!
//! There are no prompts: the updater runs unattended. Everything here is
//! formatting, kept in `formatter` so the strings can be unit tested.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_entry_preview, display_error, display_range_summary,
    display_status, display_success,
};
