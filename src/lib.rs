//! dirsort - sort the files of a directory into category folders
//!
//! This library classifies files by extension against a fixed category table,
//! provisions one folder per category, and moves (or, in a dry run, only
//! reports) each direct child file into its folder. Optional TOML filter rules
//! keep selected files out of the run.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod summary;

pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use file_category::{Category, FileMapper};
pub use file_organizer::{
    FileOrganizer, OrganizationResult, OrganizeError, OrganizeEvent, OrganizeObserver,
};
pub use summary::Summary;

pub use cli::{OrganizeCommand, OutputMode, run_cli};
