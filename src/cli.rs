//! Command-line interface module for dirsort.
//!
//! This module wires configuration, the organizer and console output together:
//! - Filter configuration loading
//! - Folder-only provisioning
//! - Organization and dry runs
//! - Summary reporting (human readable or JSON)

use crate::config::FilterConfig;
use crate::file_organizer::{FileOrganizer, Silent};
use crate::output::{ConsoleObserver, OutputFormatter};
use crate::summary::{Summary, file_count};
use std::path::Path;

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Organize files in a directory.
    Organize {
        /// If true, report what would happen without touching the filesystem.
        dry_run: bool,
    },
    /// Only create the category folders.
    CreateFolders,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Colored progress lines and a summary block.
    #[default]
    Human,
    /// No progress lines; the summary is printed as JSON.
    Json,
}

/// Runs the CLI application with the given command and directory path.
///
/// # Examples
///
/// ```no_run
/// use dirsort::cli::{run_cli, OrganizeCommand};
/// use std::path::Path;
///
/// let result = run_cli(OrganizeCommand::Organize { dry_run: true }, Path::new("/path/to/directory"));
/// if let Err(e) = result {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(command: OrganizeCommand, dir_path: &Path) -> Result<(), String> {
    run_cli_with_config(command, dir_path, None, OutputMode::Human)
}

/// Runs the CLI application with an optional configuration file.
///
/// Per-file move failures are reported but do not make this return an error;
/// only failures that stop the whole run do.
pub fn run_cli_with_config(
    command: OrganizeCommand,
    dir_path: &Path,
    config_path: Option<&Path>,
    output: OutputMode,
) -> Result<(), String> {
    match command {
        OrganizeCommand::CreateFolders => create_folders(dir_path, output),
        OrganizeCommand::Organize { dry_run } => {
            organize_directory(dir_path, config_path, dry_run, output)
        }
    }
}

fn create_folders(base_path: &Path, output: OutputMode) -> Result<(), String> {
    let organizer = FileOrganizer::new(base_path);

    match output {
        OutputMode::Human => {
            organizer
                .create_category_folders(&mut ConsoleObserver::new())
                .map_err(|e| e.to_string())?;
            OutputFormatter::success("Category folders created successfully!");
        }
        OutputMode::Json => {
            organizer
                .create_category_folders(&mut Silent)
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}

/// Organizes (or simulates organizing) a directory and prints the summary.
pub fn organize_directory(
    base_path: &Path,
    config_path: Option<&Path>,
    dry_run: bool,
    output: OutputMode,
) -> Result<(), String> {
    let filters = FilterConfig::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let organizer = FileOrganizer::new(base_path).with_filters(filters);

    if output == OutputMode::Json {
        let result = organizer
            .organize_files(dry_run, &mut Silent)
            .map_err(|e| e.to_string())?;
        let json = Summary::new(&result, dry_run)
            .to_json()
            .map_err(|e| format!("Error serializing summary: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    if dry_run {
        OutputFormatter::info(&format!("DRY RUN: Analyzing contents of: {}", base_path.display()));
    } else {
        OutputFormatter::info(&format!("Organizing contents of: {}", base_path.display()));
    }

    let mut observer = ConsoleObserver::new();
    let outcome = organizer.organize_files(dry_run, &mut observer);
    observer.finish();
    let result = outcome.map_err(|e| e.to_string())?;

    OutputFormatter::summary_table(&Summary::new(&result, dry_run));

    if dry_run {
        OutputFormatter::header("This was a dry run. No files were actually moved.");
        OutputFormatter::plain("Run without --dry-run to actually organize the files.");
    } else if observer.failures() > 0 {
        OutputFormatter::warning(&format!(
            "{} could not be organized. Please review errors above.",
            file_count(observer.failures())
        ));
    }

    Ok(())
}
