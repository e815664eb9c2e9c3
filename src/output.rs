//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status lines,
//! the per-file progress bar, and the final summary block.

use crate::file_organizer::{OrganizeEvent, OrganizeObserver};
use crate::summary::Summary;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
///
/// - Success messages (green with ✓)
/// - Error messages (red with ✗, on stderr)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Summary block with per-category file lists
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use dirsort::output::OutputFormatter;
    /// OutputFormatter::success("Category folders created successfully!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for `total` file operations.
    ///
    /// The bar draws on stderr and stays hidden when that is not a terminal.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }

    /// Prints the organization summary block.
    ///
    /// Lists each non-empty category with its count and file names, followed
    /// by the grand total.
    pub fn summary_table(summary: &Summary) {
        let rule = "=".repeat(50);
        println!("\n{}", rule);
        println!("{}", "ORGANIZATION SUMMARY".bold());
        println!("{}", rule);

        for (category, files) in &summary.categories {
            println!("\n{}", summary.category_line(*category).bold());
            for file in files {
                println!("  - {}", file);
            }
        }

        println!("\n{}", summary.total_line().green().bold());
    }
}

/// Prints organization progress to the terminal.
///
/// Status lines are printed around a progress bar that advances once per
/// processed file.
#[derive(Default)]
pub struct ConsoleObserver {
    progress: Option<ProgressBar>,
    failures: usize,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files that could not be moved so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Clears the progress bar once the run is over.
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }
    }

    fn print(&self, print: impl FnOnce()) {
        match &self.progress {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
    }

    fn advance(&self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }
}

impl OrganizeObserver for ConsoleObserver {
    fn on_event(&mut self, event: &OrganizeEvent) {
        match event {
            OrganizeEvent::FolderReady {
                category, created, ..
            } => {
                let message = if *created {
                    format!("Created folder: {}", category)
                } else {
                    format!("Folder already exists: {}", category)
                };
                self.print(|| OutputFormatter::plain(&message));
            }
            OrganizeEvent::Started { file_count, .. } => {
                OutputFormatter::info(&format!("Found {} files to organize...", file_count));
                self.progress = Some(OutputFormatter::create_progress_bar(*file_count as u64));
            }
            OrganizeEvent::NoFiles => {
                OutputFormatter::warning("No files found to organize.");
            }
            OrganizeEvent::Moved {
                file_name,
                category,
            } => {
                let message = format!("Moved: {} -> {}/", file_name, category);
                self.print(|| OutputFormatter::success(&message));
                self.advance();
            }
            OrganizeEvent::WouldMove {
                file_name,
                category,
            } => {
                let message = format!("Would move: {} -> {}/", file_name, category);
                self.print(|| OutputFormatter::dry_run_notice(&message));
                self.advance();
            }
            OrganizeEvent::MoveFailed {
                file_name, error, ..
            } => {
                self.failures += 1;
                let message = format!("Error moving {}: {}", file_name, error);
                self.print(|| OutputFormatter::error(&message));
                self.advance();
            }
        }
    }
}
