//! Read-only summary of an organization run.

use crate::file_category::Category;
use crate::file_organizer::OrganizationResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals and file lists for the categories that received files.
///
/// # Examples
///
/// ```
/// use dirsort::file_organizer::OrganizationResult;
/// use dirsort::summary::Summary;
///
/// let summary = Summary::new(&OrganizationResult::new(), false);
/// assert_eq!(summary.total, 0);
/// assert!(summary.categories.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of files across all categories.
    pub total: usize,
    /// Whether the run only simulated the moves.
    pub dry_run: bool,
    /// Non-empty categories in table order, each with its file names.
    pub categories: BTreeMap<Category, Vec<String>>,
}

impl Summary {
    /// Builds a summary of `result`, skipping categories with no files.
    pub fn new(result: &OrganizationResult, dry_run: bool) -> Self {
        let categories = result
            .iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(category, files)| (category, files.to_vec()))
            .collect();

        Self {
            total: result.total(),
            dry_run,
            categories,
        }
    }

    /// Number of files listed under `category`.
    pub fn count(&self, category: Category) -> usize {
        self.categories.get(&category).map_or(0, Vec::len)
    }

    /// "<Category>: <n> files", printed above the category's file list.
    pub fn category_line(&self, category: Category) -> String {
        format!("{}: {} files", category, self.count(category))
    }

    /// "Total files organized: <N>", the closing line of the summary block.
    pub fn total_line(&self) -> String {
        format!("Total files organized: {}", self.total)
    }

    /// Renders the summary as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// "1 file", "3 files".
pub fn file_count(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", count)
    }
}
