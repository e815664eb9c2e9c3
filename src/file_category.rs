/// File categorization by extension.
///
/// This module owns the built-in category table and the pure lookup that maps a
/// file name to the category folder it belongs in.
///
/// # Examples
///
/// ```
/// use dirsort::file_category::{Category, FileMapper};
///
/// let mapper = FileMapper::default();
/// assert_eq!(mapper.categorize("holiday.JPG"), Category::Images);
/// assert_eq!(mapper.categorize("notes.backup.txt"), Category::Documents);
/// assert_eq!(mapper.categorize("Makefile"), Category::Other);
/// ```
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A category folder a file can be sorted into.
///
/// Variants are declared in table order, with `Other` last, so the derived
/// `Ord` gives the stable order used for folder creation and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// Image files (JPG, PNG, SVG, etc.)
    Images,
    /// Document files (PDF, DOCX, XLSX, etc.)
    Documents,
    /// Video files (MP4, MKV, MOV, etc.)
    Videos,
    /// Audio files (MP3, FLAC, WAV, etc.)
    Audio,
    /// Archive files (ZIP, 7Z, TAR, etc.)
    Archives,
    /// Source code files (Python, JavaScript, Go, etc.)
    Code,
    /// Installers and executables (EXE, MSI, DEB, etc.)
    Executables,
    /// Anything the table does not recognise.
    Other,
}

impl Category {
    /// Every category, in folder creation order.
    pub const ALL: [Category; 8] = [
        Category::Images,
        Category::Documents,
        Category::Videos,
        Category::Audio,
        Category::Archives,
        Category::Code,
        Category::Executables,
        Category::Other,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Other.dir_name(), "Other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Videos => "Videos",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
            Category::Code => "Code",
            Category::Executables => "Executables",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The built-in extension table. `Other` is implicit and never listed.
const BUILTIN_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Images,
        &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico"],
    ),
    (
        Category::Documents,
        &[
            ".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".xls", ".xlsx", ".ppt", ".pptx",
        ],
    ),
    (
        Category::Videos,
        &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v"],
    ),
    (
        Category::Audio,
        &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a", ".wma"],
    ),
    (
        Category::Archives,
        &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2"],
    ),
    (
        Category::Code,
        &[
            ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".php", ".rb", ".go",
        ],
    ),
    (
        Category::Executables,
        &[".exe", ".msi", ".deb", ".rpm", ".dmg", ".app"],
    ),
];

/// Extracts the lowercase extension of a file name, leading dot included.
///
/// Only the final component of `file_name` is considered. Names without a dot,
/// dotfiles such as `.hidden`, and names ending in a dot have no extension and
/// yield an empty string.
///
/// # Examples
///
/// ```
/// use dirsort::file_category::extension_of;
///
/// assert_eq!(extension_of("Report.PDF"), ".pdf");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of(".bashrc"), "");
/// assert_eq!(extension_of("README"), "");
/// ```
pub fn extension_of(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    match base.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < base.len() => base[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Maps file names to categories using the built-in extension table.
///
/// The table is private to each mapper; [`FileMapper::extension_table`] hands
/// out an owned copy, so nothing a caller does with it can change lookups.
#[derive(Debug, Clone)]
pub struct FileMapper {
    table: Vec<(Category, Vec<String>)>,
}

impl FileMapper {
    /// Creates a new `FileMapper` with the built-in table.
    pub fn new() -> Self {
        let table = BUILTIN_TABLE
            .iter()
            .map(|(category, extensions)| {
                (
                    *category,
                    extensions.iter().map(|ext| ext.to_string()).collect(),
                )
            })
            .collect();
        Self { table }
    }

    /// Returns a copy of the category table in declaration order.
    pub fn extension_table(&self) -> Vec<(Category, Vec<String>)> {
        self.table.clone()
    }

    /// Maps an extension (with leading dot) to its table category.
    ///
    /// The first category listing the extension wins. Returns `None` for
    /// extensions the table does not know, including the empty extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::{Category, FileMapper};
    ///
    /// let mapper = FileMapper::default();
    /// assert_eq!(mapper.extension_to_category(".MP3"), Some(Category::Audio));
    /// assert_eq!(mapper.extension_to_category(".xyz"), None);
    /// ```
    pub fn extension_to_category(&self, ext: &str) -> Option<Category> {
        let ext = ext.to_lowercase();
        self.table
            .iter()
            .find(|(_, extensions)| extensions.iter().any(|known| *known == ext))
            .map(|(category, _)| *category)
    }

    /// Determines the category for a file name.
    ///
    /// Never fails: unknown, missing and empty extensions all fall back to
    /// [`Category::Other`].
    pub fn categorize(&self, file_name: &str) -> Category {
        self.extension_to_category(&extension_of(file_name))
            .unwrap_or(Category::Other)
    }
}

impl Default for FileMapper {
    fn default() -> Self {
        Self::new()
    }
}
