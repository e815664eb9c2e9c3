/// File organization system for moving files into category directories.
///
/// This module provides functionality to organize the direct children of a
/// directory by moving each file into the category subfolder its extension
/// maps to. It handles folder provisioning, the move itself (including moves
/// across filesystems), dry runs, and per-file failure isolation.
use crate::config::CompiledFilters;
use crate::file_category::{Category, FileMapper};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Errors that can occur during file organization operations.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target directory does not exist.
    DirectoryNotFound { path: PathBuf },
    /// The target path exists but is not a directory.
    NotADirectory { path: PathBuf },
    /// The target directory could not be read.
    ReadDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotFound { path } => {
                write!(f, "Directory {} does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "{} is not a directory", path.display())
            }
            Self::ReadDirectory { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Progress notifications emitted while provisioning folders and sorting files.
#[derive(Debug)]
pub enum OrganizeEvent {
    /// A category folder exists, either freshly created or already present.
    FolderReady {
        category: Category,
        path: PathBuf,
        created: bool,
    },
    /// Enumeration finished and `file_count` files are about to be processed.
    Started { file_count: usize, dry_run: bool },
    /// The directory holds no files to organize.
    NoFiles,
    /// A file was moved into its category folder.
    Moved { file_name: String, category: Category },
    /// Dry run: a file would be moved into its category folder.
    WouldMove { file_name: String, category: Category },
    /// A file could not be moved and was left in place.
    MoveFailed {
        file_name: String,
        category: Category,
        error: OrganizeError,
    },
}

/// Receives [`OrganizeEvent`]s as an organization run progresses.
///
/// Any `FnMut(&OrganizeEvent)` closure is an observer.
pub trait OrganizeObserver {
    fn on_event(&mut self, event: &OrganizeEvent);
}

impl<F> OrganizeObserver for F
where
    F: FnMut(&OrganizeEvent),
{
    fn on_event(&mut self, event: &OrganizeEvent) {
        self(event)
    }
}

/// An observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl OrganizeObserver for Silent {
    fn on_event(&mut self, _event: &OrganizeEvent) {}
}

/// Files sorted during one run, grouped by category.
///
/// Every category, `Other` included, is always present; categories that
/// received no files map to an empty list. Within a category, names keep the
/// order in which they were processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrganizationResult {
    files: BTreeMap<Category, Vec<String>>,
}

impl OrganizationResult {
    /// Creates a result with every category empty.
    pub fn new() -> Self {
        Self {
            files: Category::ALL
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect(),
        }
    }

    fn record(&mut self, category: Category, file_name: String) {
        self.files.entry(category).or_default().push(file_name);
    }

    /// Names of the files sorted into `category`.
    pub fn files(&self, category: Category) -> &[String] {
        self.files
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of files across all categories.
    pub fn total(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Returns true if no file was recorded.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterates over every category in table order, `Other` last.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.files
            .iter()
            .map(|(category, files)| (*category, files.as_slice()))
    }
}

impl Default for OrganizationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Organizes the files of one directory into category subdirectories.
///
/// Only direct children are considered. Subdirectories, including the
/// category folders themselves, are never entered, moved or reported.
#[derive(Debug)]
pub struct FileOrganizer {
    directory: PathBuf,
    mapper: FileMapper,
    filters: CompiledFilters,
}

impl FileOrganizer {
    /// Creates an organizer for `directory` with the built-in category table
    /// and no exclusion rules.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            mapper: FileMapper::default(),
            filters: CompiledFilters::default(),
        }
    }

    /// Replaces the exclusion rules applied while enumerating files.
    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    /// The directory being organized.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The mapper used to categorize files.
    pub fn mapper(&self) -> &FileMapper {
        &self.mapper
    }

    /// Determines the category of a file from its name.
    pub fn categorize_file(&self, file_path: &Path) -> Category {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        self.mapper.categorize(&file_name)
    }

    /// Ensures a folder exists for every category, `Other` included.
    ///
    /// Folders are created in table order with `Other` last. Existing folders
    /// are left untouched, so calling this repeatedly is harmless. Fails if the
    /// target directory is missing or a category name is taken by something
    /// other than a directory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_organizer::{FileOrganizer, Silent};
    ///
    /// let organizer = FileOrganizer::new("/path/to/downloads");
    /// organizer
    ///     .create_category_folders(&mut Silent)
    ///     .expect("folders should be created");
    /// ```
    pub fn create_category_folders(
        &self,
        observer: &mut dyn OrganizeObserver,
    ) -> OrganizeResult<()> {
        self.ensure_directory()?;

        for category in Category::ALL {
            let path = self.directory.join(category.dir_name());
            let created = match fs::create_dir(&path) {
                Ok(()) => true,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => false,
                Err(source) => {
                    return Err(OrganizeError::DirectoryCreationFailed { path, source });
                }
            };

            if created {
                info!(folder = %path.display(), "Created category folder");
            } else {
                debug!(folder = %path.display(), "Category folder already exists");
            }
            observer.on_event(&OrganizeEvent::FolderReady {
                category,
                path,
                created,
            });
        }

        Ok(())
    }

    /// Sorts every file in the directory into its category folder.
    ///
    /// In a live run the category folders are provisioned first, then each
    /// file is moved to `<directory>/<Category>/<file name>`. A file that
    /// cannot be moved is reported through the observer, left where it was,
    /// and omitted from the result; the remaining files are still processed.
    ///
    /// With `dry_run` set nothing on disk changes: no folders are created and
    /// no file is moved, but the result lists where every file would go.
    ///
    /// # Errors
    ///
    /// Fails before touching anything if the directory does not exist or
    /// cannot be read, and fails if a category folder cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_category::Category;
    /// use dirsort::file_organizer::{FileOrganizer, Silent};
    ///
    /// let organizer = FileOrganizer::new("/path/to/downloads");
    /// let result = organizer.organize_files(true, &mut Silent).unwrap();
    /// println!("{} images would be moved", result.files(Category::Images).len());
    /// ```
    pub fn organize_files(
        &self,
        dry_run: bool,
        observer: &mut dyn OrganizeObserver,
    ) -> OrganizeResult<OrganizationResult> {
        self.ensure_directory()?;

        let files = self.collect_files()?;
        let mut result = OrganizationResult::new();

        if !dry_run {
            self.create_category_folders(observer)?;
        }

        if files.is_empty() {
            observer.on_event(&OrganizeEvent::NoFiles);
            return Ok(result);
        }

        observer.on_event(&OrganizeEvent::Started {
            file_count: files.len(),
            dry_run,
        });

        for file_path in files {
            let file_name = file_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let category = self.mapper.categorize(&file_name);

            if dry_run {
                debug!(file = %file_name, %category, "Would move file");
                result.record(category, file_name.clone());
                observer.on_event(&OrganizeEvent::WouldMove {
                    file_name,
                    category,
                });
                continue;
            }

            match self.move_to_category(&file_path, category) {
                Ok(destination) => {
                    info!(file = %file_name, dest = %destination.display(), "Moved file");
                    result.record(category, file_name.clone());
                    observer.on_event(&OrganizeEvent::Moved {
                        file_name,
                        category,
                    });
                }
                Err(error) => {
                    warn!(file = %file_name, %error, "Leaving file in place");
                    observer.on_event(&OrganizeEvent::MoveFailed {
                        file_name,
                        category,
                        error,
                    });
                }
            }
        }

        Ok(result)
    }

    fn ensure_directory(&self) -> OrganizeResult<()> {
        match fs::metadata(&self.directory) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(OrganizeError::NotADirectory {
                path: self.directory.clone(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(OrganizeError::DirectoryNotFound {
                    path: self.directory.clone(),
                })
            }
            Err(source) => Err(OrganizeError::ReadDirectory {
                path: self.directory.clone(),
                source,
            }),
        }
    }

    /// Lists the regular files directly inside the directory, in the order
    /// the filesystem returns them, minus anything the filters exclude.
    fn collect_files(&self) -> OrganizeResult<Vec<PathBuf>> {
        let read_error = |source: io::Error| OrganizeError::ReadDirectory {
            path: self.directory.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.directory).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let path = entry.path();

            // Follows symlinks: a link to a regular file counts as a file.
            match fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => {}
                Ok(_) => {
                    debug!(entry = %path.display(), "Skipping non-file entry");
                    continue;
                }
                Err(e) => {
                    debug!(entry = %path.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            }

            if !self.filters.should_include(Path::new(&entry.file_name())) {
                debug!(entry = %path.display(), "Excluded by filter rules");
                continue;
            }

            files.push(path);
        }

        Ok(files)
    }

    /// Moves one file into its (already provisioned) category folder.
    ///
    /// Refuses to replace an existing entry at the destination.
    fn move_to_category(&self, file_path: &Path, category: Category) -> OrganizeResult<PathBuf> {
        let category_path = self.directory.join(category.dir_name());

        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: category_path.clone(),
                source_error: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let destination = category_path.join(file_name);

        if fs::symlink_metadata(&destination).is_ok() {
            return Err(OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination,
                source_error: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "destination already exists",
                ),
            });
        }

        move_file(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(destination)
    }
}

/// Moves `source` to `destination`, falling back to copy and remove when a
/// plain rename cannot cross filesystems.
///
/// On failure the file is left at `source` and no copy remains at
/// `destination`.
pub fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            warn!(
                src = %source.display(),
                dest = %destination.display(),
                "Rename crossed filesystems, falling back to copy and remove"
            );
            copy_then_remove(source, destination)
        }
        Err(e) => Err(e),
    }
}

fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    if let Err(e) = copy_entry(source, destination) {
        if e.kind() != io::ErrorKind::AlreadyExists {
            discard_partial_copy(destination);
        }
        return Err(e);
    }

    if let Err(e) = fs::remove_file(source) {
        discard_partial_copy(destination);
        return Err(e);
    }

    Ok(())
}

/// Copies a regular file, or recreates a symlink with the same target so the
/// link itself is moved rather than the file it points to.
fn copy_entry(source: &Path, destination: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        if fs::symlink_metadata(source)?.file_type().is_symlink() {
            let target = fs::read_link(source)?;
            return std::os::unix::fs::symlink(target, destination);
        }
    }

    fs::copy(source, destination).map(|_| ())
}

fn discard_partial_copy(destination: &Path) {
    if let Err(e) = fs::remove_file(destination)
        && e.kind() != io::ErrorKind::NotFound
    {
        warn!(dest = %destination.display(), error = %e, "Could not remove partial copy");
    }
}
