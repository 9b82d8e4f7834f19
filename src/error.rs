//! Defines [`FileProcessingError`], the error type shared by every component
//! that touches the file system (reading sources, writing pages, copying
//! assets).

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Represents a failure to read, write, or enumerate a file. Whether the
/// failure is fatal depends on where it surfaces: the
/// [`crate::repository`] tolerates read failures for individual source files,
/// while write and copy failures abort the run.
#[derive(Debug)]
pub enum FileProcessingError {
    /// Returned when a source file can't be read (or isn't valid UTF-8).
    Read { path: PathBuf, err: io::Error },

    /// Returned when an output file can't be created or written.
    Write { path: PathBuf, err: io::Error },

    /// Returned when a parent directory for an output file can't be created.
    CreateDirectory { path: PathBuf, err: io::Error },

    /// Returned when an asset can't be copied into the site directory.
    Copy {
        from: PathBuf,
        to: PathBuf,
        err: io::Error,
    },

    /// Returned when the configured article path exists but isn't a
    /// directory.
    NotADirectory(PathBuf),

    /// Returned for errors while walking a directory tree.
    Walk(walkdir::Error),
}

impl FileProcessingError {
    /// The offending path, if one is known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FileProcessingError::Read { path, .. } => Some(path),
            FileProcessingError::Write { path, .. } => Some(path),
            FileProcessingError::CreateDirectory { path, .. } => Some(path),
            FileProcessingError::Copy { from, .. } => Some(from),
            FileProcessingError::NotADirectory(path) => Some(path),
            FileProcessingError::Walk(err) => err.path(),
        }
    }
}

impl fmt::Display for FileProcessingError {
    /// Displays a [`FileProcessingError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileProcessingError::Read { path, err } => {
                write!(f, "Reading article file '{}': {}", path.display(), err)
            }
            FileProcessingError::Write { path, err } => {
                write!(f, "Writing HTML file '{}': {}", path.display(), err)
            }
            FileProcessingError::CreateDirectory { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            FileProcessingError::Copy { from, to, err } => write!(
                f,
                "Copying '{}' to '{}': {}",
                from.display(),
                to.display(),
                err
            ),
            FileProcessingError::NotADirectory(path) => write!(
                f,
                "Configured article path is not a directory: '{}'",
                path.display()
            ),
            FileProcessingError::Walk(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for FileProcessingError {
    /// Implements the [`std::error::Error`] trait for [`FileProcessingError`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileProcessingError::Read { err, .. } => Some(err),
            FileProcessingError::Write { err, .. } => Some(err),
            FileProcessingError::CreateDirectory { err, .. } => Some(err),
            FileProcessingError::Copy { err, .. } => Some(err),
            FileProcessingError::NotADirectory(_) => None,
            FileProcessingError::Walk(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for FileProcessingError {
    /// Converts a [`walkdir::Error`] into a [`FileProcessingError`]. It allows
    /// us to use the `?` operator while walking directories.
    fn from(err: walkdir::Error) -> FileProcessingError {
        FileProcessingError::Walk(err)
    }
}
