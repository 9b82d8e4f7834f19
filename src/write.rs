//! Renders [`Page`]s and writes them to disk. Unlike source files, nothing
//! here is tolerated: the first failure aborts the write step.

use crate::error::FileProcessingError;
use crate::page::Page;
use crate::template::{Error as TemplateError, TemplateRenderer};
use log::debug;
use std::fmt;
use std::path::Path;

/// Writes `html` to `path`, creating missing parent directories. An existing
/// file is truncated and overwritten, so unchanged input reproduces
/// byte-identical output.
pub fn write_page(path: &Path, html: &str) -> std::result::Result<(), FileProcessingError> {
    if let Some(dir) = path.parent() {
        create_dir_all(dir)?;
    }
    write_file(path, html)
}

fn create_dir_all(dir: &Path) -> std::result::Result<(), FileProcessingError> {
    std::fs::create_dir_all(dir).map_err(|err| FileProcessingError::CreateDirectory {
        path: dir.to_owned(),
        err,
    })
}

fn write_file(path: &Path, html: &str) -> std::result::Result<(), FileProcessingError> {
    std::fs::write(path, html).map_err(|err| FileProcessingError::Write {
        path: path.to_owned(),
        err,
    })
}

/// Responsible for templating [`Page`]s and writing them to disk.
pub struct Writer<'a> {
    pub renderer: &'a dyn TemplateRenderer,
}

impl Writer<'_> {
    /// Takes a single [`Page`], templates it, and writes it to disk.
    pub fn write(&self, page: &Page) -> Result<()> {
        let html = self.renderer.render(page.template, &page.context)?;
        write_page(&page.file_path, &html)?;
        debug!("Wrote {} page: {}", page.template, page.file_path.display());
        Ok(())
    }

    /// Templates and writes every page, stopping at the first failure.
    /// Returns the number of pages written.
    pub fn write_all(&self, pages: impl Iterator<Item = Page>) -> Result<usize> {
        let mut written = 0;
        for page in pages {
            self.write(&page)?;
            written += 1;
        }
        Ok(written)
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(TemplateError),

    /// An error writing the output files.
    File(FileProcessingError),
}

impl From<TemplateError> for Error {
    /// Converts a [`TemplateError`] into an [`Error`]. This allows us to use
    /// the `?` operator for fallible template operations.
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}

impl From<FileProcessingError> for Error {
    /// Converts a [`FileProcessingError`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible I/O operations.
    fn from(err: FileProcessingError) -> Error {
        Error::File(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::File(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(err) => Some(err),
            Error::File(err) => Some(err),
        }
    }
}
