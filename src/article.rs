//! Defines the [`Article`] record and the assembler that builds one from a
//! single source file.

use crate::error::FileProcessingError;
use crate::markdown::MarkdownConverter;
use crate::metadata;
use chrono::NaiveDate;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// One parsed blog post. Articles are built once per run by [`assemble`] and
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    /// The title taken verbatim from the source file name (less extension).
    pub title: String,

    /// The publish date taken from the source file name.
    pub created_at: NaiveDate,

    /// The rendered HTML body. Empty when the source is blank.
    pub body_html: String,
}

/// Why a path produced no [`Article`]. Skips are expected outcomes, not
/// errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Skip {
    /// The path is missing or isn't a regular file.
    NotAFile(PathBuf),

    /// The file name doesn't match `YYYY-MM-DD_<title>.md` or its date isn't
    /// a real calendar date.
    IneligibleName(PathBuf),
}

/// The non-error outcome of [`assemble`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assembled {
    Article(Article),
    Skipped(Skip),
}

/// Builds an [`Article`] from the file at `path`. Paths that aren't regular
/// files or whose names don't follow the naming contract are skipped; a file
/// that can't be read as UTF-8 text yields [`FileProcessingError::Read`],
/// which callers are expected to treat as a per-file failure.
pub fn assemble(
    path: &Path,
    converter: &dyn MarkdownConverter,
) -> Result<Assembled, FileProcessingError> {
    if !path.is_file() {
        return Ok(Assembled::Skipped(Skip::NotAFile(path.to_owned())));
    }

    let metadata = match path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| metadata::is_eligible(name))
        .and_then(metadata::extract)
    {
        Some(metadata) => metadata,
        None => return Ok(Assembled::Skipped(Skip::IneligibleName(path.to_owned()))),
    };

    let contents = std::fs::read_to_string(path).map_err(|err| FileProcessingError::Read {
        path: path.to_owned(),
        err,
    })?;

    let body_html = if contents.trim().is_empty() {
        warn!("Empty markdown content in file: {}", path.display());
        String::new()
    } else {
        converter.to_html(&contents)
    };

    debug!("Parsed article '{}' ({})", metadata.title, metadata.date);
    Ok(Assembled::Article(Article {
        title: metadata.title,
        created_at: metadata.date,
        body_html,
    }))
}
