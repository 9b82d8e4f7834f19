//! Derives article metadata from source file names. A source file is named
//! `YYYY-MM-DD_<title>.md`: the date prefix becomes the article's publish
//! date and the remainder (less the extension) becomes its title.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// The extension every article source file must carry.
pub const MARKDOWN_EXTENSION: &str = ".md";

const DATE_FORMAT: &str = "%Y-%m-%d";

// `[0-9]` rather than `\d` since the latter matches any Unicode digit.
static SOURCE_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}_[^_]+\.md$").unwrap());

static DATE_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// The metadata encoded in a source file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    /// The publish date from the `YYYY-MM-DD` prefix.
    pub date: NaiveDate,

    /// The title exactly as it appears in the file name. URL sanitization
    /// happens later in [`crate::page`] so the display title is preserved.
    pub title: String,
}

/// Returns whether `file_name` follows the source naming contract
/// (`YYYY-MM-DD_<title>.md`, with no further underscores in the title). This
/// checks shape only; [`extract`] additionally validates the calendar date.
pub fn is_eligible(file_name: &str) -> bool {
    SOURCE_FILE_NAME.is_match(file_name)
}

/// Splits `file_name` on its first underscore into a date and a title.
/// Returns `None` if there is no underscore, the date segment isn't shaped
/// like `YYYY-MM-DD` or isn't a real calendar date, or the title is empty once
/// the `.md` extension is stripped.
pub fn extract(file_name: &str) -> Option<Metadata> {
    let (date, rest) = file_name.split_once('_')?;
    if !DATE_SEGMENT.is_match(date) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    let title = rest.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(rest);
    if title.is_empty() {
        return None;
    }
    Some(Metadata {
        date,
        title: title.to_owned(),
    })
}
