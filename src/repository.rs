//! Discovers article source files under a root directory and assembles them
//! into an ordered list of [`Article`]s.

use crate::article::{assemble, Article, Assembled, Skip};
use crate::error::FileProcessingError;
use crate::markdown::MarkdownConverter;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds every article under `source_root`, newest first.
///
/// A missing root is an empty blog, not an error; a root that exists but
/// isn't a directory is. Every file under the root is offered to
/// [`assemble`]: misnamed files and files that fail to read are logged at
/// `warn` and dropped, so one bad file never sinks the batch.
///
/// With `threads > 1` assembly runs on a pool of that many workers. The result
/// is sorted after the merge, so scheduling order never reaches the output.
pub fn find_all(
    source_root: &Path,
    converter: &dyn MarkdownConverter,
    threads: usize,
) -> Result<Vec<Article>, FileProcessingError> {
    info!("Searching for articles in: {}", source_root.display());
    if !source_root.exists() {
        warn!("Article directory does not exist: {}", source_root.display());
        return Ok(Vec::new());
    }
    if !source_root.is_dir() {
        return Err(FileProcessingError::NotADirectory(source_root.to_owned()));
    }

    let paths = source_files(source_root);
    let outcomes = if threads > 1 {
        assemble_parallel(&paths, converter, threads)
    } else {
        paths.iter().map(|path| assemble(path, converter)).collect()
    };

    let mut articles: Vec<Article> = outcomes.into_iter().filter_map(keep_article).collect();
    sort_newest_first(&mut articles);
    info!("Found {} articles", articles.len());
    Ok(articles)
}

/// Returns whether at least one regular file exists under `source_root`. The
/// file doesn't have to parse as an article. Stops at the first file found.
pub fn has_articles(source_root: &Path) -> bool {
    source_root.is_dir()
        && WalkDir::new(source_root)
            .into_iter()
            .filter_map(|result| result.ok())
            .any(|entry| entry.file_type().is_file())
}

// Collects every non-directory entry under `source_root`. Entries that can't
// be read (e.g., an unreadable subdirectory) are logged and passed over.
fn source_files(source_root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for result in WalkDir::new(source_root) {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_dir() {
                    paths.push(entry.into_path());
                }
            }
            Err(err) => warn!("Skipping unreadable entry: {}", FileProcessingError::from(err)),
        }
    }
    paths
}

fn assemble_parallel(
    paths: &[PathBuf],
    converter: &dyn MarkdownConverter,
    threads: usize,
) -> Vec<Result<Assembled, FileProcessingError>> {
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(|| {
            paths
                .par_iter()
                .map(|path| assemble(path, converter))
                .collect()
        }),
        Err(err) => {
            warn!("Could not start {} workers ({}); assembling sequentially", threads, err);
            paths.iter().map(|path| assemble(path, converter)).collect()
        }
    }
}

fn keep_article(outcome: Result<Assembled, FileProcessingError>) -> Option<Article> {
    match outcome {
        Ok(Assembled::Article(article)) => Some(article),
        Ok(Assembled::Skipped(Skip::NotAFile(path))) => {
            debug!("Skipping non-regular file: {}", path.display());
            None
        }
        Ok(Assembled::Skipped(Skip::IneligibleName(path))) => {
            warn!("Skipping file not named like an article: {}", path.display());
            None
        }
        Err(err) => {
            warn!("Failed to parse article file: {}", err);
            None
        }
    }
}

// Newest first. Equal dates fall back to the title so the order doesn't
// depend on directory enumeration.
fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.title.cmp(&b.title))
    });
}
