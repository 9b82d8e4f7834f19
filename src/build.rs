//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: loading the articles
//! ([`crate::repository`]), rendering the home page and the article pages
//! ([`crate::page`], [`crate::write`]), and copying the static assets
//! ([`crate::assets`]).

use crate::assets::{copy_assets, write_bundled_assets};
use crate::config::{Config, Error as ConfigError};
use crate::error::FileProcessingError;
use crate::markdown::{CommonMark, MarkdownConverter};
use crate::page::{article_pages, home_page};
use crate::repository;
use crate::template::{Error as TemplateError, GtmplRenderer, TemplateRenderer};
use crate::write::{Error as WriteError, Writer};
use log::{info, warn};
use std::fmt;

/// The steps of a run, in order. A failure in any step ends the run; there is
/// no partial-failure branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    LoadArticles,
    RenderHome,
    RenderArticles,
    CopyAssets,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Stage::LoadArticles => "loading articles",
            Stage::RenderHome => "rendering home page",
            Stage::RenderArticles => "rendering article pages",
            Stage::CopyAssets => "copying assets",
        })
    }
}

/// A summary of a successful run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub articles: usize,
    pub assets: usize,
}

/// Builds the site from a [`Config`] with the bundled templates and the
/// CommonMark converter. See [`build_site_with`].
pub fn build_site(config: &Config) -> Result<Report> {
    let renderer = GtmplRenderer::new()?;
    build_site_with(config, &CommonMark, &renderer)
}

/// Builds the site from a [`Config`] using the given collaborators. This
/// calls into [`repository::find_all`], [`Writer`], and [`copy_assets`] (or
/// [`write_bundled_assets`]), which do the heavy-lifting. Output files are overwritten in place; pages
/// whose source has since disappeared are left untouched.
pub fn build_site_with(
    config: &Config,
    converter: &dyn MarkdownConverter,
    renderer: &dyn TemplateRenderer,
) -> Result<Report> {
    info!("Starting blog generation ({})", config);

    let articles = in_stage(Stage::LoadArticles, || {
        repository::find_all(&config.article_path, converter, config.threads)
    })?;
    if articles.is_empty() {
        warn!("No articles found. Generation will create an empty blog.");
    } else {
        info!("Loaded {} articles", articles.len());
    }

    let writer = Writer { renderer };

    in_stage(Stage::RenderHome, || {
        writer.write(&home_page(
            &config.site_path,
            &config.blog_name,
            &config.blog_bio,
            &articles,
        ))
    })?;

    let written = in_stage(Stage::RenderArticles, || {
        writer.write_all(article_pages(&config.site_path, &config.blog_name, &articles))
    })?;
    info!("Generated {} article pages", written);

    let assets = in_stage(Stage::CopyAssets, || match &config.assets_path {
        Some(assets_path) => copy_assets(assets_path, &config.site_path),
        None => write_bundled_assets(&config.site_path),
    })?;

    info!("Blog generation completed: {}", config.site_path.display());
    Ok(Report {
        articles: articles.len(),
        assets,
    })
}

// Runs one step, logging entry and annotating any failure with the stage.
fn in_stage<T, E, F>(stage: Stage, step: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: Into<Error>,
{
    info!("{}...", capitalize(&stage.to_string()));
    step().map_err(|err| Error::Annotated(stage, Box::new(err.into())))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The result of building a site.
pub type Result<T> = std::result::Result<T, Error>;

/// The top-level error for a run: configuration problems, file failures,
/// template failures, and the stage in which a failure happened.
#[derive(Debug)]
pub enum Error {
    /// Returned when the configuration can't be loaded.
    Config(ConfigError),

    /// Returned for unrecoverable file errors (unreadable article root,
    /// failed writes or copies).
    File(FileProcessingError),

    /// Returned when a template fails to compile or render.
    Template(TemplateError),

    /// An error with the stage in which it happened.
    Annotated(Stage, Box<Error>),
}

impl Error {
    /// The stage the error was raised in, if it was raised inside the
    /// pipeline.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Annotated(stage, _) => Some(*stage),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "Configuration error: {}", err),
            Error::File(err) => err.fmt(f),
            Error::Template(err) => err.fmt(f),
            Error::Annotated(stage, err) => write!(f, "{}: {}", stage, err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::File(err) => Some(err),
            Error::Template(err) => Some(err),
            Error::Annotated(_, err) => Some(err.as_ref()),
        }
    }
}

impl From<ConfigError> for Error {
    /// Converts [`ConfigError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ConfigError) -> Error {
        Error::Config(err)
    }
}

impl From<FileProcessingError> for Error {
    /// Converts [`FileProcessingError`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: FileProcessingError) -> Error {
        Error::File(err)
    }
}

impl From<TemplateError> for Error {
    /// Converts [`TemplateError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`], unwrapping them into the
    /// template or file variant.
    fn from(err: WriteError) -> Error {
        match err {
            WriteError::Template(err) => Error::Template(err),
            WriteError::File(err) => Error::File(err),
        }
    }
}
