//! Loads the site [`Config`] from the environment (optionally seeded from a
//! dotenv file). This is the only place the environment is read; everything
//! downstream receives the [`Config`] explicitly.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

pub const BLOG_NAME: &str = "BLOG_NAME";
pub const BLOG_BIO: &str = "BLOG_BIO";
pub const SITE_PATH: &str = "SITE_PATH";
pub const ARTICLE_PATH: &str = "ARTICLE_PATH";
pub const ASSETS_PATH: &str = "ASSETS_PATH";

/// Settings for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The blog's name, shown on every page.
    pub blog_name: String,

    /// The blog's short biography, shown on the home page.
    pub blog_bio: String,

    /// The output root. Receives `index.html`, `articles/`, `styles/`, and
    /// `fonts/`.
    pub site_path: PathBuf,

    /// The root directory searched for article source files.
    pub article_path: PathBuf,

    /// The directory holding the `styles/` and `fonts/` asset directories.
    /// `None` writes the stylesheet embedded in the binary instead.
    pub assets_path: Option<PathBuf>,

    /// Worker threads for article assembly. `1` assembles sequentially.
    pub threads: usize,
}

impl Config {
    /// Loads a dotenv file and builds a [`Config`] from the process
    /// environment. An explicit `env_file` must exist; otherwise `.env` in the
    /// working directory is used when present.
    pub fn from_env(env_file: Option<&Path>, threads: Option<usize>) -> Result<Config> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|err| Error::EnvFile {
                    path: path.to_owned(),
                    err: err.to_string(),
                })?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Config::from_lookup(|key| std::env::var(key).ok(), threads)
    }

    /// Builds a [`Config`] from an arbitrary key lookup. Required values are
    /// trimmed; blank values count as missing.
    pub fn from_lookup<F>(lookup: F, threads: Option<usize>) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
                _ => Err(Error::Missing(key)),
            }
        };

        let blog_name = required(BLOG_NAME)?;
        let blog_bio = required(BLOG_BIO)?;
        let site_path = resolve_path(&required(SITE_PATH)?)?;
        let article_path = resolve_path(&required(ARTICLE_PATH)?)?;
        let assets_path = match lookup(ASSETS_PATH) {
            Some(value) if !value.trim().is_empty() => Some(resolve_path(value.trim())?),
            _ => None,
        };
        let threads = match threads {
            None => 1,
            Some(0) => return Err(Error::InvalidThreads(String::from("0"))),
            Some(threads) => threads,
        };

        Ok(Config {
            blog_name,
            blog_bio,
            site_path,
            article_path,
            assets_path,
            threads,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "blog_name='{}' blog_bio='{}' site_path={} article_path={} assets_path={} threads={}",
            self.blog_name,
            self.blog_bio,
            self.site_path.display(),
            self.article_path.display(),
            match &self.assets_path {
                Some(path) => path.display().to_string(),
                None => String::from("<bundled>"),
            },
            self.threads,
        )
    }
}

/// Parses a worker thread count given on the command line.
pub fn parse_threads(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(threads) if threads > 0 => Ok(threads),
        _ => Err(Error::InvalidThreads(value.to_owned())),
    }
}

// Expands a leading `~` to the home directory, makes relative paths absolute
// against the working directory, and folds away `.` and `..` segments.
fn resolve_path(value: &str) -> Result<PathBuf> {
    let expanded = if value == "~" || value.starts_with("~/") {
        let home = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_owned())
            .ok_or_else(|| Error::HomeDirectory(value.to_owned()))?;
        match value.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => home,
        }
    } else {
        PathBuf::from(value)
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map_err(Error::CurrentDirectory)?
            .join(expanded)
    };
    Ok(normalize(&absolute))
}

// Lexical only; symlinks are not resolved. `..` never climbs above the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.parent().is_some() {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// The result of loading configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a configuration problem. All variants are fatal and are raised
/// before any file is read or written.
#[derive(Debug)]
pub enum Error {
    /// Returned when a required key is absent or blank.
    Missing(&'static str),

    /// Returned when a path starts with `~` but no home directory is known.
    HomeDirectory(String),

    /// Returned when a relative path can't be resolved because the working
    /// directory is unavailable.
    CurrentDirectory(io::Error),

    /// Returned when an explicitly requested dotenv file can't be loaded.
    EnvFile { path: PathBuf, err: String },

    /// Returned for an unusable worker thread count.
    InvalidThreads(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Missing(key) => write!(
                f,
                "Required configuration property '{}' is missing or empty",
                key
            ),
            Error::HomeDirectory(value) => {
                write!(f, "Can't expand '{}': home directory not found", value)
            }
            Error::CurrentDirectory(err) => {
                write!(f, "Resolving the working directory: {}", err)
            }
            Error::EnvFile { path, err } => {
                write!(f, "Loading env file '{}': {}", path.display(), err)
            }
            Error::InvalidThreads(threads) => {
                write!(f, "Thread count must be a positive integer, got '{}'", threads)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::CurrentDirectory(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![
            (BLOG_NAME, "  My Blog "),
            (BLOG_BIO, "Notes on things"),
            (SITE_PATH, "/var/www/blog"),
            (ARTICLE_PATH, "/home/me/articles"),
        ]
    }

    #[test]
    fn test_from_lookup() -> Result<()> {
        let config = Config::from_lookup(lookup(&complete()), None)?;
        assert_eq!("My Blog", config.blog_name);
        assert_eq!("Notes on things", config.blog_bio);
        assert_eq!(PathBuf::from("/var/www/blog"), config.site_path);
        assert_eq!(PathBuf::from("/home/me/articles"), config.article_path);
        assert_eq!(None, config.assets_path);
        assert_eq!(1, config.threads);
        Ok(())
    }

    #[test]
    fn test_missing_and_blank_keys() {
        for key in &[BLOG_NAME, BLOG_BIO, SITE_PATH, ARTICLE_PATH] {
            let without: Vec<(&str, &str)> =
                complete().into_iter().filter(|(k, _)| k != key).collect();
            match Config::from_lookup(lookup(&without), None) {
                Err(Error::Missing(missing)) => assert_eq!(*key, missing),
                other => panic!("expected Missing({}), got {:?}", key, other),
            }

            let blank: Vec<(&str, &str)> = complete()
                .into_iter()
                .map(|(k, v)| if k == *key { (k, "   ") } else { (k, v) })
                .collect();
            match Config::from_lookup(lookup(&blank), None) {
                Err(Error::Missing(missing)) => assert_eq!(*key, missing),
                other => panic!("expected Missing({}), got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_tilde_expansion() -> Result<()> {
        let mut pairs = complete();
        pairs.retain(|(k, _)| *k != SITE_PATH);
        pairs.push((SITE_PATH, "~/site"));
        let config = Config::from_lookup(lookup(&pairs), None)?;
        let home = directories::BaseDirs::new().unwrap().home_dir().to_owned();
        assert_eq!(home.join("site"), config.site_path);
        Ok(())
    }

    #[test]
    fn test_relative_paths_are_absolute() -> Result<()> {
        let mut pairs = complete();
        pairs.retain(|(k, _)| *k != ARTICLE_PATH);
        pairs.push((ARTICLE_PATH, "articles"));
        let config = Config::from_lookup(lookup(&pairs), None)?;
        assert!(config.article_path.is_absolute());
        assert!(config.article_path.ends_with("articles"));
        Ok(())
    }

    #[test]
    fn test_dot_segments_are_normalized() -> Result<()> {
        let mut pairs = complete();
        pairs.retain(|(k, _)| *k != SITE_PATH && *k != ARTICLE_PATH);
        pairs.push((SITE_PATH, "~/../x"));
        pairs.push((ARTICLE_PATH, "/home/./me/drafts/../articles/"));
        let config = Config::from_lookup(lookup(&pairs), None)?;
        let home = directories::BaseDirs::new().unwrap().home_dir().to_owned();
        let expected = match home.parent() {
            Some(parent) => parent.join("x"),
            None => home.join("x"),
        };
        assert_eq!(expected, config.site_path);
        assert_eq!(PathBuf::from("/home/me/articles"), config.article_path);
        Ok(())
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(PathBuf::from("/etc"), normalize(Path::new("/../../etc")));
    }

    #[test]
    fn test_assets_path_override_and_threads() -> Result<()> {
        let mut pairs = complete();
        pairs.push((ASSETS_PATH, "/opt/theme"));
        let config = Config::from_lookup(lookup(&pairs), Some(4))?;
        assert_eq!(Some(PathBuf::from("/opt/theme")), config.assets_path);
        assert_eq!(4, config.threads);
        Ok(())
    }

    #[test]
    fn test_zero_threads() {
        match Config::from_lookup(lookup(&complete()), Some(0)) {
            Err(Error::InvalidThreads(value)) => assert_eq!("0", value),
            other => panic!("expected InvalidThreads, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_threads() {
        assert_eq!(8, parse_threads("8").unwrap());
        for value in &["0", "-1", "many", ""] {
            assert!(parse_threads(value).is_err(), "{}", value);
        }
    }
}
