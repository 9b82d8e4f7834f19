//! Copies the static assets (stylesheets and fonts) into the site directory.

use crate::error::FileProcessingError;
use crate::write::write_page;
use log::{debug, info, warn};
use std::path::Path;
use walkdir::WalkDir;

/// The asset directories copied from the assets root to the site root.
pub const ASSET_DIRECTORIES: [&str; 2] = ["styles", "fonts"];

/// The assets compiled into the binary, as paths relative to the site root.
const BUNDLED_ASSETS: [(&str, &str); 1] = [(
    "styles/main.css",
    include_str!("../assets/styles/main.css"),
)];

/// Writes the embedded stylesheet into `site_root`. Used when no assets
/// directory is configured, so an installed binary doesn't depend on its
/// source checkout.
pub fn write_bundled_assets(site_root: &Path) -> Result<usize, FileProcessingError> {
    for (relative, contents) in BUNDLED_ASSETS.iter() {
        write_page(&site_root.join(relative), contents)?;
        debug!("Wrote bundled asset: {}", relative);
    }
    Ok(BUNDLED_ASSETS.len())
}

/// Copies `{assets_root}/styles` and `{assets_root}/fonts` into `site_root`.
/// See [`copy_dir`].
pub fn copy_assets(assets_root: &Path, site_root: &Path) -> Result<usize, FileProcessingError> {
    let mut copied = 0;
    for name in ASSET_DIRECTORIES.iter() {
        copied += copy_dir(&assets_root.join(name), &site_root.join(name))?;
    }
    Ok(copied)
}

/// Recursively copies every file under `src` into `dst`, overwriting existing
/// files and creating directories as needed. A missing `src` is logged and
/// treated as empty. Returns the number of files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize, FileProcessingError> {
    if !src.is_dir() {
        warn!("Asset directory does not exist: {}", src.display());
        return Ok(0);
    }

    info!("Copying assets from {} to {}", src.display(), dst.display());
    let mut copied = 0;
    for result in WalkDir::new(src) {
        let entry = result?;
        // strip_prefix() can't fail; every entry lives under `src`
        let relative = match entry.path().strip_prefix(src) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|err| {
                FileProcessingError::CreateDirectory {
                    path: target.clone(),
                    err,
                }
            })?;
        } else {
            std::fs::copy(entry.path(), &target).map_err(|err| FileProcessingError::Copy {
                from: entry.path().to_owned(),
                to: target.clone(),
                err,
            })?;
            debug!("Copied asset: {}", relative.display());
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_copy_assets() {
        let assets = TempDir::new().unwrap();
        let site = TempDir::new().unwrap();
        fs::create_dir_all(assets.path().join("styles").join("vendor")).unwrap();
        fs::create_dir_all(assets.path().join("fonts")).unwrap();
        fs::write(assets.path().join("styles").join("main.css"), "body {}").unwrap();
        fs::write(assets.path().join("styles").join("vendor").join("reset.css"), "*{}").unwrap();
        fs::write(assets.path().join("fonts").join("serif.woff2"), [0u8, 1, 2, 3]).unwrap();

        assert_eq!(3, copy_assets(assets.path(), site.path()).unwrap());
        assert_eq!(
            "*{}",
            fs::read_to_string(site.path().join("styles").join("vendor").join("reset.css")).unwrap()
        );
        assert_eq!(
            vec![0u8, 1, 2, 3],
            fs::read(site.path().join("fonts").join("serif.woff2")).unwrap()
        );
    }

    #[test]
    fn test_copy_overwrites() {
        let assets = TempDir::new().unwrap();
        let site = TempDir::new().unwrap();
        fs::create_dir_all(assets.path().join("styles")).unwrap();
        fs::create_dir_all(site.path().join("styles")).unwrap();
        fs::write(assets.path().join("styles").join("main.css"), "new").unwrap();
        fs::write(site.path().join("styles").join("main.css"), "old and longer").unwrap();

        copy_assets(assets.path(), site.path()).unwrap();
        assert_eq!(
            "new",
            fs::read_to_string(site.path().join("styles").join("main.css")).unwrap()
        );
    }

    #[test]
    fn test_write_bundled_assets() {
        let site = TempDir::new().unwrap();
        assert_eq!(1, write_bundled_assets(site.path()).unwrap());
        let css = fs::read_to_string(site.path().join("styles").join("main.css")).unwrap();
        assert_eq!(include_str!("../assets/styles/main.css"), css);
        assert!(!site.path().join("fonts").exists());
    }

    #[test]
    fn test_missing_source_is_not_an_error() {
        let assets = TempDir::new().unwrap();
        let site = TempDir::new().unwrap();
        assert_eq!(0, copy_assets(&assets.path().join("nope"), site.path()).unwrap());
        assert!(!site.path().join("styles").exists());
    }
}
