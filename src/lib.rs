//! The library code for the `markblog` static blog generator. A run turns a
//! directory of `YYYY-MM-DD_<title>.md` files into a site in three steps:
//!
//! 1. Loading articles from source files on disk ([`crate::repository`],
//!    built on [`crate::metadata`], [`crate::markdown`], and
//!    [`crate::article`])
//! 2. Rendering the home page and one page per article ([`crate::page`],
//!    [`crate::template`], [`crate::write`])
//! 3. Copying the static assets ([`crate::assets`])
//!
//! [`crate::build::build_site`] sequences the three. Source files that can't
//! be parsed are logged and left out; anything that goes wrong while writing
//! the output ends the run.
//!
//! The output layout is:
//!
//! ```text
//! {site_path}/index.html
//! {site_path}/articles/{year}/{MonthName}/{SanitizedTitle}.html
//! {site_path}/styles/**
//! {site_path}/fonts/**
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod article;
pub mod assets;
pub mod build;
pub mod config;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod metadata;
pub mod page;
pub mod repository;
pub mod template;
pub mod write;
