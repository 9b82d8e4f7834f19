//! The Markdown-to-HTML seam. Article assembly only depends on the
//! [`MarkdownConverter`] trait so tests can substitute their own converter;
//! [`CommonMark`] is the production implementation backed by
//! [`pulldown_cmark`].

use pulldown_cmark::{html, Options, Parser};

/// Converts Markdown source into an HTML fragment. Implementations must be
/// deterministic and free of side effects: identical input yields identical
/// output. `Sync` is required since assembly may run on a worker pool.
pub trait MarkdownConverter: Sync {
    fn to_html(&self, markdown: &str) -> String;
}

/// Plain CommonMark rendering with no extensions enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonMark;

impl MarkdownConverter for CommonMark {
    fn to_html(&self, markdown: &str) -> String {
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(markdown, Options::empty()));
        out
    }
}
