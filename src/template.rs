//! The template-rendering seam. Pages are rendered through the
//! [`TemplateRenderer`] trait; [`GtmplRenderer`] is the production
//! implementation, which compiles the Go-style templates bundled with the
//! crate.

use crate::page::PageContext;
use gtmpl::{Template, Value};
use std::fmt;

const HOME_TEMPLATE: &str = include_str!("../templates/home.html");
const ARTICLE_TEMPLATE: &str = include_str!("../templates/article.html");

/// Names one of the two page templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// Expects `blog_name`, `blog_bio`, and `article_list` (a list of
    /// `{title, link}` objects).
    Home,

    /// Expects `blog_name` and `article` (`{title, createdAt, bodyHtml}`).
    Article,
}

impl TemplateId {
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Home => "home",
            TemplateId::Article => "article",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders a named template against a context.
pub trait TemplateRenderer {
    fn render(&self, template: TemplateId, context: &PageContext) -> Result<String>;
}

/// Renders the bundled templates with [`gtmpl`]. Both templates are compiled
/// up front by [`GtmplRenderer::new`].
pub struct GtmplRenderer {
    home: Template,
    article: Template,
}

impl GtmplRenderer {
    pub fn new() -> Result<GtmplRenderer> {
        Ok(GtmplRenderer {
            home: parse_template(TemplateId::Home, HOME_TEMPLATE)?,
            article: parse_template(TemplateId::Article, ARTICLE_TEMPLATE)?,
        })
    }

    /// Compiles caller-provided template sources instead of the bundled
    /// ones.
    pub fn from_sources(home: &str, article: &str) -> Result<GtmplRenderer> {
        Ok(GtmplRenderer {
            home: parse_template(TemplateId::Home, home)?,
            article: parse_template(TemplateId::Article, article)?,
        })
    }
}

impl TemplateRenderer for GtmplRenderer {
    fn render(&self, template: TemplateId, context: &PageContext) -> Result<String> {
        let compiled = match template {
            TemplateId::Home => &self.home,
            TemplateId::Article => &self.article,
        };
        let render_error = |message: String| Error::Render { template, message };

        let context = gtmpl::Context::from(Value::Object(context.clone()))
            .map_err(|e| render_error(e.to_string()))?;
        let mut out: Vec<u8> = Vec::new();
        compiled
            .execute(&mut out, &context)
            .map_err(|e| render_error(e.to_string()))?;
        String::from_utf8(out).map_err(|e| render_error(e.to_string()))
    }
}

fn parse_template(id: TemplateId, source: &str) -> Result<Template> {
    let mut template = Template::default();
    template.parse(source).map_err(|e| Error::Parse {
        template: id,
        message: e.to_string(),
    })?;
    Ok(template)
}

/// The result of a template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem compiling or executing a template.
#[derive(Debug)]
pub enum Error {
    /// Returned when a template fails to compile.
    Parse { template: TemplateId, message: String },

    /// Returned when a compiled template fails to execute against a
    /// context.
    Render { template: TemplateId, message: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse { template, message } => {
                write!(f, "Parsing template '{}': {}", template, message)
            }
            Error::Render { template, message } => {
                write!(f, "Rendering template '{}': {}", template, message)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
