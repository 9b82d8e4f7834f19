//! Builds the [`Page`]s for a run: one home page listing every article and one
//! page per article. This is also where the output layout lives; the same
//! helpers compute the file path an article page is written to and the link the
//! home page uses for it, so the two can't drift apart.

use crate::article::Article;
use crate::template::TemplateId;
use chrono::Datelike;
use gtmpl::Value;
use pulldown_cmark::escape::escape_html;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The key-value context handed to a template.
pub type PageContext = HashMap<String, Value>;

/// The directory (relative to the site root) that holds article pages.
pub const ARTICLES_DIRECTORY: &str = "articles";

const HOME_FILE_NAME: &str = "index.html";
const HTML_EXTENSION: &str = ".html";

/// An output HTML file that hasn't been rendered yet.
#[derive(Clone, Debug)]
pub struct Page {
    /// The template with which the page will be rendered.
    pub template: TemplateId,

    /// The values made available to the template.
    pub context: PageContext,

    /// The target location on disk for the output file.
    pub file_path: PathBuf,
}

/// A home page entry for one article.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleListEntry {
    pub title: String,

    /// `{year}/{MonthName}/{SanitizedTitle}.html`, relative to the
    /// `articles` directory.
    pub link: String,
}

impl From<&Article> for ArticleListEntry {
    fn from(article: &Article) -> ArticleListEntry {
        ArticleListEntry {
            title: article.title.clone(),
            link: article_link(article),
        }
    }
}

impl From<&ArticleListEntry> for Value {
    /// Converts [`ArticleListEntry`]s into [`Value`]s for templating.
    fn from(entry: &ArticleListEntry) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), text(&entry.title));
        m.insert("link".to_owned(), Value::String(entry.link.clone()));
        Value::Object(m)
    }
}

impl From<&Article> for Value {
    /// Converts [`Article`]s into [`Value`]s for templating. The date is
    /// rendered as `YYYY-MM-DD`; `bodyHtml` is already HTML and goes in as-is.
    fn from(article: &Article) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), text(&article.title));
        m.insert(
            "createdAt".to_owned(),
            Value::String(article.created_at.format("%Y-%m-%d").to_string()),
        );
        m.insert("bodyHtml".to_owned(), Value::String(article.body_html.clone()));
        Value::Object(m)
    }
}

/// Wraps plain text for a template, HTML-escaped. The templates insert values
/// verbatim, so every non-HTML field must pass through here.
fn text(value: &str) -> Value {
    let mut escaped = String::with_capacity(value.len());
    // writing into a String can't fail
    let _ = escape_html(&mut escaped, value);
    Value::String(escaped)
}

/// Removes ASCII punctuation and all whitespace from `title`. Letters, digits,
/// and any other characters (e.g., non-ASCII symbols) are kept as-is.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
        .collect()
}

/// The full English month name in title case (`January` .. `December`). Both
/// directory names and links go through this function.
pub fn month_name(article: &Article) -> String {
    article.created_at.format("%B").to_string()
}

/// The home page link for `article`, relative to the `articles` directory.
pub fn article_link(article: &Article) -> String {
    format!(
        "{}/{}/{}{}",
        article.created_at.year(),
        month_name(article),
        sanitize_title(&article.title),
        HTML_EXTENSION,
    )
}

/// The file `article`'s page is written to under `site_root`. Always
/// `{site_root}/articles/` joined with [`article_link`].
pub fn article_file_path(site_root: &Path, article: &Article) -> PathBuf {
    site_root
        .join(ARTICLES_DIRECTORY)
        .join(article.created_at.year().to_string())
        .join(month_name(article))
        .join(format!("{}{}", sanitize_title(&article.title), HTML_EXTENSION))
}

/// Builds the home page. `articles` must already be newest first; the listing
/// keeps that order.
pub fn home_page(site_root: &Path, blog_name: &str, blog_bio: &str, articles: &[Article]) -> Page {
    let mut context = PageContext::new();
    context.insert("blog_name".to_owned(), text(blog_name));
    context.insert("blog_bio".to_owned(), text(blog_bio));
    context.insert(
        "article_list".to_owned(),
        Value::Array(
            articles
                .iter()
                .map(|article| Value::from(&ArticleListEntry::from(article)))
                .collect(),
        ),
    );
    Page {
        template: TemplateId::Home,
        context,
        file_path: site_root.join(HOME_FILE_NAME),
    }
}

/// Builds one page per article.
pub fn article_pages<'a>(
    site_root: &'a Path,
    blog_name: &'a str,
    articles: &'a [Article],
) -> impl Iterator<Item = Page> + 'a {
    articles.iter().map(move |article| {
        let mut context = PageContext::new();
        context.insert("blog_name".to_owned(), text(blog_name));
        context.insert("article".to_owned(), Value::from(article));
        Page {
            template: TemplateId::Article,
            context,
            file_path: article_file_path(site_root, article),
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn article(title: &str, y: i32, m: u32, d: u32) -> Article {
        Article {
            title: title.to_owned(),
            created_at: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            body_html: String::from("<p>body</p>"),
        }
    }

    fn string(value: &Value) -> &str {
        match value {
            Value::String(s) => s,
            other => panic!("expected a string, got {:?}", other),
        }
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!("HelloWorld", sanitize_title("Hello, World!"));
        assert_eq!("myarticle", sanitize_title("my-article"));
        assert_eq!("tabsandnewlines", sanitize_title("tabs\tand\nnewlines"));
        assert_eq!("Café2024", sanitize_title("Café (2024)"));
        assert_eq!("", sanitize_title("?!"));
    }

    #[test]
    fn test_link_and_file_path_agree() {
        let article = article("Hello, World!", 2023, 12, 1);
        assert_eq!("2023/December/HelloWorld.html", article_link(&article));
        assert_eq!(
            Path::new("/site/articles/2023/December/HelloWorld.html"),
            article_file_path(Path::new("/site"), &article)
        );
        assert_eq!(
            Path::new("/site").join(ARTICLES_DIRECTORY).join(article_link(&article)),
            article_file_path(Path::new("/site"), &article)
        );
    }

    #[test]
    fn test_month_names_are_title_case() {
        assert_eq!("January", month_name(&article("a", 2020, 1, 1)));
        assert_eq!("September", month_name(&article("a", 2020, 9, 30)));
    }

    #[test]
    fn test_home_page_keeps_order() {
        let articles = vec![
            article("Newest", 2023, 6, 15),
            article("Middle", 2023, 1, 1),
            article("Oldest", 2022, 12, 31),
        ];
        let page = home_page(Path::new("/site"), "Blog", "Bio", &articles);

        assert_eq!(TemplateId::Home, page.template);
        assert_eq!(Path::new("/site/index.html"), page.file_path);
        assert_eq!("Blog", string(&page.context["blog_name"]));
        assert_eq!("Bio", string(&page.context["blog_bio"]));
        let titles: Vec<&str> = match &page.context["article_list"] {
            Value::Array(entries) => entries
                .iter()
                .map(|entry| match entry {
                    Value::Object(m) => string(&m["title"]),
                    other => panic!("expected an object, got {:?}", other),
                })
                .collect(),
            other => panic!("expected an array, got {:?}", other),
        };
        assert_eq!(vec!["Newest", "Middle", "Oldest"], titles);
    }

    #[test]
    fn test_home_page_empty() {
        let page = home_page(Path::new("/site"), "Blog", "Bio", &[]);
        match &page.context["article_list"] {
            Value::Array(entries) => assert!(entries.is_empty()),
            other => panic!("expected an array, got {:?}", other),
        }
    }

    #[test]
    fn test_article_pages() {
        let articles = vec![article("First post", 2021, 3, 9)];
        let pages: Vec<Page> = article_pages(Path::new("/site"), "Blog", &articles).collect();
        assert_eq!(1, pages.len());
        assert_eq!(TemplateId::Article, pages[0].template);
        assert_eq!(
            Path::new("/site/articles/2021/March/Firstpost.html"),
            pages[0].file_path
        );
        match &pages[0].context["article"] {
            Value::Object(m) => {
                assert_eq!("First post", string(&m["title"]));
                assert_eq!("2021-03-09", string(&m["createdAt"]));
                assert_eq!("<p>body</p>", string(&m["bodyHtml"]));
            }
            other => panic!("expected an object, got {:?}", other),
        }
    }

    #[test]
    fn test_text_fields_are_escaped() {
        let mut articles = vec![article("R&D <script>x", 2023, 12, 1)];
        articles[0].body_html = String::from("<p>a &amp; b</p>");

        let home = home_page(Path::new("/site"), "Tom & Jerry", "<b>bio</b>", &articles);
        assert_eq!("Tom &amp; Jerry", string(&home.context["blog_name"]));
        assert_eq!("&lt;b&gt;bio&lt;/b&gt;", string(&home.context["blog_bio"]));
        match &home.context["article_list"] {
            Value::Array(entries) => match &entries[0] {
                Value::Object(m) => {
                    assert_eq!("R&amp;D &lt;script&gt;x", string(&m["title"]));
                    assert_eq!("2023/December/RDscriptx.html", string(&m["link"]));
                }
                other => panic!("expected an object, got {:?}", other),
            },
            other => panic!("expected an array, got {:?}", other),
        }

        let pages: Vec<Page> = article_pages(Path::new("/site"), "Tom & Jerry", &articles).collect();
        assert_eq!("Tom &amp; Jerry", string(&pages[0].context["blog_name"]));
        match &pages[0].context["article"] {
            Value::Object(m) => {
                assert_eq!("R&amp;D &lt;script&gt;x", string(&m["title"]));
                assert_eq!("<p>a &amp; b</p>", string(&m["bodyHtml"]));
            }
            other => panic!("expected an object, got {:?}", other),
        }
    }
}
