//! Web article source.
//!
//! Downloads a page and extracts its main text: the first `<article>`, else `<main>`, else
//! `<body>`. Headings, paragraphs, list items and quotes become blank-line separated blocks.

use super::{ContentSource, SourceKind, SourceText};
use crate::config::SourceSettings;
use crate::error::{RestyleError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument};

const BLOCK_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p, li, blockquote, pre";
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "blockquote", "pre",
];
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Text extracted from an HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: Option<String>,
    pub text: String,
}

/// Article source backed by reqwest and scraper.
#[derive(Debug, Clone)]
pub struct ArticleSource {
    timeout: Duration,
    user_agent: String,
}

impl ArticleSource {
    pub fn new(settings: &SourceSettings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.request_timeout_seconds),
            user_agent: settings.user_agent.clone(),
        }
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| RestyleError::Fetch(format!("Failed to create HTTP client: {}", e)))
    }
}

impl Default for ArticleSource {
    fn default() -> Self {
        Self::new(&SourceSettings::default())
    }
}

#[async_trait]
impl ContentSource for ArticleSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Article
    }

    fn can_handle(&self, url: &url::Url) -> bool {
        matches!(url.scheme(), "http" | "https")
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn fetch(&self, url: &url::Url) -> Result<SourceText> {
        info!("Downloading article");
        let client = self.build_client()?;

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RestyleError::Fetch(format!("Could not reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RestyleError::Fetch(format!("HTTP {} from {}", status, url)));
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            let mime = content_type.split(';').next().unwrap_or(content_type).trim();
            if !is_html(mime) {
                return Err(RestyleError::UnsupportedSource(format!(
                    "{} is {}, not an HTML page",
                    url, mime
                )));
            }
        }

        let html = response.text().await?;
        let article = extract_article(&html);
        debug!("Extracted {} chars", article.text.len());

        SourceText::new(SourceKind::Article, article.text)
            .with_title(article.title)
            .ensure_not_empty(url.as_str())
    }
}

fn is_html(mime: &str) -> bool {
    mime.eq_ignore_ascii_case("text/html") || mime.eq_ignore_ascii_case("application/xhtml+xml")
}

/// Extract the title and main text of an HTML document.
pub fn extract_article(html: &str) -> ExtractedArticle {
    let doc = Html::parse_document(html);

    let title = select_first(&doc, "title")
        .map(visible_text)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            select_first(&doc, "h1")
                .map(visible_text)
                .filter(|t| !t.is_empty())
        });

    let container = select_first(&doc, "article")
        .or_else(|| select_first(&doc, "main"))
        .or_else(|| select_first(&doc, "body"))
        .unwrap_or_else(|| doc.root_element());

    let blocks = Selector::parse(BLOCK_SELECTOR)
        .map(|sel| {
            container
                .select(&sel)
                .filter(|el| !inside_block(el))
                .map(visible_text)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let text = if blocks.is_empty() {
        visible_text(container)
    } else {
        blocks.join("\n\n")
    };

    ExtractedArticle { title, text }
}

fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).next()
}

/// True if a block element is nested in another block element (its text is already counted).
fn inside_block(el: &ElementRef<'_>) -> bool {
    el.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|e| BLOCK_TAGS.contains(&e.name()))
    })
}

/// Text content without script/style, with whitespace collapsed.
fn visible_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in el.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN_TAGS.contains(&e.name()))
        });
        if !hidden {
            raw.push_str(text);
            raw.push(' ');
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_article_element() {
        let html = r#"
            <html><head><title>Daily News</title></head>
            <body>
              <nav><ul><li>Home</li><li>World</li></ul></nav>
              <article>
                <h1>Rivers rise</h1>
                <p>The river rose   two metres overnight.</p>
                <p>Residents were <b>evacuated</b> early.</p>
                <script>trackPageView();</script>
              </article>
              <footer><p>Copyright</p></footer>
            </body></html>
        "#;

        let article = extract_article(html);
        assert_eq!(article.title.as_deref(), Some("Daily News"));
        assert_eq!(
            article.text,
            "Rivers rise\n\nThe river rose two metres overnight.\n\nResidents were evacuated early."
        );
    }

    #[test]
    fn test_falls_back_to_main_then_body() {
        let html = "<html><body><main><p>Main text.</p></main><p>Other.</p></body></html>";
        assert_eq!(extract_article(html).text, "Main text.");

        let html = "<html><body><p>One.</p><p>Two.</p></body></html>";
        assert_eq!(extract_article(html).text, "One.\n\nTwo.");
    }

    #[test]
    fn test_nested_blocks_not_duplicated() {
        let html = "<article><ul><li><p>Item one</p></li><li>Item two</li></ul></article>";
        assert_eq!(extract_article(html).text, "Item one\n\nItem two");
    }

    #[test]
    fn test_plain_body_without_blocks() {
        let html = "<html><head><style>body{}</style></head><body><div>Just a div</div></body></html>";
        let article = extract_article(html);
        assert_eq!(article.text, "Just a div");
        assert_eq!(article.title, None);
    }

    #[test]
    fn test_title_falls_back_to_heading() {
        let html = "<html><body><h1>Heading title</h1><p>Body.</p></body></html>";
        assert_eq!(extract_article(html).title.as_deref(), Some("Heading title"));
    }
}
