//! Content sources for Restyle.
//!
//! Resolves user input (a video URL, an article URL or literal text) into plain text for the
//! rewrite pipeline.

mod article;
mod youtube;

pub use article::{extract_article, ArticleSource, ExtractedArticle};
pub use youtube::{
    parse_json3_transcript, select_track, CaptionFormat, CaptionTrack, VideoInfo,
    YoutubeTranscriptSource,
};

use crate::config::Settings;
use crate::error::{RestyleError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;

/// Where a piece of source text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Text given directly by the caller.
    Text,
    /// Text read from a local file.
    File,
    /// Video transcript.
    Transcript,
    /// Main text of a web page.
    Article,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Text => write!(f, "text"),
            SourceKind::File => write!(f, "file"),
            SourceKind::Transcript => write!(f, "transcript"),
            SourceKind::Article => write!(f, "article"),
        }
    }
}

/// Plain text to be rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceText {
    pub kind: SourceKind,
    /// Title, when the source provides one.
    pub title: Option<String>,
    pub text: String,
}

impl SourceText {
    pub fn new(kind: SourceKind, text: String) -> Self {
        Self {
            kind,
            title: None,
            text,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Number of characters of text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Fail with `ContentEmpty` if the text holds nothing but whitespace.
    pub fn ensure_not_empty(self, origin: &str) -> Result<Self> {
        if self.text.trim().is_empty() {
            return Err(RestyleError::ContentEmpty(origin.to_string()));
        }
        Ok(self)
    }
}

/// Trait for URL-based content sources.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Kind of text this source produces.
    fn kind(&self) -> SourceKind;

    /// Check if this source can handle the given URL.
    fn can_handle(&self, url: &url::Url) -> bool;

    /// Resolve a URL into plain text.
    async fn fetch(&self, url: &url::Url) -> Result<SourceText>;
}

/// Caller input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentInput {
    Url(url::Url),
    Text(String),
}

impl ContentInput {
    /// Treat http(s) URLs as URLs and everything else as literal text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match url::Url::parse(trimmed) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && !trimmed.contains(char::is_whitespace) => {
                ContentInput::Url(url)
            }
            _ => ContentInput::Text(input.to_string()),
        }
    }
}

/// Detect the appropriate source for a URL.
pub fn detect_source(url: &url::Url, settings: &Settings) -> Box<dyn ContentSource> {
    let youtube = YoutubeTranscriptSource::new(&settings.source);
    if youtube.can_handle(url) {
        return Box::new(youtube);
    }
    Box::new(ArticleSource::new(&settings.source))
}

/// Resolve caller input into non-empty source text.
pub async fn resolve_input(input: &str, settings: &Settings) -> Result<SourceText> {
    match ContentInput::parse(input) {
        ContentInput::Url(url) => {
            let source = detect_source(&url, settings);
            let text = source.fetch(&url).await?;
            text.ensure_not_empty(url.as_str())
        }
        ContentInput::Text(text) => {
            SourceText::new(SourceKind::Text, text).ensure_not_empty("input text")
        }
    }
}

/// Read source text from a local file.
pub fn read_file(path: &Path) -> Result<SourceText> {
    let text = std::fs::read_to_string(path)?;
    SourceText::new(SourceKind::File, text).ensure_not_empty(&path.display().to_string())
}
