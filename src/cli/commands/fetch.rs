//! Fetch command implementation.

use super::rewrite::write_output;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::source::{detect_source, ContentInput, SourceKind};
use anyhow::Result;

/// Run the fetch command.
pub async fn run_fetch(input: &str, output: Option<String>, settings: Settings) -> Result<()> {
    let url = match ContentInput::parse(input) {
        ContentInput::Url(url) => url,
        ContentInput::Text(_) => {
            Output::error(&format!("Not an http(s) URL: {}", input));
            return Err(anyhow::anyhow!("Invalid URL"));
        }
    };

    let source = detect_source(&url, &settings);
    let operation = match source.kind() {
        SourceKind::Transcript => Operation::FetchTranscript,
        _ => Operation::FetchArticle,
    };
    if let Err(e) = preflight::check(operation, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    let spinner = Output::spinner(&format!("Fetching {}...", source.kind()));
    let fetched = source.fetch(&url).await;
    spinner.finish_and_clear();

    let text = match fetched {
        Ok(text) => text,
        Err(e) => {
            Output::error(&format!("Failed to fetch content: {}", e));
            return Err(e.into());
        }
    };

    if let Some(title) = &text.title {
        Output::info(&format!("Title: {}", title));
    }

    write_output(&text.text, output.as_deref().unwrap_or("-"))
}
