//! Rewrite command implementation.

use crate::cli::output::format_duration;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{FailurePolicy, Settings};
use crate::rewrite::{Progress, RewriteEngine, RewriteStatus};
use crate::source::{detect_source, read_file, ContentInput, SourceKind, SourceText};
use crate::style::StyleCatalog;
use anyhow::Result;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Options for the rewrite command, as given on the command line.
#[derive(Debug, Default)]
pub struct RewriteOptions {
    pub input: Option<String>,
    pub file: Option<String>,
    pub style: Option<String>,
    pub chunk_size: Option<usize>,
    pub output: Option<String>,
    pub on_failure: Option<FailurePolicy>,
    pub show_source: bool,
}

/// Run the rewrite command.
pub async fn run_rewrite(options: RewriteOptions, mut settings: Settings) -> Result<()> {
    // Reject bad style and size before touching the network
    let catalog = StyleCatalog::with_overrides(&settings.styles);
    let style_name = options
        .style
        .clone()
        .unwrap_or_else(|| settings.rewrite.default_style.clone());
    let directive = match catalog.directive_for(&style_name) {
        Ok(d) => d,
        Err(e) => {
            Output::error(&e.to_string());
            Output::info("Run 'restyle styles' to see the available styles.");
            return Err(e.into());
        }
    };

    let chunk_size = settings
        .rewrite
        .validate_chunk_size(options.chunk_size.unwrap_or(settings.rewrite.chunk_size))?;

    if let Some(policy) = options.on_failure {
        settings.rewrite.on_chunk_failure = policy;
    }

    if let Err(e) = preflight::check(Operation::Rewrite, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    let source = load_source(&options, &settings).await?;

    if options.show_source {
        Output::source_preview(source.title.as_deref(), &source.text);
    }

    Output::info(&format!(
        "Rewriting {} ({} chars) in '{}' style",
        source.kind,
        source.char_len(),
        directive.name
    ));

    let engine = RewriteEngine::from_settings(&settings)?;

    let pb = Output::progress_bar(0, "chunks");
    let reporter = {
        let pb = pb.clone();
        move |p: Progress| {
            pb.set_length(p.total as u64);
            pb.set_position(p.completed as u64);
        }
    };

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let started = Instant::now();
    let result = engine
        .rewrite(&source.text, &directive, chunk_size, &reporter, &cancel)
        .await;
    ctrl_c.abort();
    pb.finish_and_clear();
    let result = result?;

    if result.is_empty() {
        Output::warning("Nothing to rewrite.");
        return Ok(());
    }

    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| settings.default_output_path().display().to_string());
    write_output(&result.text(), &output_path)?;

    let elapsed = format_duration(started.elapsed().as_secs_f64());
    match result.status {
        RewriteStatus::Completed if result.is_complete() => {
            Output::success(&format!("{} in {}", result.summary(), elapsed));
        }
        RewriteStatus::Completed => {
            Output::warning(&format!("{} in {}", result.summary(), elapsed));
            Output::info("Failed sections are marked in the output.");
        }
        RewriteStatus::Cancelled => {
            Output::warning(&format!("Cancelled: {}. Partial output kept.", result.summary()));
        }
        RewriteStatus::Aborted => {
            Output::error(&format!("Aborted: {}", result.summary()));
            return Err(anyhow::anyhow!("Rewrite aborted after a failed chunk"));
        }
    }

    Ok(())
}

/// Resolve the command input into source text.
async fn load_source(options: &RewriteOptions, settings: &Settings) -> Result<SourceText> {
    if let Some(path) = &options.file {
        return Ok(read_file(&Settings::expand_path(path))?);
    }

    let input = options.input.as_deref().ok_or_else(|| {
        anyhow::anyhow!("Nothing to rewrite. Give a URL, some text, --file <path>, or '-' for stdin.")
    })?;

    if input == "-" {
        let text = std::io::read_to_string(std::io::stdin())?;
        return Ok(SourceText::new(SourceKind::Text, text).ensure_not_empty("stdin")?);
    }

    match ContentInput::parse(input) {
        ContentInput::Url(url) => {
            let source = detect_source(&url, settings);
            if source.kind() == SourceKind::Transcript {
                if let Err(e) = preflight::check(Operation::FetchTranscript, settings) {
                    Output::error(&e.to_string());
                    return Err(e.into());
                }
            }

            let spinner = Output::spinner(&format!("Fetching {}...", source.kind()));
            let fetched = source.fetch(&url).await;
            spinner.finish_and_clear();

            match fetched {
                Ok(text) => {
                    if let Some(title) = &text.title {
                        Output::info(&format!("Title: {}", title));
                    }
                    Ok(text)
                }
                Err(e) => {
                    Output::error(&format!("Failed to fetch content: {}", e));
                    Err(e.into())
                }
            }
        }
        ContentInput::Text(text) => {
            Ok(SourceText::new(SourceKind::Text, text).ensure_not_empty("input text")?)
        }
    }
}

/// Write text to a file, or stdout for "-".
pub(crate) fn write_output(text: &str, path: &str) -> Result<()> {
    if path == "-" {
        println!("{}", text);
        return Ok(());
    }

    let path = Settings::expand_path(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, text)?;
    Output::success(&format!(
        "Saved {} chars to {}",
        text.chars().count(),
        path.display()
    ));
    Ok(())
}
