//! Restyle - chunked rewriting of transcripts, articles and text
//!
//! A CLI tool and library that takes long-form content and rewrites it in a chosen writing style
//! with a language model, one chunk at a time.
//!
//! # Overview
//!
//! Restyle allows you to:
//! - Fetch a YouTube transcript or the main text of a web article
//! - Split long text into word-preserving chunks
//! - Rewrite every chunk in a named style (Natural, Academic, Blog, ...)
//! - Follow progress and cancel long runs between chunks
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `source` - Content sources (YouTube transcripts, articles, files)
//! - `chunking` - Word-preserving chunking
//! - `style` - Style catalog
//! - `generation` - Text generation clients
//! - `rewrite` - The rewrite engine, pacing and progress
//!
//! # Example
//!
//! ```rust,no_run
//! use restyle::config::Settings;
//! use restyle::rewrite::{NoProgress, RewriteEngine};
//! use restyle::source::resolve_input;
//! use restyle::style::StyleCatalog;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let engine = RewriteEngine::from_settings(&settings)?;
//!     let source = resolve_input("https://youtu.be/dQw4w9WgXcQ", &settings).await?;
//!
//!     let result = engine
//!         .rewrite_styled(
//!             &source.text,
//!             &StyleCatalog::builtin(),
//!             "Blog",
//!             4000,
//!             &NoProgress,
//!             &CancellationToken::new(),
//!         )
//!         .await?;
//!     println!("{}", result.text());
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod openai;
pub mod rewrite;
pub mod source;
pub mod style;

pub use error::{RestyleError, Result};
