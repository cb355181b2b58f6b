//! The chunked rewrite pipeline.
//!
//! [`RewriteEngine`] splits text into chunks, sends each one through a [`TextGenerator`] with a
//! style directive, reports progress after every chunk and paces consecutive calls.
//!
//! Chunks are processed strictly in order. Each generation call runs under a timeout;
//! rate-limit and transport failures are retried with exponential backoff. A chunk that still
//! fails is recorded as [`ChunkOutcome::Failed`] and, depending on the [`FailurePolicy`], the
//! run either continues or stops. Cancellation is checked before every chunk.

mod pacing;
mod progress;
mod result;

pub use pacing::{FixedIntervalPacer, NoPacing, Pacer};
pub use progress::{ChannelReporter, NoProgress, Progress, ProgressReporter};
pub use result::{ChunkOutcome, ChunkResult, RewriteResult, RewriteStatus};

use crate::chunking::{split_into_chunks, Chunk};
use crate::config::{FailurePolicy, Prompts, Settings};
use crate::error::{RestyleError, Result};
use crate::generation::{GenerationError, OpenAIGenerator, TextGenerator};
use crate::style::{StyleCatalog, StyleDirective};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Tunables for a rewrite run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on a single generation call.
    pub call_timeout: Duration,
    /// Retries for transient failures.
    pub max_retries: u32,
    /// First retry delay; doubles on every retry.
    pub retry_backoff: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(120),
            max_retries: 2,
            retry_backoff: Duration::from_secs(1),
            failure_policy: FailurePolicy::Continue,
        }
    }
}

impl EngineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            call_timeout: settings.generation.timeout(),
            max_retries: settings.rewrite.max_retries,
            retry_backoff: Duration::from_millis(settings.rewrite.retry_backoff_ms),
            failure_policy: settings.rewrite.on_chunk_failure,
        }
    }
}

/// A style directive paired with one chunk, used to build a single prompt.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRequest<'a> {
    pub directive: &'a StyleDirective,
    pub chunk: &'a Chunk,
}

impl RewriteRequest<'_> {
    /// Render the rewrite prompt for this chunk.
    pub fn prompt(&self, prompts: &Prompts) -> String {
        let mut vars = HashMap::new();
        vars.insert("directive".to_string(), self.directive.directive.clone());
        vars.insert("style".to_string(), self.directive.name.clone());
        vars.insert("chunk".to_string(), self.chunk.content.clone());
        prompts.render_with_custom(&prompts.rewrite.template, &vars)
    }
}

/// Sequential rewrite driver.
pub struct RewriteEngine {
    generator: Arc<dyn TextGenerator>,
    pacer: Arc<dyn Pacer>,
    prompts: Prompts,
    config: EngineConfig,
}

impl RewriteEngine {
    /// Create an engine with default prompts and configuration.
    pub fn new(generator: Arc<dyn TextGenerator>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            generator,
            pacer,
            prompts: Prompts::default(),
            config: EngineConfig::default(),
        }
    }

    /// Create an engine backed by OpenAI, paced and configured from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let generator: Arc<dyn TextGenerator> = Arc::new(OpenAIGenerator::from_settings(settings)?);
        let pacer: Arc<dyn Pacer> = Arc::new(FixedIntervalPacer::from_millis(settings.rewrite.pacing_ms));

        Ok(Self::new(generator, pacer)
            .with_prompts(prompts)
            .with_config(EngineConfig::from_settings(settings)))
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve a style by name, then rewrite. Unknown styles fail before any generation call.
    pub async fn rewrite_styled(
        &self,
        text: &str,
        catalog: &StyleCatalog,
        style: &str,
        chunk_size: usize,
        reporter: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<RewriteResult> {
        let directive = catalog.directive_for(style)?;
        self.rewrite(text, &directive, chunk_size, reporter, cancel).await
    }

    /// Rewrite `text` chunk by chunk in the given style.
    #[instrument(skip(self, text, directive, reporter, cancel), fields(style = %directive.name, chars = text.chars().count()))]
    pub async fn rewrite(
        &self,
        text: &str,
        directive: &StyleDirective,
        chunk_size: usize,
        reporter: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<RewriteResult> {
        if chunk_size == 0 {
            return Err(RestyleError::InvalidInput(
                "Chunk size must be at least 1".to_string(),
            ));
        }

        let chunks = split_into_chunks(text, chunk_size);
        if chunks.is_empty() {
            debug!("Nothing to rewrite");
            return Ok(RewriteResult::empty());
        }

        let total = chunks.len();
        info!(
            "Rewriting {} chunks with {} (style: {})",
            total,
            self.generator.model(),
            directive.name
        );

        let mut results = Vec::with_capacity(total);
        let mut status = RewriteStatus::Completed;

        for (i, chunk) in chunks.iter().enumerate() {
            if cancel.is_cancelled() {
                info!("Rewrite cancelled after {} of {} chunks", i, total);
                status = RewriteStatus::Cancelled;
                break;
            }

            let prompt = RewriteRequest { directive, chunk }.prompt(&self.prompts);
            debug!("Chunk {}/{} ({} chars)", chunk.position, total, chunk.char_len());

            let (attempts, outcome) = self.rewrite_chunk(&prompt, cancel).await;
            let failed = outcome.is_failed();
            if let ChunkOutcome::Failed(err) = &outcome {
                warn!("Chunk {} failed after {} attempt(s): {}", chunk.position, attempts, err);
            }

            results.push(ChunkResult {
                position: chunk.position,
                attempts,
                outcome,
            });
            reporter.report(Progress {
                completed: i + 1,
                total,
            });

            if failed && self.config.failure_policy == FailurePolicy::Abort {
                status = RewriteStatus::Aborted;
                break;
            }

            if i + 1 < total {
                tokio::select! {
                    _ = self.pacer.pace() => {}
                    _ = cancel.cancelled() => {}
                }
            }
        }

        let result = RewriteResult {
            chunks: results,
            total_chunks: total,
            status,
        };
        info!("{}", result.summary());
        Ok(result)
    }

    /// Generate one chunk, retrying transient failures. Returns the attempt count and outcome.
    async fn rewrite_chunk(&self, prompt: &str, cancel: &CancellationToken) -> (u32, ChunkOutcome) {
        let mut attempts = 0;
        let mut backoff = self.config.retry_backoff;

        loop {
            attempts += 1;
            let result = match tokio::time::timeout(
                self.config.call_timeout,
                self.generator.generate(prompt),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(GenerationError::Timeout(self.config.call_timeout)),
            };

            match result {
                Ok(text) => return (attempts, ChunkOutcome::Rewritten(text)),
                Err(err) if err.is_transient() && attempts <= self.config.max_retries => {
                    warn!("Attempt {} failed ({}), retrying in {:?}", attempts, err, backoff);
                    tokio::select! {
                        _ = tokio::time::sleep(backoff) => {}
                        _ = cancel.cancelled() => return (attempts, ChunkOutcome::Failed(err)),
                    }
                    backoff = backoff.saturating_mul(2);
                }
                Err(err) => return (attempts, ChunkOutcome::Failed(err)),
            }
        }
    }
}
