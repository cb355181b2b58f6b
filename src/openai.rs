//! OpenAI client configuration.

use crate::config::Settings;
use crate::error::{RestyleError, Result};
use async_openai::{config::OpenAIConfig, Client};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use std::time::Duration;

/// Create an OpenAI client from settings.
///
/// The API key comes from the environment variable named in `generation.api_key_env`;
/// a missing key is an error.
pub fn create_client(settings: &Settings) -> Result<Client<OpenAIConfig>> {
    let api_key = settings.api_key()?;

    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = settings.generation.api_base.as_deref() {
        config = config.with_api_base(base);
    }

    create_client_with_timeout(config, settings.generation.timeout())
}

/// Create an OpenAI client with a custom HTTP timeout.
///
/// The client makes a single attempt per request; retries belong to the rewrite engine.
pub fn create_client_with_timeout(
    config: OpenAIConfig,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RestyleError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(config)
        .with_http_client(http_client)
        .with_backoff(no_retry_backoff()))
}

/// Backoff that gives up on the first failure.
fn no_retry_backoff() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}
