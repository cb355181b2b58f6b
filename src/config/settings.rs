//! Configuration settings for Restyle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub rewrite: RewriteSettings,
    pub source: SourceSettings,
    /// Extra or replacement style directives, keyed by style name.
    pub styles: BTreeMap<String, String>,
    pub prompts: PromptSettings,
    pub output: OutputSettings,
}

/// Text generation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Chat model used for rewriting.
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Alternative API base URL for OpenAI-compatible endpoints.
    pub api_base: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Timeout for a single generation call, in seconds.
    pub timeout_seconds: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_base: None,
            temperature: 0.7,
            timeout_seconds: 120,
        }
    }
}

impl GenerationSettings {
    /// Per-call timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// What to do when a chunk cannot be rewritten.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep going and report the failed chunks at the end.
    #[default]
    Continue,
    /// Stop at the first failed chunk.
    Abort,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            _ => Err(format!("Unknown failure policy: {}", s)),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Continue => write!(f, "continue"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Rewrite pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteSettings {
    /// Style used when none is given.
    pub default_style: String,
    /// Target chunk length in characters.
    pub chunk_size: usize,
    /// Smallest chunk size a caller may request.
    pub min_chunk_size: usize,
    /// Largest chunk size a caller may request.
    pub max_chunk_size: usize,
    /// Delay between generation calls, in milliseconds.
    pub pacing_ms: u64,
    /// Retries for rate-limited or transport failures.
    pub max_retries: u32,
    /// Initial retry backoff in milliseconds, doubled on every attempt.
    pub retry_backoff_ms: u64,
    /// Behaviour when a chunk fails.
    pub on_chunk_failure: FailurePolicy,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            default_style: "Natural".to_string(),
            chunk_size: 4000,
            min_chunk_size: 1000,
            max_chunk_size: 8000,
            pacing_ms: 500,
            max_retries: 2,
            retry_backoff_ms: 1000,
            on_chunk_failure: FailurePolicy::Continue,
        }
    }
}

impl RewriteSettings {
    /// Validate a requested chunk size against the configured range.
    pub fn validate_chunk_size(&self, chunk_size: usize) -> crate::error::Result<usize> {
        if chunk_size < self.min_chunk_size || chunk_size > self.max_chunk_size {
            return Err(crate::error::RestyleError::InvalidInput(format!(
                "Chunk size {} is outside the allowed range {}-{}",
                chunk_size, self.min_chunk_size, self.max_chunk_size
            )));
        }
        Ok(chunk_size)
    }
}

/// Content source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Transcript languages in order of preference.
    pub transcript_languages: Vec<String>,
    /// Timeout for article and caption downloads, in seconds.
    pub request_timeout_seconds: u64,
    /// User agent sent with article and caption downloads.
    pub user_agent: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            transcript_languages: vec!["vi".to_string(), "en".to_string()],
            request_timeout_seconds: 30,
            user_agent: concat!("restyle/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// File the rewritten text is saved to when no output is given.
    pub default_file: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            default_file: "rewritten_content.txt".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::RestyleError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("restyle")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded default output file path.
    pub fn default_output_path(&self) -> PathBuf {
        Self::expand_path(&self.output.default_file)
    }

    /// Read the API key from the configured environment variable.
    ///
    /// Fails if the variable is unset or empty; there is no fallback key.
    pub fn api_key(&self) -> crate::error::Result<String> {
        let var = &self.generation.api_key_env;
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            Ok(_) => Err(crate::error::RestyleError::Config(format!(
                "{} is empty. Set it with: export {}='...'",
                var, var
            ))),
            Err(_) => Err(crate::error::RestyleError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                var, var
            ))),
        }
    }
}
