//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{RestyleError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Rewriting requires an API key.
    Rewrite,
    /// Fetching a video transcript requires yt-dlp.
    FetchTranscript,
    /// Fetching an article or reading text has no external requirements.
    FetchArticle,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Rewrite => {
            settings.api_key()?;
        }
        Operation::FetchTranscript => {
            check_tool("yt-dlp")?;
        }
        Operation::FetchArticle => {}
    }
    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(RestyleError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RestyleError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(RestyleError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
