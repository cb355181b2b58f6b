//! CLI module for Restyle.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::FailurePolicy;
use clap::{Parser, Subcommand};

/// Restyle - rewrite transcripts, articles and text in a different writing style
///
/// Fetches a YouTube transcript or web article (or takes text directly), splits it into chunks
/// and rewrites each chunk with a language model in the chosen style.
#[derive(Parser, Debug)]
#[command(name = "restyle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite content in a chosen style
    Rewrite {
        /// YouTube URL, article URL, literal text, or '-' to read stdin
        input: Option<String>,

        /// Read the text to rewrite from a file
        #[arg(short, long, conflicts_with = "input")]
        file: Option<String>,

        /// Writing style (see 'restyle styles')
        #[arg(short, long)]
        style: Option<String>,

        /// Chunk length in characters
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Output file ('-' for stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// What to do when a chunk fails (continue, abort)
        #[arg(long)]
        on_failure: Option<FailurePolicy>,

        /// Print the original content before rewriting
        #[arg(long)]
        show_source: bool,
    },

    /// List the available writing styles
    Styles,

    /// Fetch the plain text of a URL without rewriting it
    Fetch {
        /// YouTube or article URL
        url: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rewrite_command() {
        let cli = Cli::try_parse_from([
            "restyle",
            "rewrite",
            "https://youtu.be/dQw4w9WgXcQ",
            "--style",
            "Blog",
            "--chunk-size",
            "2000",
            "--on-failure",
            "abort",
            "-o",
            "-",
        ])
        .unwrap();

        match cli.command {
            Commands::Rewrite {
                input,
                style,
                chunk_size,
                on_failure,
                output,
                ..
            } => {
                assert_eq!(input.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
                assert_eq!(style.as_deref(), Some("Blog"));
                assert_eq!(chunk_size, Some(2000));
                assert_eq!(on_failure, Some(FailurePolicy::Abort));
                assert_eq!(output.as_deref(), Some("-"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_file_conflicts_with_input() {
        let result = Cli::try_parse_from(["restyle", "rewrite", "text", "--file", "a.txt"]);
        assert!(result.is_err());
    }
}
