//! Restyle CLI entry point.

use anyhow::Result;
use clap::Parser;
use restyle::cli::{commands, Cli, Commands};
use restyle::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("restyle={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match cli.command {
        Commands::Rewrite {
            input,
            file,
            style,
            chunk_size,
            output,
            on_failure,
            show_source,
        } => {
            let options = commands::RewriteOptions {
                input,
                file,
                style,
                chunk_size,
                output,
                on_failure,
                show_source,
            };
            commands::run_rewrite(options, settings).await?;
        }

        Commands::Styles => {
            commands::run_styles(&settings)?;
        }

        Commands::Fetch { url, output } => {
            commands::run_fetch(&url, output, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(&host, port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings)?;
        }
    }

    Ok(())
}
