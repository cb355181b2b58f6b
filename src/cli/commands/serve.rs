//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for listing styles and rewriting content.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::RestyleError;
use crate::rewrite::{NoProgress, RewriteEngine, RewriteResult, RewriteStatus};
use crate::source::resolve_input;
use crate::style::StyleCatalog;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Shared application state.
struct AppState {
    engine: RewriteEngine,
    catalog: StyleCatalog,
    settings: Settings,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Rewrite, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    let state = Arc::new(AppState {
        engine: RewriteEngine::from_settings(&settings)?,
        catalog: StyleCatalog::with_overrides(&settings.styles),
        settings,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/styles", get(list_styles))
        .route("/rewrite", post(rewrite))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Restyle API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Styles", "GET  /styles");
    Output::kv("Rewrite", "POST /rewrite");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct RewriteRequest {
    /// YouTube URL, article URL or literal text
    input: String,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    chunk_size: Option<usize>,
}

#[derive(Serialize)]
struct RewriteResponse {
    text: String,
    chunks: usize,
    failed_chunks: Vec<usize>,
    status: RewriteStatus,
}

impl From<RewriteResult> for RewriteResponse {
    fn from(result: RewriteResult) -> Self {
        Self {
            text: result.text(),
            chunks: result.total_chunks,
            failed_chunks: result.failed_positions(),
            status: result.status,
        }
    }
}

#[derive(Serialize)]
struct StyleInfo {
    name: String,
    directive: String,
    default: bool,
}

#[derive(Serialize)]
struct StylesResponse {
    styles: Vec<StyleInfo>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Map a library error onto an HTTP status.
fn status_for(err: &RestyleError) -> StatusCode {
    if err.is_source_error() {
        StatusCode::BAD_GATEWAY
    } else if matches!(err, RestyleError::Config(_) | RestyleError::Io(_)) {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_styles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let default_style = &state.settings.rewrite.default_style;
    Json(StylesResponse {
        styles: state
            .catalog
            .entries()
            .iter()
            .map(|s| StyleInfo {
                name: s.name.clone(),
                directive: s.directive.clone(),
                default: s.name.eq_ignore_ascii_case(default_style),
            })
            .collect(),
    })
}

async fn rewrite(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RewriteRequest>,
) -> Response {
    if req.input.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Input must not be empty");
    }

    let style = req
        .style
        .unwrap_or_else(|| state.settings.rewrite.default_style.clone());
    let directive = match state.catalog.directive_for(&style) {
        Ok(d) => d,
        Err(e) => return error_response(status_for(&e), e),
    };

    let requested = req.chunk_size.unwrap_or(state.settings.rewrite.chunk_size);
    let chunk_size = match state.settings.rewrite.validate_chunk_size(requested) {
        Ok(size) => size,
        Err(e) => return error_response(status_for(&e), e),
    };

    let source = match resolve_input(&req.input, &state.settings).await {
        Ok(source) => source,
        Err(e) => {
            warn!("Failed to resolve input: {}", e);
            return error_response(status_for(&e), e);
        }
    };

    info!(
        "Rewriting {} ({} chars) in '{}' style",
        source.kind,
        source.char_len(),
        directive.name
    );

    // A dropped request stops the run between chunks.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match state
        .engine
        .rewrite(&source.text, &directive, chunk_size, &NoProgress, &cancel)
        .await
    {
        Ok(result) => Json(RewriteResponse::from(result)).into_response(),
        Err(e) => error_response(status_for(&e), e),
    }
}
