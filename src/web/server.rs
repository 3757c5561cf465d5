use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use thiserror::Error;

use crate::catalog::model::ExampleGroup;
use crate::catalog::scanner::build_catalog;
use crate::config::ServerConfig;

use super::media::{content_type_for, resolve_audio_path, MediaError};
use super::page::render_index;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Self {
        Self { cfg: Arc::new(cfg) }
    }
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum WebError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<MediaError> for WebError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::NotFound => WebError::NotFound,
            MediaError::Io(io) => WebError::Internal(anyhow::Error::new(io)),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            WebError::Internal(e) => {
                log::error!("Request failed: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/examples", get(list_examples))
        .route("/audio/*path", get(serve_audio))
        .with_state(state)
}

pub async fn run_server(cfg: ServerConfig) -> anyhow::Result<()> {
    let addr = cfg.listen_addr;
    let app = router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("Listening on http://{addr}");

    axum::serve(listener, app).await.context("serving HTTP")
}

// ---------------------------------------------------------------------------
// Catalog scan (blocking I/O, off the async workers)
// ---------------------------------------------------------------------------

async fn scan(st: &AppState) -> Result<Vec<ExampleGroup>, WebError> {
    let cfg = st.cfg.clone();
    let groups = tokio::task::spawn_blocking(move || build_catalog(&cfg.base_dir, &cfg.catalog))
        .await
        .context("catalog scan task")??;
    Ok(groups)
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

async fn index(State(st): State<AppState>) -> Result<Html<String>, WebError> {
    let groups = scan(&st).await?;
    Ok(Html(render_index(&st.cfg.page, &st.cfg.catalog, &groups)))
}

// ---------------------------------------------------------------------------
// GET /api/examples
// ---------------------------------------------------------------------------

async fn list_examples(State(st): State<AppState>) -> Result<Json<Vec<ExampleGroup>>, WebError> {
    Ok(Json(scan(&st).await?))
}

// ---------------------------------------------------------------------------
// GET /audio/*path
// ---------------------------------------------------------------------------

async fn serve_audio(
    State(st): State<AppState>,
    Path(requested): Path<String>,
) -> Result<Response, WebError> {
    let path = match resolve_audio_path(&st.cfg.base_dir, &st.cfg.catalog, &requested) {
        Ok(p) => p,
        Err(MediaError::NotFound) => {
            log::debug!("Audio request rejected: {requested:?}");
            return Err(WebError::NotFound);
        }
        Err(e) => return Err(e.into()),
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(WebError::NotFound),
        Err(e) => return Err(MediaError::Io(e).into()),
    };

    let headers = [
        (header::CONTENT_TYPE, content_type_for(&path)),
        (header::CONTENT_DISPOSITION, "inline"),
    ];
    Ok((headers, bytes).into_response())
}
