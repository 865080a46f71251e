//! HTTP boundary for the preview: submit fragments, read them back, render.

use crate::backend::DirectoryBackend;
use crate::composer::{compose, PreviewComposer};
use crate::config::{Config, SubmitResponse};
use crate::formatter::{Formatter, MarkupIndenter};
use crate::store::AssetStore;
use crate::submit::{SubmitForm, SubmitPipeline};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use codepad_common::PREVIEW_PATH;
use http::{header, StatusCode};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

pub struct AppState {
    pub store: Arc<AssetStore>,
    pub submit: SubmitPipeline,
    pub composer: PreviewComposer,
    pub submit_response: SubmitResponse,
}

impl AppState {
    pub fn new(store: Arc<AssetStore>, config: &Config) -> Self {
        let formatter: Option<Box<dyn Formatter>> = if config.format_markup {
            Some(Box::new(MarkupIndenter::new()))
        } else {
            None
        };

        Self {
            submit: SubmitPipeline::new(Arc::clone(&store), formatter),
            composer: PreviewComposer::new(Arc::clone(&store), config.render_mode),
            submit_response: config.submit_response,
            store,
        }
    }
}

/// Open the store `config` asks for: a snapshot directory when `storeDir` is
/// set, otherwise memory only
pub async fn open_store(config: &Config, cwd: &std::path::Path) -> AssetStore {
    match config.store_path(cwd) {
        Some(dir) => {
            info!(dir = %dir.display(), "Using snapshot directory");
            AssetStore::open(Box::new(DirectoryBackend::new(dir))).await
        }
        None => AssetStore::in_memory(),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/preview", get(render_preview).put(submit).post(submit))
        .route("/preview/:file", get(serve_asset))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind `config.addr()` and serve until the process is stopped
pub async fn serve(config: &Config, cwd: &std::path::Path) -> std::io::Result<()> {
    let store = Arc::new(open_store(config, cwd).await);
    let app = router(Arc::new(AppState::new(store, config)));

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!(
        addr = %config.addr(),
        mode = ?config.render_mode,
        "Preview server listening"
    );

    axum::serve(listener, app).await
}

async fn render_preview(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.composer.render().await)
}

async fn submit(State(state): State<Arc<AppState>>, Form(form): Form<SubmitForm>) -> Response {
    match state.submit.submit(form.into()).await {
        Ok(snapshot) => {
            debug!(revision = snapshot.revision, "Submit accepted");
            match state.submit_response {
                // Render the commit this submit made, not the store's latest
                SubmitResponse::Document => {
                    Html(compose(&snapshot.fragments, state.composer.mode())).into_response()
                }
                SubmitResponse::Redirect => Redirect::to(PREVIEW_PATH).into_response(),
            }
        }
        Err(e) => {
            error!(error = %e, "Failed to store submitted fragments");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store preview: {e}"),
            )
                .into_response()
        }
    }
}

async fn serve_asset(State(state): State<Arc<AppState>>, Path(file): Path<String>) -> Response {
    let path = format!("{PREVIEW_PATH}/{file}");
    match state.store.get(&path).await {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.content).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
