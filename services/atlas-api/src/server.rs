//! HTTP server for the viewer's data endpoints.
//!
//! Endpoints:
//! - `GET /fileList?directory=` — recursive listing (name, mime, path)
//! - `GET /fileListAndData?directory=` — one level, content inlined
//! - `GET /projectDescription?project=` — body-only HTML fragment
//!
//! Every failure answers 500 with an `{"error": ...}` envelope; the viewer
//! degrades the affected source to an empty list and keeps going.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use atlas_common::{FileListResponse, FilePayloadResponse};

use crate::listing;

pub struct ServerState {
    /// Root directory all relative paths resolve against.
    pub data_root: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    directory: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    project: Option<String>,
}

pub async fn run_server(state: Arc<ServerState>, port: u16) -> anyhow::Result<()> {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    let app = Router::new()
        .route("/fileList", get(file_list))
        .route("/fileListAndData", get(file_list_and_data))
        .route("/projectDescription", get(project_description))
        .layer(cors)
        .layer(Extension(state));

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting atlas-api server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn file_list(
    Extension(state): Extension<Arc<ServerState>>,
    Query(query): Query<DirectoryQuery>,
) -> impl IntoResponse {
    match resolve_directory(&state, query.directory.as_deref())
        .and_then(|(root, relative)| listing::scan_directory(&root, &relative))
    {
        Ok(files) => (
            StatusCode::OK,
            Json(FileListResponse { files, error: None }),
        ),
        Err(e) => {
            warn!(error = %e, "fileList failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FileListResponse {
                    files: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

async fn file_list_and_data(
    Extension(state): Extension<Arc<ServerState>>,
    Query(query): Query<DirectoryQuery>,
) -> impl IntoResponse {
    match resolve_directory(&state, query.directory.as_deref())
        .and_then(|(root, _)| listing::read_directory_payloads(&root))
    {
        Ok(files) => (
            StatusCode::OK,
            Json(FilePayloadResponse { files, error: None }),
        ),
        Err(e) => {
            warn!(error = %e, "fileListAndData failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FilePayloadResponse {
                    files: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

async fn project_description(
    Extension(state): Extension<Arc<ServerState>>,
    Query(query): Query<ProjectQuery>,
) -> impl IntoResponse {
    let result = (|| -> anyhow::Result<String> {
        let project = query.project.as_deref().unwrap_or("");
        if project.is_empty() || project.contains('/') || project.contains("..") {
            anyhow::bail!("Invalid project parameter");
        }
        let path = state
            .data_root
            .join("data/html-description")
            .join(format!("{}.html", project));
        if !path.is_file() {
            anyhow::bail!("Project file not found");
        }
        let html = std::fs::read_to_string(&path)?;
        Ok(listing::extract_body(&html))
    })();

    match result {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            warn!(error = %e, "projectDescription failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Resolve the `directory` query parameter against the data root.
fn resolve_directory(
    state: &ServerState,
    directory: Option<&str>,
) -> anyhow::Result<(PathBuf, String)> {
    let directory = directory.unwrap_or("").trim();
    listing::validate_relative_path(directory)?;
    Ok((state.data_root.join(directory), directory.to_string()))
}
