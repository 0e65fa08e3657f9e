use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, Path as UrlPath, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use recast_pipeline::{run_job, FileTree, JobLimits, JobStats, LanguageMode, Rewriter};

use crate::paths::resolve_within;
use crate::sessions::SessionStore;

// Uploaded archives are whole repositories; allow well beyond axum's 2 MB
// default.
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub rewriter: Arc<dyn Rewriter>,
    pub temp_base: PathBuf,
    pub limits: JobLimits,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/refactor-repo", post(refactor_repo))
        .route("/file-content/:session_id", get(file_content))
        .route("/download/:zip_name", get(download))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Browser frontends call this API cross-origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct RefactorResponse {
    pub download_url: String,
    pub structure: FileTree,
    pub session_id: String,
    pub zip_name: String,
    pub stats: JobStats,
}

#[derive(Debug, Serialize)]
pub struct FileContentResponse {
    pub content: String,
    pub file_path: String,
}

#[derive(Debug, Deserialize)]
pub struct FileContentQuery {
    pub file_path: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

enum JobError {
    BadRequest(String),
    Internal(anyhow::Error),
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorBody { detail: detail.into() })).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn refactor_repo(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut language: Option<String> = None;
    let mut github_url: Option<String> = None;
    let mut zip_bytes: Option<Bytes> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid multipart request: {err}"),
                )
            }
        };
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("language") => match field.text().await {
                Ok(text) => language = Some(text),
                Err(err) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Unreadable 'language' field: {err}"),
                    )
                }
            },
            Some("github_url") => match field.text().await {
                Ok(text) if !text.trim().is_empty() => github_url = Some(text.trim().to_string()),
                Ok(_) => {}
                Err(err) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Unreadable 'github_url' field: {err}"),
                    )
                }
            },
            Some("zip_file") => match field.bytes().await {
                Ok(bytes) if !bytes.is_empty() => zip_bytes = Some(bytes),
                Ok(_) => {}
                Err(err) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Unreadable 'zip_file' upload: {err}"),
                    )
                }
            },
            _ => {}
        }
    }

    let Some(mode) = language.as_deref().and_then(LanguageMode::parse) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Unsupported language. Use 'java' or 'nodejs'.",
        );
    };

    match process_job(&state, mode, github_url, zip_bytes).await {
        Ok(response) => Json(response).into_response(),
        Err(JobError::BadRequest(detail)) => error_response(StatusCode::BAD_REQUEST, detail),
        Err(JobError::Internal(err)) => {
            log::error!("refactor job failed: {err:#}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.",
            )
        }
    }
}

async fn process_job(
    state: &AppState,
    mode: LanguageMode,
    github_url: Option<String>,
    zip_bytes: Option<Bytes>,
) -> Result<RefactorResponse, JobError> {
    let intake_dir = recast_project::create_temp_dir(&state.temp_base)
        .map_err(|err| JobError::Internal(err.into()))?;

    let result = run_one(state, mode, &intake_dir, github_url, zip_bytes).await;

    // The intake tree is never served; the destination tree owns the output.
    if let Err(err) = std::fs::remove_dir_all(&intake_dir) {
        log::debug!("could not remove intake dir {}: {err}", intake_dir.display());
    }
    result
}

async fn run_one(
    state: &AppState,
    mode: LanguageMode,
    intake_dir: &std::path::Path,
    github_url: Option<String>,
    zip_bytes: Option<Bytes>,
) -> Result<RefactorResponse, JobError> {
    let source_root = match (github_url, zip_bytes) {
        (Some(_), Some(_)) => {
            return Err(JobError::BadRequest(
                "Provide either a GitHub URL or a zip file, not both.".to_string(),
            ))
        }
        (Some(url), None) => recast_project::clone_repo(&url, intake_dir)
            .await
            .map_err(|err| JobError::BadRequest(err.to_string()))?,
        (None, Some(bytes)) => {
            let archive_path = intake_dir.join("upload.zip");
            std::fs::write(&archive_path, &bytes)
                .map_err(|err| JobError::Internal(err.into()))?;
            recast_project::extract_zip(&archive_path, intake_dir)
                .map_err(|err| JobError::BadRequest(format!("Failed to unpack archive: {err}")))?;
            // Keep the upload itself out of the walked tree.
            let _ = std::fs::remove_file(&archive_path);
            intake_dir.to_path_buf()
        }
        (None, None) => {
            return Err(JobError::BadRequest(
                "Either GitHub URL or zip file must be provided.".to_string(),
            ))
        }
    };

    let dest_root = recast_project::create_temp_dir(&state.temp_base)
        .map_err(|err| JobError::Internal(err.into()))?;

    let job = match run_job(
        &source_root,
        &dest_root,
        mode,
        state.rewriter.clone(),
        &state.limits,
    )
    .await
    {
        Ok(job) => job,
        Err(err) => {
            // A job either completes fully or its partial tree is discarded.
            let _ = std::fs::remove_dir_all(&dest_root);
            return Err(JobError::Internal(err.into()));
        }
    };

    let zip_path = match recast_project::create_zip_archive(&dest_root, &state.temp_base) {
        Ok(path) => path,
        Err(err) => {
            let _ = std::fs::remove_dir_all(&dest_root);
            return Err(JobError::Internal(err.into()));
        }
    };
    let zip_name = zip_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let session_id = state.sessions.put(dest_root).await;

    Ok(RefactorResponse {
        download_url: format!("/download/{zip_name}"),
        structure: job.structure,
        session_id,
        zip_name,
        stats: job.stats,
    })
}

async fn file_content(
    State(state): State<AppState>,
    UrlPath(session_id): UrlPath<String>,
    Query(query): Query<FileContentQuery>,
) -> Response {
    let Some(root) = state.sessions.get(&session_id).await else {
        return error_response(StatusCode::NOT_FOUND, "Session not found or expired.");
    };
    let Some(full_path) = resolve_within(&root, &query.file_path) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid file path.");
    };
    if !full_path.is_file() {
        return error_response(StatusCode::NOT_FOUND, "File not found.");
    }

    let content = match tokio::fs::read(&full_path).await {
        Ok(bytes) => String::from_utf8(bytes)
            .unwrap_or_else(|_| "Binary file - content cannot be displayed".to_string()),
        Err(err) => {
            log::error!("could not read {}: {err}", full_path.display());
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error reading file.");
        }
    };

    Json(FileContentResponse {
        content,
        file_path: query.file_path,
    })
    .into_response()
}

async fn download(State(state): State<AppState>, UrlPath(zip_name): UrlPath<String>) -> Response {
    // Archive names are server-generated; anything with path separators or a
    // foreign extension is not ours.
    if zip_name.contains(['/', '\\']) || !zip_name.ends_with(".zip") {
        return error_response(StatusCode::BAD_REQUEST, "Invalid archive name.");
    }
    let zip_path = state.temp_base.join(&zip_name);
    if !zip_path.is_file() {
        return error_response(StatusCode::NOT_FOUND, "File not found or expired.");
    }

    match tokio::fs::read(&zip_path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/zip"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"refactored_output.zip\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(err) => {
            log::error!("could not read archive {}: {err}", zip_path.display());
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error reading archive.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct EchoRewriter;

    #[async_trait]
    impl Rewriter for EchoRewriter {
        async fn rewrite(
            &self,
            content: &str,
            _mode: LanguageMode,
            _filename: &str,
        ) -> anyhow::Result<String> {
            Ok(content.to_string())
        }
    }

    fn state_at(temp_base: &std::path::Path) -> AppState {
        AppState {
            sessions: SessionStore::new(Duration::from_secs(60)),
            rewriter: Arc::new(EchoRewriter),
            temp_base: temp_base.to_path_buf(),
            limits: JobLimits::default(),
        }
    }

    #[tokio::test]
    async fn supplying_both_sources_is_rejected() {
        let base = TempDir::new().expect("temp base");
        let state = state_at(base.path());
        let intake = recast_project::create_temp_dir(base.path()).expect("intake");

        let result = run_one(
            &state,
            LanguageMode::Java,
            &intake,
            Some("https://github.com/acme/repo".to_string()),
            Some(Bytes::from_static(b"PK")),
        )
        .await;

        match result {
            Err(JobError::BadRequest(detail)) => {
                assert_eq!(detail, "Provide either a GitHub URL or a zip file, not both.");
            }
            Err(JobError::Internal(err)) => panic!("unexpected internal error: {err:#}"),
            Ok(_) => panic!("a request with two sources must not start a job"),
        }
    }

    #[tokio::test]
    async fn supplying_no_source_is_rejected() {
        let base = TempDir::new().expect("temp base");
        let state = state_at(base.path());
        let intake = recast_project::create_temp_dir(base.path()).expect("intake");

        let result = run_one(&state, LanguageMode::NodeJs, &intake, None, None).await;

        match result {
            Err(JobError::BadRequest(detail)) => {
                assert_eq!(detail, "Either GitHub URL or zip file must be provided.");
            }
            Err(JobError::Internal(err)) => panic!("unexpected internal error: {err:#}"),
            Ok(_) => panic!("a request with no source must not start a job"),
        }
    }
}
