use crate::github::GitHubClient;
use crate::pr::{self, FileChangeSummary, PrError};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub github: GitHubClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/pr/files", get(get_pr_files))
        .route("/pr", patch(update_pr_description))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PrQuery {
    pr_url: String,
}

#[derive(Debug, Serialize)]
struct FilesResponse {
    files: Vec<FileChangeSummary>,
}

#[derive(Debug, Deserialize)]
struct UpdateDescriptionRequest {
    description: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pr-relay",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /pr/files?pr_url=<url> — list the changed files of a pull request.
async fn get_pr_files(
    State(state): State<AppState>,
    Query(query): Query<PrQuery>,
) -> Result<Json<FilesResponse>, ApiError> {
    let pr = pr::parse_pr_url(&query.pr_url)?;
    let files = state.github.list_pr_files(&pr).await?;
    info!(owner = %pr.owner, repo = %pr.repo, pr = pr.number, files = files.len(), "listed PR files");
    Ok(Json(FilesResponse { files }))
}

/// PATCH /pr?pr_url=<url> — replace a pull request's description.
async fn update_pr_description(
    State(state): State<AppState>,
    Query(query): Query<PrQuery>,
    Json(request): Json<UpdateDescriptionRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pr = pr::parse_pr_url(&query.pr_url)?;
    state
        .github
        .update_pr_description(&pr, &request.description)
        .await?;
    info!(owner = %pr.owner, repo = %pr.repo, pr = pr.number, "updated PR description");
    Ok(Json(MessageResponse {
        message: format!("Successfully updated PR #{} description.", pr.number),
    }))
}

/// HTTP-facing wrapper around PrError.
///
/// Parse failures map to 400; upstream failures mirror the upstream status
/// with the generic detail text; transport failures map to 502.
#[derive(Debug)]
struct ApiError(PrError);

impl From<PrError> for ApiError {
    fn from(err: PrError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PrError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            PrError::Upstream { status, detail } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                (*detail).to_string(),
            ),
            PrError::ApiRequest(_) | PrError::MissingToken => {
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }
        };
        warn!(status = status.as_u16(), error = %message, "request failed");
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
