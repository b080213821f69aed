use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::repo::{ContentError, DirEntry};
use crate::state::AppState;
use crate::suggestions::approve::{approve_batch, ApprovalReport};
use crate::suggestions::models::{NewSuggestion, PullRequestSuggestion};
use crate::suggestions::submit::{submit_direct, submit_pull_request};

#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub ok: bool,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct PullRequestResponse {
    pub ok: bool,
    pub pr_url: String,
    pub branch: String,
    pub path: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub files: Vec<DirEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub report: ApprovalReport,
}

/// POST /api/v1/suggestions
///
/// Direct strategy: the record is committed straight onto the configured branch.
pub async fn handle_submit(
    State(state): State<AppState>,
    payload: Result<Json<NewSuggestion>, JsonRejection>,
) -> Result<Json<QueuedResponse>, AppError> {
    let Json(body) = payload?;
    let draft = body.validate()?;
    let path = submit_direct(state.repo.as_ref(), &state.config.repo, &draft, Utc::now()).await?;
    Ok(Json(QueuedResponse { ok: true, path }))
}

/// POST /api/v1/suggestions/pr
///
/// Pull-request strategy. The shared secret, when configured, is checked
/// before anything else.
pub async fn handle_submit_pull_request(
    State(state): State<AppState>,
    payload: Result<Json<PullRequestSuggestion>, JsonRejection>,
) -> Result<Json<PullRequestResponse>, AppError> {
    let Json(body) = payload?;
    let (secret, suggestion) = body.into_parts();

    if let Some(expected) = state.config.suggest_secret.as_deref() {
        if secret.as_deref() != Some(expected) {
            info!("Rejected pull-request suggestion with a wrong secret");
            return Err(AppError::Unauthorized);
        }
    }

    let draft = suggestion.validate()?;
    let submission =
        submit_pull_request(state.repo.as_ref(), &state.config.repo, &draft, Utc::now()).await?;

    Ok(Json(PullRequestResponse {
        ok: true,
        pr_url: submission.pr_url,
        branch: submission.branch,
        path: submission.path,
        id: submission.id,
    }))
}

/// GET /api/v1/suggestions/pending
pub async fn handle_list_pending(
    State(state): State<AppState>,
) -> Result<Json<PendingResponse>, AppError> {
    let settings = &state.config.repo;
    let entries = match state
        .repo
        .list_dir(&settings.suggestions_dir, &settings.branch)
        .await
    {
        Ok(entries) => entries,
        Err(ContentError::NotFound { .. }) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    let files = entries
        .into_iter()
        .filter(|e| e.name.ends_with(".json"))
        .collect();
    Ok(Json(PendingResponse { files }))
}

/// POST /api/v1/suggestions/approve
pub async fn handle_approve(
    State(state): State<AppState>,
    payload: Result<Json<ApproveRequest>, JsonRejection>,
) -> Result<Json<ApproveResponse>, AppError> {
    let Json(body) = payload?;
    let report = approve_batch(state.repo.as_ref(), &state.config.repo, &body.files).await?;
    Ok(Json(ApproveResponse { ok: true, report }))
}
