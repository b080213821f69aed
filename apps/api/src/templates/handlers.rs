use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::templates::{fetch_store, TemplateStore};

#[derive(Serialize)]
pub struct TemplatesResponse {
    pub sha: String,
    pub templates: TemplateStore,
}

/// GET /api/v1/templates
///
/// Current Template Store plus its blob SHA.
pub async fn handle_get_templates(
    State(state): State<AppState>,
) -> Result<Json<TemplatesResponse>, AppError> {
    let repo = &state.config.repo;
    let versioned = fetch_store(state.repo.as_ref(), &repo.templates_path, &repo.branch).await?;
    Ok(Json(TemplatesResponse {
        sha: versioned.sha,
        templates: versioned.store,
    }))
}
