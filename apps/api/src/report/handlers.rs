//! Axum route handlers for rendering reports and managing sessions.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::report::dental::{dental_options, DentalOptions};
use crate::report::overall::{palette, PaletteGroup};
use crate::report::{render_report, RenderedReport, ReportSession};
use crate::state::AppState;
use crate::templates::{fetch_store, TemplateStore};

async fn current_templates(state: &AppState) -> Result<TemplateStore, AppError> {
    let repo = &state.config.repo;
    let versioned = fetch_store(state.repo.as_ref(), &repo.templates_path, &repo.branch).await?;
    Ok(versioned.store)
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub session: ReportSession,
}

#[derive(Debug, Deserialize)]
pub struct PaletteQuery {
    #[serde(default)]
    pub q: String,
}

/// POST /api/v1/report/render
///
/// Renders an inline session against the current Template Store.
pub async fn handle_render(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderedReport>, AppError> {
    let Json(request) = payload?;
    let store = current_templates(&state).await?;
    Ok(Json(render_report(&store, &request.session)))
}

/// GET /api/v1/report/options
pub async fn handle_dental_options() -> Json<DentalOptions> {
    Json(dental_options())
}

/// PUT /api/v1/sessions/:id
pub async fn handle_save_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReportSession>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(session) = payload?;
    state.sessions.save(&id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id
pub async fn handle_load_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportSession>, AppError> {
    Ok(Json(state.sessions.load(&id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.sessions.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/report
pub async fn handle_session_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RenderedReport>, AppError> {
    let session = state.sessions.load(&id).await?;
    let store = current_templates(&state).await?;
    Ok(Json(render_report(&store, &session)))
}

/// GET /api/v1/sessions/:id/palette?q=
///
/// Overall-assessment tags for the exams picked in the session, grouped by sub.
pub async fn handle_session_palette(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PaletteQuery>,
) -> Result<Json<Vec<PaletteGroup>>, AppError> {
    let session = state.sessions.load(&id).await?;
    let store = current_templates(&state).await?;
    Ok(Json(palette(&store, &session.overall, &query.q)))
}
