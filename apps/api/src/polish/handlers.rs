use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::polish::tidy::tidy;
use crate::polish::PolishOptions;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PolishRequest {
    #[serde(default)]
    pub text: String,
    pub tone: Option<String>,
    pub length: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TidyRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PolishResponse {
    pub result: String,
}

/// POST /api/v1/polish
pub async fn handle_polish(
    State(state): State<AppState>,
    payload: Result<Json<PolishRequest>, JsonRejection>,
) -> Result<Json<PolishResponse>, AppError> {
    let Json(request) = payload?;
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }
    let options = PolishOptions::parse(
        request.tone.as_deref(),
        request.length.as_deref(),
        request.format.as_deref(),
    )
    .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = state
        .polisher
        .polish(&request.text, options)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(PolishResponse {
        result: result.trim().to_string(),
    }))
}

/// POST /api/v1/polish/tidy
pub async fn handle_tidy(
    payload: Result<Json<TidyRequest>, JsonRejection>,
) -> Result<Json<PolishResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(PolishResponse {
        result: tidy(&request.text),
    }))
}
