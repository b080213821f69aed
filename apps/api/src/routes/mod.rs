pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::polish::handlers as polish;
use crate::report::handlers as report;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template Store
        .route("/api/v1/templates", get(templates::handle_get_templates))
        // Report composer
        .route("/api/v1/report/render", post(report::handle_render))
        .route("/api/v1/report/options", get(report::handle_dental_options))
        .route(
            "/api/v1/sessions/:id",
            put(report::handle_save_session)
                .get(report::handle_load_session)
                .delete(report::handle_reset_session),
        )
        .route(
            "/api/v1/sessions/:id/report",
            get(report::handle_session_report),
        )
        .route(
            "/api/v1/sessions/:id/palette",
            get(report::handle_session_palette),
        )
        // Suggestion queue
        .route("/api/v1/suggestions", post(suggestions::handle_submit))
        .route(
            "/api/v1/suggestions/pr",
            post(suggestions::handle_submit_pull_request),
        )
        .route(
            "/api/v1/suggestions/pending",
            get(suggestions::handle_list_pending),
        )
        .route(
            "/api/v1/suggestions/approve",
            post(suggestions::handle_approve),
        )
        // Polisher
        .route("/api/v1/polish", post(polish::handle_polish))
        .route("/api/v1/polish/tidy", post(polish::handle_tidy))
        .with_state(state)
}
