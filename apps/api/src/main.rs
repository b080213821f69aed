mod config;
mod errors;
mod llm_client;
mod polish;
mod report;
mod repo;
mod routes;
mod state;
mod suggestions;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::polish::LlmPolisher;
use crate::report::SessionStore;
use crate::repo::GitHubClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vetreport API v{}", env!("CARGO_PKG_VERSION"));

    // Hosted Git provider: Template Store and Suggestion Queue
    let github = GitHubClient::new(
        &config.github_api_url,
        config.gh_owner.clone(),
        config.gh_repo.clone(),
        config.github_token.clone(),
    )?;
    info!(
        "Repository {}/{} on branch {} (templates: {}, queue: {})",
        config.gh_owner,
        config.gh_repo,
        config.repo.branch,
        config.repo.templates_path,
        config.repo.suggestions_dir
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let sessions = SessionStore::new(&config.sessions_dir);
    info!("Sessions stored under {}", sessions.dir().display());

    if config.suggest_secret.is_none() {
        info!("SUGGEST_SECRET not set; pull-request suggestions are open");
    }

    // Build app state
    let state = AppState {
        repo: Arc::new(github),
        polisher: Arc::new(LlmPolisher::new(llm)),
        sessions,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
