use anyhow::{Context, Result};

/// Where the Template Store and the Suggestion Queue live in the hosted repository.
#[derive(Debug, Clone)]
pub struct RepoSettings {
    pub branch: String,
    pub templates_path: String,
    pub suggestions_dir: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub github_api_url: String,
    pub gh_owner: String,
    pub gh_repo: String,
    pub repo: RepoSettings,
    /// Shared secret for the pull-request submission flow. Unset means open.
    pub suggest_secret: Option<String>,
    pub openai_api_key: String,
    pub sessions_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            github_token: require_env("GITHUB_TOKEN")?,
            github_api_url: env_or("GITHUB_API_URL", "https://api.github.com"),
            gh_owner: require_env("GH_OWNER")?,
            gh_repo: require_env("GH_REPO")?,
            repo: RepoSettings {
                branch: env_or("GH_BRANCH", "main"),
                templates_path: env_or("TEMPLATES_PATH", "src/data/templates.json"),
                suggestions_dir: env_or("SUGGESTIONS_DIR", "suggestions/pending")
                    .trim_end_matches('/')
                    .to_string(),
            },
            suggest_secret: std::env::var("SUGGEST_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            openai_api_key: require_env("OPENAI_API_KEY")?,
            sessions_dir: env_or("SESSIONS_DIR", "data/sessions"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
