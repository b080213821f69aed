use std::sync::Arc;

use crate::config::Config;
use crate::polish::TextPolisher;
use crate::report::session::SessionStore;
use crate::repo::RepoClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Hosted Git provider holding the Template Store and the Suggestion Queue.
    pub repo: Arc<dyn RepoClient>,
    /// Pluggable polisher. Default: the chat-completions backed `LlmPolisher`.
    pub polisher: Arc<dyn TextPolisher>,
    pub sessions: SessionStore,
    pub config: Config,
}
