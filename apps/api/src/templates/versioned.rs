//! Versioned access to the Template Store file. The blob SHA returned by
//! `fetch_store` is the only concurrency guard: `compare_and_swap` writes only
//! if the file still carries that SHA.

use tracing::{info, warn};

use super::models::TemplateStore;
use crate::repo::{ContentError, PutFile, RepoClient};

#[derive(Debug, Clone)]
pub struct VersionedStore {
    pub store: TemplateStore,
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    Applied { sha: String },
    /// Another writer replaced the file after it was fetched. Nothing was written.
    Conflict,
}

pub async fn fetch_store(
    repo: &dyn RepoClient,
    path: &str,
    branch: &str,
) -> Result<VersionedStore, ContentError> {
    let file = repo.get_file(path, branch).await?;
    let store = TemplateStore::from_json(&file.content)?;
    Ok(VersionedStore {
        store,
        sha: file.sha,
    })
}

pub async fn compare_and_swap(
    repo: &dyn RepoClient,
    path: &str,
    branch: &str,
    store: &TemplateStore,
    expected_sha: &str,
    message: &str,
) -> Result<SwapOutcome, ContentError> {
    let content = store.to_pretty_json()?;
    let put = PutFile {
        path,
        branch,
        content: &content,
        message,
        sha: Some(expected_sha),
    };

    match repo.put_file(put).await {
        Ok(sha) => {
            info!("Template store {path} written at blob {sha}");
            Ok(SwapOutcome::Applied { sha })
        }
        Err(ContentError::Conflict { .. }) => {
            warn!("Template store {path} changed since blob {expected_sha}; write refused");
            Ok(SwapOutcome::Conflict)
        }
        Err(e) => Err(e),
    }
}
