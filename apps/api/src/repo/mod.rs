//! Repository client: the single point of entry for hosted Git provider calls.
//!
//! The Template Store and the Suggestion Queue both live as files in one
//! repository. Every read, write, delete and pull-request call goes through
//! `RepoClient`; handlers never build provider URLs themselves.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod github;
#[cfg(test)]
pub mod memory;

pub use github::GitHubClient;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Stale blob SHA for {path}")]
    Conflict { path: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Content decode error: {0}")]
    Decode(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A decoded file together with its blob SHA (the version token for writes).
#[derive(Debug, Clone)]
pub struct RepoFile {
    pub sha: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirEntry {
    pub path: String,
    pub name: String,
    pub sha: String,
}

/// Create-or-update request. `sha` is the precondition: `None` creates a new
/// file, `Some` replaces the file only if its blob SHA still matches.
#[derive(Debug, Clone, Copy)]
pub struct PutFile<'a> {
    pub path: &'a str,
    pub branch: &'a str,
    pub content: &'a str,
    pub message: &'a str,
    pub sha: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PullRequest<'a> {
    pub title: &'a str,
    pub head: &'a str,
    pub base: &'a str,
    pub body: &'a str,
}

#[async_trait]
pub trait RepoClient: Send + Sync {
    async fn get_file(&self, path: &str, branch: &str) -> Result<RepoFile, ContentError>;

    /// Returns the new blob SHA. A precondition mismatch is `ContentError::Conflict`.
    async fn put_file(&self, request: PutFile<'_>) -> Result<String, ContentError>;

    async fn delete_file(
        &self,
        path: &str,
        branch: &str,
        sha: &str,
        message: &str,
    ) -> Result<(), ContentError>;

    async fn list_dir(&self, path: &str, branch: &str) -> Result<Vec<DirEntry>, ContentError>;

    async fn default_branch(&self) -> Result<String, ContentError>;

    /// Commit SHA at the tip of `branch`.
    async fn branch_head(&self, branch: &str) -> Result<String, ContentError>;

    async fn create_branch(&self, branch: &str, from_sha: &str) -> Result<(), ContentError>;

    /// Opens a pull request and returns its web URL.
    async fn open_pull_request(&self, request: PullRequest<'_>) -> Result<String, ContentError>;
}
