//! Folds queued suggestions into the Template Store.
//!
//! One batch is: validate paths, fetch the store with its blob SHA, merge every
//! suggestion with duplicate skipping, write once under the SHA precondition,
//! then delete the consumed queue files. A stale SHA aborts before any delete,
//! so the whole batch can be re-run safely.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::RepoSettings;
use crate::repo::{ContentError, RepoClient};
use crate::suggestions::models::{SuggestionRecord, SuggestionTarget};
use crate::templates::{
    compare_and_swap, fetch_store, LookEntry, MergeOutcome, OverallEntry, SwapOutcome,
    TemplateStore, DEFAULT_SUB,
};

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("{0}")]
    Rejected(String),

    #[error("template store at {path} changed during approval")]
    Stale { path: String },

    #[error("failed to remove {path}: {source}")]
    Cleanup {
        path: String,
        #[source]
        source: ContentError,
    },

    #[error(transparent)]
    Content(#[from] ContentError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApprovalReport {
    /// Entries appended to the Template Store.
    pub applied: usize,
    /// Suggestions that duplicated an existing entry.
    pub skipped: usize,
    /// Listed files that were already gone from the queue.
    pub missing: usize,
    /// Queue files deleted.
    pub removed: usize,
}

/// Checks every path before anything touches the repository.
pub fn validate_batch(files: &[String], queue_dir: &str) -> Result<(), ApprovalError> {
    if files.is_empty() {
        return Err(ApprovalError::Rejected("files must not be empty".to_string()));
    }
    let prefix = format!("{}/", queue_dir.trim_end_matches('/'));
    if let Some(bad) = files
        .iter()
        .find(|f| !f.starts_with(&prefix) || f.contains(".."))
    {
        return Err(ApprovalError::Rejected(format!(
            "'{bad}' is not a file under {prefix}"
        )));
    }
    Ok(())
}

fn merge_record(store: &mut TemplateStore, record: SuggestionRecord) -> MergeOutcome {
    match record.target() {
        SuggestionTarget::Physical => store.merge_look(LookEntry {
            title: record.tag,
            text: record.text,
        }),
        SuggestionTarget::Overall => store.merge_overall(OverallEntry {
            cat: record.major.unwrap_or_default(),
            sub: Some(
                record
                    .minor
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SUB.to_string()),
            ),
            tag: record.tag,
            text: record.text,
        }),
    }
}

pub async fn approve_batch(
    repo: &dyn RepoClient,
    settings: &RepoSettings,
    files: &[String],
) -> Result<ApprovalReport, ApprovalError> {
    validate_batch(files, &settings.suggestions_dir)?;

    let branch = settings.branch.as_str();
    let mut versioned = fetch_store(repo, &settings.templates_path, branch).await?;
    let mut report = ApprovalReport::default();
    let mut consumed = Vec::with_capacity(files.len());

    for path in files {
        let file = match repo.get_file(path, branch).await {
            Ok(file) => file,
            Err(ContentError::NotFound { .. }) => {
                warn!("Suggestion {path} is no longer queued; skipping");
                report.missing += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let record: SuggestionRecord = serde_json::from_str(&file.content)
            .map_err(ContentError::Parse)?;

        match merge_record(&mut versioned.store, record) {
            MergeOutcome::Added => report.applied += 1,
            MergeOutcome::Duplicate => report.skipped += 1,
        }
        consumed.push(path.as_str());
    }

    if report.applied > 0 {
        let message = format!("feat(templates): apply {} suggestion(s)", report.applied);
        let outcome = compare_and_swap(
            repo,
            &settings.templates_path,
            branch,
            &versioned.store,
            &versioned.sha,
            &message,
        )
        .await?;
        if outcome == SwapOutcome::Conflict {
            return Err(ApprovalError::Stale {
                path: settings.templates_path.clone(),
            });
        }
    } else {
        info!("No new template entries in batch; store left untouched");
    }

    for path in consumed {
        if remove_pending(repo, path, branch).await? {
            report.removed += 1;
        }
    }

    info!(
        "Approval batch done: applied={} skipped={} missing={} removed={}",
        report.applied, report.skipped, report.missing, report.removed
    );
    Ok(report)
}

/// Deletes one queue file at its current SHA. `Ok(false)` when it was already
/// gone.
pub async fn remove_pending(
    repo: &dyn RepoClient,
    path: &str,
    branch: &str,
) -> Result<bool, ApprovalError> {
    let cleanup = |source| ApprovalError::Cleanup {
        path: path.to_string(),
        source,
    };

    let sha = match repo.get_file(path, branch).await {
        Ok(file) => file.sha,
        Err(ContentError::NotFound { .. }) => {
            warn!("Suggestion {path} already removed");
            return Ok(false);
        }
        Err(e) => return Err(cleanup(e)),
    };

    let message = format!("chore(suggest): remove {path}");
    match repo.delete_file(path, branch, &sha, &message).await {
        Ok(()) => Ok(true),
        Err(ContentError::NotFound { .. }) => {
            warn!("Suggestion {path} already removed");
            Ok(false)
        }
        Err(e) => Err(cleanup(e)),
    }
}
