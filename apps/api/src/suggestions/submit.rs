//! Suggestion submission strategies. Both leave one pending record file where
//! the approval merger can read it; they differ in how it gets there.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::RepoSettings;
use crate::repo::{ContentError, PullRequest, PutFile, RepoClient};
use crate::suggestions::models::{SuggestionDraft, SuggestionRecord};
use crate::suggestions::naming::{direct_filename, suggestion_id};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestSubmission {
    pub id: String,
    pub branch: String,
    pub path: String,
    pub pr_url: String,
}

/// Writes the record straight onto the configured branch. Returns its path.
pub async fn submit_direct(
    repo: &dyn RepoClient,
    settings: &RepoSettings,
    draft: &SuggestionDraft,
    now: DateTime<Utc>,
) -> Result<String, ContentError> {
    let path = format!(
        "{}/{}",
        settings.suggestions_dir,
        direct_filename(now, &draft.tag)
    );
    let content = SuggestionRecord::pending(draft, None, now).to_pretty_json()?;
    let message = format!(
        "chore(suggest): {} by {}",
        draft.tag,
        draft.proposer.as_deref().unwrap_or("anon")
    );

    repo.put_file(PutFile {
        path: &path,
        branch: &settings.branch,
        content: &content,
        message: &message,
        sha: None,
    })
    .await?;

    info!("Queued suggestion '{}' at {path}", draft.tag);
    Ok(path)
}

fn pull_request_body(record: &SuggestionRecord) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    format!(
        "자동 생성된 템플릿 제안입니다.\n\n\
         - target: {}\n\
         - category: {}\n\
         - sub: {}\n\
         - tag: {}\n\
         - text: {}\n\
         - notes: {}\n\
         - submitter: {}\n",
        record.target().as_str(),
        field(&record.major),
        field(&record.minor),
        record.tag,
        record.text,
        field(&record.notes),
        field(&record.proposer),
    )
}

/// Creates `suggest/<id>` from the default branch head, adds the record there
/// under `<queue dir>/<date>/<id>.json` and opens a pull request back into the
/// default branch.
pub async fn submit_pull_request(
    repo: &dyn RepoClient,
    settings: &RepoSettings,
    draft: &SuggestionDraft,
    now: DateTime<Utc>,
) -> Result<PullRequestSubmission, ContentError> {
    let base = repo.default_branch().await?;
    let base_sha = repo.branch_head(&base).await?;

    let id = suggestion_id(now, &draft.tag);
    let branch = format!("suggest/{id}");
    let path = format!(
        "{}/{}/{id}.json",
        settings.suggestions_dir,
        now.format("%Y-%m-%d")
    );

    repo.create_branch(&branch, &base_sha).await?;

    let record = SuggestionRecord::pending(draft, Some(id.clone()), now);
    let content = record.to_pretty_json()?;
    let message = format!("chore: add suggestion {id}");
    repo.put_file(PutFile {
        path: &path,
        branch: &branch,
        content: &content,
        message: &message,
        sha: None,
    })
    .await?;

    let title = format!("feat(templates): suggestion {}", record.tag);
    let body = pull_request_body(&record);
    let pr_url = repo
        .open_pull_request(PullRequest {
            title: &title,
            head: &branch,
            base: &base,
            body: &body,
        })
        .await?;

    info!("Opened suggestion pull request {pr_url} from {branch}");
    Ok(PullRequestSubmission {
        id,
        branch,
        path,
        pr_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memory::MemoryRepo;
    use crate::suggestions::models::NewSuggestion;
    use chrono::TimeZone;

    fn settings() -> RepoSettings {
        RepoSettings {
            branch: "main".to_string(),
            templates_path: "src/data/templates.json".to_string(),
            suggestions_dir: "suggestions/pending".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
    }

    fn draft(target: &str, major: Option<&str>, tag: &str, text: &str) -> SuggestionDraft {
        NewSuggestion {
            target: Some(target.to_string()),
            major: major.map(str::to_string),
            tag: Some(tag.to_string()),
            text: Some(text.to_string()),
            ..NewSuggestion::default()
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_direct_writes_record_under_queue_dir() {
        let repo = MemoryRepo::new();
        let path = submit_direct(&repo, &settings(), &draft("physical", None, "정상", "특이소견 없음"), now())
            .await
            .unwrap();

        assert_eq!(path, "suggestions/pending/2025-03-04T05-06-07-000Z--정상.json");
        let stored: SuggestionRecord =
            serde_json::from_str(&repo.read("main", &path).unwrap()).unwrap();
        assert_eq!(stored.tag, "정상");
        assert_eq!(stored.text, "특이소견 없음");
        assert_eq!(stored.status, "pending");
    }

    #[tokio::test]
    async fn test_direct_does_not_deduplicate() {
        let repo = MemoryRepo::new();
        let d = draft("physical", None, "정상", "특이소견 없음");
        let first = submit_direct(&repo, &settings(), &d, now()).await.unwrap();
        let later = now() + chrono::Duration::milliseconds(1);
        let second = submit_direct(&repo, &settings(), &d, later).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(repo.paths("main").len(), 2);
    }

    #[tokio::test]
    async fn test_direct_collision_is_an_upstream_error() {
        use crate::errors::AppError;
        use axum::{http::StatusCode, response::IntoResponse};

        let repo = MemoryRepo::new();
        let d = draft("physical", None, "정상", "특이소견 없음");
        submit_direct(&repo, &settings(), &d, now()).await.unwrap();
        let err = submit_direct(&repo, &settings(), &d, now())
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Conflict { .. }));

        let err = AppError::from(err);
        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_pull_request_flow() {
        let repo = MemoryRepo::new();
        let d = draft("overall", Some("혈액검사"), "경미한 빈혈", "1개월 후 재검 권장");
        let submission = submit_pull_request(&repo, &settings(), &d, now())
            .await
            .unwrap();

        let id = format!("2025-03-04-{}-경미한-빈혈", now().timestamp_millis());
        assert_eq!(submission.id, id);
        assert_eq!(submission.branch, format!("suggest/{id}"));
        assert_eq!(
            submission.path,
            format!("suggestions/pending/2025-03-04/{id}.json")
        );
        assert!(repo.has_branch(&submission.branch));

        // The record lives on the suggestion branch, not on main.
        assert!(repo.read("main", &submission.path).is_none());
        let stored: SuggestionRecord =
            serde_json::from_str(&repo.read(&submission.branch, &submission.path).unwrap())
                .unwrap();
        assert_eq!(stored.id.as_deref(), Some(id.as_str()));
        assert_eq!(stored.major.as_deref(), Some("혈액검사"));

        let prs = repo.pull_requests();
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].title, "feat(templates): suggestion 경미한 빈혈");
        assert_eq!(prs[0].base, "main");
        assert!(prs[0].body.contains("- category: 혈액검사"));
        assert_eq!(submission.pr_url, "https://github.test/clinic/vet-report/pull/1");
    }

    #[tokio::test]
    async fn test_pull_request_fails_when_branch_exists() {
        let repo = MemoryRepo::new();
        let d = draft("physical", None, "정상", "특이소견 없음");
        submit_pull_request(&repo, &settings(), &d, now()).await.unwrap();
        let again = submit_pull_request(&repo, &settings(), &d, now()).await;
        assert!(matches!(again, Err(ContentError::Api { status: 422, .. })));
        assert_eq!(repo.pull_requests().len(), 1);
    }
}
