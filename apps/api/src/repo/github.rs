use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ContentError, DirEntry, PullRequest, PutFile, RepoClient, RepoFile};

const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ContentsFile {
    path: String,
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ContentsItem {
    name: String,
    path: String,
    sha: String,
    #[serde(rename = "type")]
    item_type: String,
}

#[derive(Debug, Serialize)]
struct PutContentsBody<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutContentsResponse {
    content: ContentsCommitted,
}

#[derive(Debug, Deserialize)]
struct ContentsCommitted {
    sha: String,
}

#[derive(Debug, Serialize)]
struct DeleteContentsBody<'a> {
    message: &'a str,
    sha: &'a str,
    branch: &'a str,
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Serialize)]
struct CreateRefBody<'a> {
    #[serde(rename = "ref")]
    git_ref: String,
    sha: &'a str,
}

#[derive(Debug, Deserialize)]
struct PullRequestCreated {
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

/// GitHub REST implementation of `RepoClient` (contents, refs and pulls APIs).
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base: Url,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, owner: String, repo: String, token: String) -> Result<Self> {
        let base = Url::parse(api_url)
            .with_context(|| format!("GITHUB_API_URL '{api_url}' is not a valid URL"))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            client,
            base,
            owner,
            repo,
            token,
        })
    }

    /// `/repos/{owner}/{repo}/<segments...>`, each segment percent-encoded.
    fn repo_url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str()])
                .extend(segments);
        }
        url
    }

    fn contents_url(&self, path: &str) -> Url {
        self.repo_url(std::iter::once("contents").chain(path.split('/')))
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .header("x-github-api-version", GITHUB_API_VERSION)
    }
}

/// Maps non-success responses onto `ContentError`, keeping the provider message.
async fn check(response: Response, path: &str) -> Result<Response, ContentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status.as_u16() {
        404 => Err(ContentError::NotFound {
            path: path.to_string(),
        }),
        409 => Err(ContentError::Conflict {
            path: path.to_string(),
        }),
        code => {
            let message = serde_json::from_str::<GitHubErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            warn!("GitHub API returned {code} for {path}: {message}");
            Err(ContentError::Api {
                status: code,
                message,
            })
        }
    }
}

fn decode_content(encoded: &str) -> Result<String, ContentError> {
    // The contents API wraps base64 at 60 columns.
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| ContentError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ContentError::Decode(e.to_string()))
}

#[async_trait]
impl RepoClient for GitHubClient {
    async fn get_file(&self, path: &str, branch: &str) -> Result<RepoFile, ContentError> {
        let mut url = self.contents_url(path);
        url.query_pairs_mut().append_pair("ref", branch);

        let response = self.request(reqwest::Method::GET, url).send().await?;
        let file: ContentsFile = check(response, path).await?.json().await?;
        debug!("Fetched {} at blob {}", file.path, file.sha);

        Ok(RepoFile {
            content: decode_content(&file.content)?,
            sha: file.sha,
        })
    }

    async fn put_file(&self, request: PutFile<'_>) -> Result<String, ContentError> {
        let body = PutContentsBody {
            message: request.message,
            content: STANDARD.encode(request.content.as_bytes()),
            branch: request.branch,
            sha: request.sha,
        };

        let response = self
            .request(reqwest::Method::PUT, self.contents_url(request.path))
            .json(&body)
            .send()
            .await?;
        let committed: PutContentsResponse = check(response, request.path).await?.json().await?;
        Ok(committed.content.sha)
    }

    async fn delete_file(
        &self,
        path: &str,
        branch: &str,
        sha: &str,
        message: &str,
    ) -> Result<(), ContentError> {
        let body = DeleteContentsBody {
            message,
            sha,
            branch,
        };
        let response = self
            .request(reqwest::Method::DELETE, self.contents_url(path))
            .json(&body)
            .send()
            .await?;
        check(response, path).await?;
        Ok(())
    }

    async fn list_dir(&self, path: &str, branch: &str) -> Result<Vec<DirEntry>, ContentError> {
        let mut url = self.contents_url(path);
        url.query_pairs_mut().append_pair("ref", branch);

        let response = self.request(reqwest::Method::GET, url).send().await?;
        let items: Vec<ContentsItem> = check(response, path).await?.json().await?;

        Ok(items
            .into_iter()
            .filter(|item| item.item_type == "file")
            .map(|item| DirEntry {
                path: item.path,
                name: item.name,
                sha: item.sha,
            })
            .collect())
    }

    async fn default_branch(&self) -> Result<String, ContentError> {
        let response = self
            .request(reqwest::Method::GET, self.repo_url([]))
            .send()
            .await?;
        let info: RepoInfo = check(response, &self.repo).await?.json().await?;
        Ok(info.default_branch)
    }

    async fn branch_head(&self, branch: &str) -> Result<String, ContentError> {
        let url = self.repo_url(["git", "ref", "heads"].into_iter().chain(branch.split('/')));
        let response = self.request(reqwest::Method::GET, url).send().await?;
        let git_ref: GitRef = check(response, branch).await?.json().await?;
        Ok(git_ref.object.sha)
    }

    async fn create_branch(&self, branch: &str, from_sha: &str) -> Result<(), ContentError> {
        let body = CreateRefBody {
            git_ref: format!("refs/heads/{branch}"),
            sha: from_sha,
        };
        let response = self
            .request(reqwest::Method::POST, self.repo_url(["git", "refs"]))
            .json(&body)
            .send()
            .await?;
        check(response, branch).await?;
        Ok(())
    }

    async fn open_pull_request(&self, request: PullRequest<'_>) -> Result<String, ContentError> {
        let response = self
            .request(reqwest::Method::POST, self.repo_url(["pulls"]))
            .json(&request)
            .send()
            .await?;
        let created: PullRequestCreated = check(response, request.head).await?.json().await?;
        Ok(created.html_url)
    }
}
