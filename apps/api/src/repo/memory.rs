//! In-memory `RepoClient` used by unit and router tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ContentError, DirEntry, PullRequest, PutFile, RepoClient, RepoFile};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}

#[derive(Default)]
pub struct MemoryRepo {
    /// (branch, path) -> (content, sha)
    files: Mutex<BTreeMap<(String, String), (String, String)>>,
    branches: Mutex<HashMap<String, String>>,
    pull_requests: Mutex<Vec<RecordedPullRequest>>,
    /// When set, fetching this path lets a simulated concurrent writer bump it.
    race_on_get: Mutex<Option<String>>,
    /// When set, the next write is refused as if another writer got there first.
    conflict_on_put: AtomicBool,
    next_sha: AtomicU64,
    calls: AtomicUsize,
}

impl MemoryRepo {
    pub fn new() -> Self {
        let repo = Self::default();
        repo.branches
            .lock()
            .unwrap()
            .insert("main".to_string(), "c0ffee".to_string());
        repo
    }

    fn mint_sha(&self) -> String {
        format!("blob-{}", self.next_sha.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn seed(&self, branch: &str, path: &str, content: &str) -> String {
        let sha = self.mint_sha();
        self.files.lock().unwrap().insert(
            (branch.to_string(), path.to_string()),
            (content.to_string(), sha.clone()),
        );
        sha
    }

    pub fn read(&self, branch: &str, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&(branch.to_string(), path.to_string()))
            .map(|(content, _)| content.clone())
    }

    pub fn paths(&self, branch: &str) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == branch)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn has_branch(&self, branch: &str) -> bool {
        self.branches.lock().unwrap().contains_key(branch)
    }

    pub fn pull_requests(&self) -> Vec<RecordedPullRequest> {
        self.pull_requests.lock().unwrap().clone()
    }

    pub fn race_on_next_get(&self, path: &str) {
        *self.race_on_get.lock().unwrap() = Some(path.to_string());
    }

    pub fn conflict_on_next_put(&self) {
        self.conflict_on_put.store(true, Ordering::SeqCst);
    }

    /// Number of provider calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoClient for MemoryRepo {
    async fn get_file(&self, path: &str, branch: &str) -> Result<RepoFile, ContentError> {
        self.touch();
        let key = (branch.to_string(), path.to_string());
        let (content, sha) = self
            .files
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                path: path.to_string(),
            })?;

        let raced = {
            let mut race = self.race_on_get.lock().unwrap();
            if race.as_deref() == Some(path) {
                race.take();
                true
            } else {
                false
            }
        };
        if raced {
            let bumped = self.mint_sha();
            if let Some(entry) = self.files.lock().unwrap().get_mut(&key) {
                entry.1 = bumped;
            }
        }

        Ok(RepoFile {
            sha,
            content,
        })
    }

    async fn put_file(&self, request: PutFile<'_>) -> Result<String, ContentError> {
        self.touch();
        let key = (request.branch.to_string(), request.path.to_string());
        let mut files = self.files.lock().unwrap();
        let current = files.get(&key).map(|(_, sha)| sha.clone());
        if self.conflict_on_put.swap(false, Ordering::SeqCst) || current.as_deref() != request.sha {
            return Err(ContentError::Conflict {
                path: request.path.to_string(),
            });
        }
        let sha = self.mint_sha();
        files.insert(key, (request.content.to_string(), sha.clone()));
        Ok(sha)
    }

    async fn delete_file(
        &self,
        path: &str,
        branch: &str,
        sha: &str,
        _message: &str,
    ) -> Result<(), ContentError> {
        self.touch();
        let key = (branch.to_string(), path.to_string());
        let mut files = self.files.lock().unwrap();
        match files.get(&key) {
            None => Err(ContentError::NotFound {
                path: path.to_string(),
            }),
            Some((_, current)) if current != sha => Err(ContentError::Conflict {
                path: path.to_string(),
            }),
            Some(_) => {
                files.remove(&key);
                Ok(())
            }
        }
    }

    async fn list_dir(&self, path: &str, branch: &str) -> Result<Vec<DirEntry>, ContentError> {
        self.touch();
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let entries: Vec<DirEntry> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|((b, p), _)| b == branch && p.starts_with(&prefix))
            .filter(|((_, p), _)| !p[prefix.len()..].contains('/'))
            .map(|((_, p), (_, sha))| DirEntry {
                path: p.clone(),
                name: p[prefix.len()..].to_string(),
                sha: sha.clone(),
            })
            .collect();

        if entries.is_empty() {
            return Err(ContentError::NotFound {
                path: path.to_string(),
            });
        }
        Ok(entries)
    }

    async fn default_branch(&self) -> Result<String, ContentError> {
        self.touch();
        Ok("main".to_string())
    }

    async fn branch_head(&self, branch: &str) -> Result<String, ContentError> {
        self.touch();
        self.branches
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                path: branch.to_string(),
            })
    }

    async fn create_branch(&self, branch: &str, from_sha: &str) -> Result<(), ContentError> {
        self.touch();
        let mut branches = self.branches.lock().unwrap();
        if branches.contains_key(branch) {
            return Err(ContentError::Api {
                status: 422,
                message: "Reference already exists".to_string(),
            });
        }
        branches.insert(branch.to_string(), from_sha.to_string());
        Ok(())
    }

    async fn open_pull_request(&self, request: PullRequest<'_>) -> Result<String, ContentError> {
        self.touch();
        let mut prs = self.pull_requests.lock().unwrap();
        prs.push(RecordedPullRequest {
            title: request.title.to_string(),
            head: request.head.to_string(),
            base: request.base.to_string(),
            body: request.body.to_string(),
        });
        Ok(format!("https://github.test/clinic/vet-report/pull/{}", prs.len()))
    }
}
