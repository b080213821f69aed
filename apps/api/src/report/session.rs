//! Report sessions: the whole editor state as one serializable value, saved
//! and loaded explicitly at the HTTP boundary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::dental::DentalFindings;
use super::overall::OverallSelection;
use super::physical::PhysicalSelection;

const MAX_SESSION_ID_LEN: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSession {
    pub physical: PhysicalSelection,
    pub dental: DentalFindings,
    pub overall: OverallSelection,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session id '{0}'")]
    InvalidId(String),

    #[error("session '{0}' not found")]
    NotFound(String),

    #[error("session IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn validate_session_id(id: &str) -> Result<(), SessionError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_SESSION_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SessionError::InvalidId(id.to_string()))
    }
}

/// One JSON file per session under a directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, SessionError> {
        validate_session_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }

    pub async fn save(&self, id: &str, session: &ReportSession) -> Result<(), SessionError> {
        let path = self.path_for(id)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_vec_pretty(session)?;

        // Write-then-rename: readers never observe a partial file.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!("Saved session {id} to {}", path.display());
        Ok(())
    }

    pub async fn load(&self, id: &str) -> Result<ReportSession, SessionError> {
        let path = self.path_for(id)?;
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SessionError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Removes a session. Deleting a missing session is not an error.
    pub async fn delete(&self, id: &str) -> Result<(), SessionError> {
        let path = self.path_for(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Reset session {id}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
