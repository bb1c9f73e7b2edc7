//! Persisted record of paths that launched and attempts that did not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};

/// Failed attempts kept; older ones are evicted first.
pub const MAX_FAILED_ATTEMPTS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedAttempt {
    pub server_path: String,
    pub client_path: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningRecord {
    #[serde(default)]
    pub successful_paths: BTreeSet<String>,
    #[serde(default)]
    pub failed_attempts: Vec<FailedAttempt>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl LearningRecord {
    /// Applies one launch outcome in memory.
    pub fn apply_outcome(&mut self, server_path: &str, client_path: &str, success: bool) {
        if success {
            for path in [server_path, client_path] {
                if !path.is_empty() {
                    self.successful_paths.insert(path.to_string());
                }
            }
            return;
        }

        self.failed_attempts.push(FailedAttempt {
            server_path: server_path.to_string(),
            client_path: client_path.to_string(),
            timestamp: Utc::now(),
        });
        if self.failed_attempts.len() > MAX_FAILED_ATTEMPTS {
            let excess = self.failed_attempts.len() - MAX_FAILED_ATTEMPTS;
            self.failed_attempts.drain(..excess);
        }
    }

    pub fn is_successful(&self, path: &str) -> bool {
        self.successful_paths.contains(path)
    }

    /// True if `path` was the server or client of any failed attempt.
    pub fn has_failed(&self, path: &str) -> bool {
        self.failed_attempts
            .iter()
            .any(|a| a.server_path == path || a.client_path == path)
    }

    /// Copy that only keeps successful paths still present on disk.
    pub fn retain_existing(&self) -> Self {
        let mut record = self.clone();
        record.successful_paths.retain(|p| Path::new(p).is_file());
        record
    }
}

/// File-backed owner of the [`LearningRecord`].
#[derive(Clone, Debug)]
pub struct LearningStore {
    path: PathBuf,
}

impl LearningStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the per-user data directory.
    pub fn open_default() -> Result<Self> {
        crate::config::learning_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record. Missing or unreadable state yields an empty record;
    /// a corrupt file is left in place until the next save overwrites it.
    pub fn load(&self) -> LearningRecord {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "learning store unreadable");
                }
                return LearningRecord::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "learning store corrupt, starting empty");
                LearningRecord::default()
            }
        }
    }

    /// Stamps `last_updated` and writes via temp file + rename.
    pub fn save(&self, record: &mut LearningRecord) -> Result<()> {
        record.last_updated = Some(Utc::now());

        let parent = self.path.parent().ok_or_else(|| {
            LauncherError::Custom(format!("{} has no parent directory", self.path.display()))
        })?;
        std::fs::create_dir_all(parent)?;

        let json = serde_json::to_string_pretty(record)?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }

    /// Feeds a launch outcome back and persists it immediately.
    /// Storage errors are logged, never returned.
    pub fn record_outcome(&self, server_path: &str, client_path: &str, success: bool) -> LearningRecord {
        let mut record = self.load();
        record.apply_outcome(server_path, client_path, success);
        if let Err(e) = self.save(&mut record) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist launch outcome");
        }
        tracing::debug!(
            success,
            learned = record.successful_paths.len(),
            failed = record.failed_attempts.len(),
            "recorded launch outcome"
        );
        record
    }
}
