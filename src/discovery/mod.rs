//! Installation-path discovery: probes, companion search, ranking and the
//! learning feedback loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod companion;
pub mod confidence;
pub mod environment;
pub mod learning;
pub mod names;
pub mod orchestrator;
pub mod probes;
pub mod scoring;
pub mod shortcut;

pub use environment::Environment;
pub use learning::{FailedAttempt, LearningRecord, LearningStore};
pub use names::{PathValidation, Role};
pub use orchestrator::Discovery;
pub use scoring::{Candidate, RankedCandidates, ScoreWeights};

/// Where a hit came from. Drives the base score in ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    Learned,
    Registry,
    CommonPath,
    UserDir,
    Process,
    RecentShortcut,
    DeepWalk,
    KnownLocation,
    FolderPattern,
    Steam,
    ServerDirCompanion,
    /// A probe failed outright; `detail` carries the message.
    ProbeError,
}

/// One raw observation from a probe.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub source_type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub depth: u32,
    pub potential: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Hit {
    fn new(source_type: SourceType) -> Self {
        Self {
            source_type,
            file_path: None,
            file_name: None,
            depth: 0,
            potential: false,
            detail: None,
            timestamp: Utc::now(),
        }
    }

    /// A hit asserting that a directory exists.
    pub fn dir(source_type: SourceType, path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::new(source_type)
        }
    }

    /// A hit naming a file; `file_name` is taken from the path.
    pub fn file(source_type: SourceType, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            file_name: crate::util::file_name_of(&path),
            file_path: Some(path),
            ..Self::new(source_type)
        }
    }

    /// A running process seen by name only. Never becomes a candidate.
    pub fn process(name: impl Into<String>) -> Self {
        Self {
            detail: Some(name.into()),
            ..Self::new(SourceType::Process)
        }
    }

    /// Diagnostic entry for a probe that failed.
    pub fn probe_error(probe: &str, message: impl std::fmt::Display) -> Self {
        Self {
            detail: Some(format!("{probe}: {message}")),
            ..Self::new(SourceType::ProbeError)
        }
    }

    pub fn at_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn potential(mut self) -> Self {
        self.potential = true;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Path of the named file, if this hit names one.
    pub fn executable_path(&self) -> Option<&Path> {
        match (&self.file_path, &self.file_name) {
            (Some(path), Some(_)) => Some(path.as_path()),
            _ => None,
        }
    }
}

/// What `detect_paths` hands back to the caller.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResult {
    pub server_path: String,
    pub client_path: String,
    pub confidence: u8,
    pub search_results: Vec<Hit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_hit_carries_its_name() {
        let hit = Hit::file(SourceType::CommonPath, "/games/spt/SPT.Server.exe");
        assert_eq!(hit.file_name.as_deref(), Some("SPT.Server.exe"));
        assert_eq!(hit.executable_path(), Some(Path::new("/games/spt/SPT.Server.exe")));
    }

    #[test]
    fn dir_and_process_hits_are_not_executables() {
        assert!(Hit::dir(SourceType::Registry, "/steam/steamapps/common")
            .executable_path()
            .is_none());
        assert!(Hit::process("SPT.Server.exe").executable_path().is_none());
    }

    #[test]
    fn hits_serialize_in_camel_case() {
        let hit = Hit::file(SourceType::ServerDirCompanion, "/g/launcher.exe").potential();
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["sourceType"], "serverDirCompanion");
        assert_eq!(json["fileName"], "launcher.exe");
        assert_eq!(json["potential"], true);
        assert!(json.get("detail").is_none());
    }
}
