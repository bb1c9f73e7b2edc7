use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::discovery::scoring::ScoreWeights;
use crate::error::{LauncherError, Result};

/// Overrides the per-user data directory (tests, portable installs).
pub const HOME_ENV: &str = "SPT_LAUNCHER_HOME";

const APP_DIR_NAME: &str = "spt-launcher";
const LEARNING_FILE: &str = "learning.json";
const DISCOVERY_FILE: &str = "discovery.json";

/// Per-user data directory: `$SPT_LAUNCHER_HOME`, else `<data_dir>/spt-launcher`.
pub fn data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME))
}

pub fn learning_path() -> Result<PathBuf> {
    data_dir()
        .map(|d| d.join(LEARNING_FILE))
        .ok_or_else(|| LauncherError::Custom("Cannot find user data directory".into()))
}

pub fn discovery_config_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join(DISCOVERY_FILE))
}

/// Tunables for discovery: name lists, keywords, walk depth and score weights.
///
/// Every field defaults, so a partial `discovery.json` is valid.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryConfig {
    pub server_names: Vec<String>,
    pub client_names: Vec<String>,
    pub keywords: Vec<String>,
    pub store_game_dirs: Vec<String>,
    pub executable_extension: String,
    pub max_walk_depth: usize,
    pub weights: ScoreWeights,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            server_names: to_strings(&[
                "SPT.Server.exe",
                "Aki.Server.exe",
                "server.exe",
                "SPT-Server.exe",
                "AkiServer.exe",
            ]),
            client_names: to_strings(&[
                "spt.launcher.exe",
                "SPT-Launcher.exe",
                "launcher.exe",
                "Aki.Launcher.exe",
            ]),
            keywords: to_strings(&["spt", "aki", "tarkov"]),
            store_game_dirs: to_strings(&["EscapeFromTarkov", "Escape From Tarkov", "SPT", "SPT-AKI"]),
            executable_extension: "exe".into(),
            max_walk_depth: 3,
            weights: ScoreWeights::default(),
        }
    }
}

impl DiscoveryConfig {
    /// Loads `discovery.json` from the data directory, falling back to defaults.
    pub fn load() -> Self {
        match discovery_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Reads a config file; a missing file is silent, a bad one is logged.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed discovery config");
                Self::default()
            }
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
