//! Executable name matching shared by classification and path validation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::DiscoveryConfig;
use crate::util::has_extension;

/// Which of the two executables a path is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Server,
    Client,
}

impl DiscoveryConfig {
    pub fn is_executable(&self, name: &str) -> bool {
        has_extension(name, &self.executable_extension)
    }

    pub fn is_server_name(&self, name: &str) -> bool {
        self.server_names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn is_client_name(&self, name: &str) -> bool {
        self.client_names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Exact (case-insensitive) classification of a file name.
    pub fn classify(&self, name: &str) -> Option<Role> {
        if self.is_server_name(name) {
            Some(Role::Server)
        } else if self.is_client_name(name) {
            Some(Role::Client)
        } else {
            None
        }
    }

    pub fn is_known_name(&self, name: &str) -> bool {
        self.classify(name).is_some()
    }

    fn names_for(&self, role: Role) -> &[String] {
        match role {
            Role::Server => &self.server_names,
            Role::Client => &self.client_names,
        }
    }
}

/// Outcome of checking a user-picked path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathValidation {
    pub valid: bool,
    pub error: Option<String>,
}

impl PathValidation {
    fn ok() -> Self {
        Self { valid: true, error: None }
    }

    fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Checks that `path` is an existing file whose name is in the list for `role`.
pub fn validate_path(config: &DiscoveryConfig, path: &Path, role: Role) -> PathValidation {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return PathValidation::invalid("File does not exist"),
    };
    if !metadata.is_file() {
        return PathValidation::invalid("Selected path is not a file");
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if config.classify(&name) == Some(role) {
        return PathValidation::ok();
    }

    let label = match role {
        Role::Server => "server executable",
        Role::Client => "client launcher",
    };
    PathValidation::invalid(format!(
        "Invalid {label}. Expected one of: {}",
        config.names_for(role).join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn classification_is_exact_and_case_insensitive() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.classify("spt.server.exe"), Some(Role::Server));
        assert_eq!(config.classify("SPT.Launcher.exe"), Some(Role::Client));
        assert_eq!(config.classify("MyLauncher.exe"), None);
        assert_eq!(config.classify("server.exe.old"), None);
    }

    #[test]
    fn validate_accepts_matching_file() {
        let dir = TempDir::new().unwrap();
        let server = dir.path().join("SPT.Server.exe");
        std::fs::write(&server, b"").unwrap();

        let config = DiscoveryConfig::default();
        assert_eq!(validate_path(&config, &server, Role::Server), PathValidation::ok());

        let result = validate_path(&config, &server, Role::Client);
        assert!(!result.valid);
        assert!(result.error.unwrap().starts_with("Invalid client launcher. Expected one of:"));
    }

    #[test]
    fn validate_rejects_missing_and_directories() {
        let dir = TempDir::new().unwrap();
        let config = DiscoveryConfig::default();

        let missing = validate_path(&config, &dir.path().join("server.exe"), Role::Server);
        assert_eq!(missing.error.as_deref(), Some("File does not exist"));

        let folder = dir.path().join("launcher.exe");
        std::fs::create_dir(&folder).unwrap();
        let not_file = validate_path(&config, &folder, Role::Client);
        assert_eq!(not_file.error.as_deref(), Some("Selected path is not a file"));
    }
}
