//! Looks beside a found server executable for its client launcher.

use std::path::Path;

use crate::config::DiscoveryConfig;
use crate::discovery::{Hit, SourceType};
use crate::util::contains_any;

const FUZZY_CLIENT_MARKERS: &[&str] = &["launcher", "client"];

/// Scans only the directory containing `server_path`, never below it.
pub fn find_companion(server_path: &Path, config: &DiscoveryConfig) -> Vec<Hit> {
    let Some(dir) = server_path.parent() else {
        return Vec::new();
    };
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let markers: Vec<String> = FUZZY_CLIENT_MARKERS.iter().map(|m| (*m).to_string()).collect();
    let mut files: Vec<_> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .map(|e| e.path())
        .collect();
    files.sort();

    let mut hits = Vec::new();
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if !config.is_executable(&name) {
            continue;
        }
        if config.is_client_name(&name) {
            hits.push(Hit::file(SourceType::ServerDirCompanion, path));
        } else if !config.is_server_name(&name) && contains_any(&name, &markers) {
            hits.push(Hit::file(SourceType::ServerDirCompanion, path).potential());
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn exact_and_fuzzy_companions() {
        let dir = TempDir::new().unwrap();
        for name in [
            "SPT.Server.exe",
            "SPT.Launcher.exe",
            "EscapeFromTarkov-Client.exe",
            "MyLauncherTool.exe",
            "launcher-notes.txt",
            "unrelated.exe",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("launcher.exe"), b"").unwrap();

        let hits = find_companion(&dir.path().join("SPT.Server.exe"), &DiscoveryConfig::default());
        let found: Vec<_> = hits
            .iter()
            .map(|h| (h.file_name.clone().unwrap(), h.potential))
            .collect();
        assert_eq!(
            found,
            vec![
                ("EscapeFromTarkov-Client.exe".into(), true),
                ("MyLauncherTool.exe".into(), true),
                ("SPT.Launcher.exe".into(), false),
            ]
        );
        assert!(hits.iter().all(|h| h.source_type == SourceType::ServerDirCompanion));
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let server = dir.path().join("gone").join("server.exe");
        assert!(find_companion(&server, &DiscoveryConfig::default()).is_empty());
    }
}
