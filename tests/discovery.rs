//! End-to-end discovery over temporary install trees.

use std::path::{Path, PathBuf};

use spt_launcher_lib::discovery::probes::{filesystem, Probe};
use spt_launcher_lib::discovery::Environment;
use spt_launcher_lib::{Discovery, DiscoveryConfig, LearningStore, SourceType};
use tempfile::TempDir;

fn touch(path: &Path) -> PathBuf {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"").unwrap();
    path.to_path_buf()
}

fn lossy(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn fs_probes() -> Vec<Probe> {
    vec![
        Probe::new("common-paths", filesystem::scan_common_paths),
        Probe::new("user-dirs", filesystem::scan_user_dirs),
    ]
}

fn discovery(root: &TempDir, env: Environment) -> Discovery {
    Discovery::new(
        env,
        DiscoveryConfig::default(),
        LearningStore::new(root.path().join("data").join("learning.json")),
    )
    .with_probes(fs_probes())
}

#[tokio::test]
async fn companion_launcher_outranks_other_clients() {
    let root = TempDir::new().unwrap();
    let install = root.path().join("games").join("spt");
    touch(&install.join("server.exe"));
    let companion = touch(&install.join("launcher.exe"));
    touch(&root.path().join("elsewhere").join("SPT").join("launcher.exe"));

    let env = Environment {
        common_dirs: vec![install.clone()],
        user_dirs: vec![root.path().join("elsewhere")],
        install_folder_names: vec!["SPT".into()],
        ..Environment::default()
    };
    let discovery = discovery(&root, env);

    let result = discovery.detect_paths().await;
    assert_eq!(result.server_path, lossy(&install.join("server.exe")));
    assert_eq!(result.client_path, lossy(&companion));
    assert!(result
        .search_results
        .iter()
        .any(|h| h.source_type == SourceType::ServerDirCompanion && h.file_path.as_deref() == Some(companion.as_path())));

    let ranked = discovery.rank_candidates().await;
    assert_eq!(ranked.client.len(), 2);
    assert_eq!(ranked.client[0].source_type, SourceType::ServerDirCompanion);
    assert!(ranked.client[0].score >= 140);
    assert!(ranked.client[0].score > ranked.client[1].score);
}

#[tokio::test]
async fn learned_path_beats_fresh_common_path() {
    let root = TempDir::new().unwrap();
    let learned = touch(&root.path().join("learned").join("server.exe"));
    let other = root.path().join("other");
    touch(&other.join("server.exe"));

    let env = Environment {
        common_dirs: vec![other],
        ..Environment::default()
    };
    let discovery = discovery(&root, env);
    discovery.record_launch_outcome(&lossy(&learned), "", true);

    let result = discovery.detect_paths().await;
    assert_eq!(result.server_path, lossy(&learned));
    assert_eq!(result.client_path, "");
    assert_eq!(result.search_results[0].source_type, SourceType::Learned);
    // server found (30) + strong top score (20) + second server (5)
    assert_eq!(result.confidence, 55);
}

#[tokio::test]
async fn vanished_learned_path_is_ignored() {
    let root = TempDir::new().unwrap();
    let gone = root.path().join("gone").join("server.exe");

    let discovery = discovery(&root, Environment::default());
    discovery.record_launch_outcome(&lossy(&gone), "", true);

    let result = discovery.detect_paths().await;
    assert_eq!(result.server_path, "");
    assert!(result.search_results.is_empty());
    assert_eq!(result.confidence, 0);
}

#[tokio::test]
async fn failed_attempt_demotes_a_path() {
    let root = TempDir::new().unwrap();
    let first = root.path().join("a").join("SPT-AKI");
    let second = root.path().join("b");
    let failing = touch(&first.join("SPT.Server.exe"));
    let fallback = touch(&second.join("SPT-AKI").join("SPT.Server.exe"));

    let env = Environment {
        common_dirs: vec![first],
        user_dirs: vec![second],
        install_folder_names: vec!["SPT-AKI".into()],
        ..Environment::default()
    };
    let discovery = discovery(&root, env);

    let before = discovery.detect_paths().await;
    assert_eq!(before.server_path, lossy(&failing));

    discovery.record_launch_outcome(&lossy(&failing), "", false);
    let after = discovery.detect_paths().await;
    assert_eq!(after.server_path, lossy(&fallback));
}

#[tokio::test]
async fn learning_round_trips_through_the_store_file() {
    let root = TempDir::new().unwrap();
    let discovery = discovery(&root, Environment::default());

    discovery.record_launch_outcome("/g/spt/SPT.Server.exe", "/g/spt/launcher.exe", true);
    discovery.record_launch_outcome("/g/spt/SPT.Server.exe", "/g/spt/launcher.exe", true);
    discovery.record_launch_outcome("/x/server.exe", "/x/launcher.exe", false);

    let raw = std::fs::read_to_string(discovery.store().path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["successfulPaths"].as_array().unwrap().len(), 2);
    assert_eq!(json["failedAttempts"][0]["serverPath"], "/x/server.exe");
    assert!(json["lastUpdated"].is_string());
}

#[tokio::test]
async fn result_serializes_for_the_ui() {
    let root = TempDir::new().unwrap();
    let install = root.path().join("SPT");
    touch(&install.join("SPT.Server.exe"));
    touch(&install.join("SPT.Launcher.exe"));

    let env = Environment {
        common_dirs: vec![install],
        ..Environment::default()
    };
    let result = discovery(&root, env).detect_paths().await;
    assert_eq!(result.confidence, 100);

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["serverPath"].as_str().unwrap().ends_with("SPT.Server.exe"));
    assert!(json["clientPath"].as_str().unwrap().ends_with("SPT.Launcher.exe"));
    assert!(json["searchResults"].as_array().unwrap().len() >= 3);
}
