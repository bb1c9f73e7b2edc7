//! Probes that check fixed or pattern-matched directories for executables.

use std::path::{Path, PathBuf};

use super::{child_dirs, dir_name_matches, known_executables};
use crate::config::DiscoveryConfig;
use crate::discovery::{Environment, Hit, SourceType};
use crate::error::Result;

/// Directory hit plus one file hit per known executable inside.
fn scan_dir(dir: &Path, source: SourceType, config: &DiscoveryConfig, hits: &mut Vec<Hit>) {
    if !dir.is_dir() {
        return;
    }
    hits.push(Hit::dir(source, dir));
    hits.extend(
        known_executables(dir, config)
            .into_iter()
            .map(|exe| Hit::file(source, exe)),
    );
}

/// Conventional install directories (Program Files, drive roots, versioned names).
pub fn scan_common_paths(env: &Environment, config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut hits = Vec::new();
    for dir in &env.common_dirs {
        scan_dir(dir, SourceType::CommonPath, config, &mut hits);
    }
    Ok(hits)
}

/// Desktop, documents, downloads and `~/Games`, each with the usual folder names.
pub fn scan_user_dirs(env: &Environment, config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut hits = Vec::new();
    for base in &env.user_dirs {
        for folder in &env.install_folder_names {
            scan_dir(&base.join(folder), SourceType::UserDir, config, &mut hits);
        }
    }
    Ok(hits)
}

/// Historically common install paths, plus one level of subdirectory.
pub fn scan_known_locations(env: &Environment, config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut hits = Vec::new();
    for location in env.known_locations.iter().filter(|l| l.is_dir()) {
        for exe in known_executables(location, config) {
            hits.push(Hit::file(SourceType::KnownLocation, exe));
        }
        for sub in child_dirs(location) {
            for exe in known_executables(&sub, config) {
                hits.push(Hit::file(SourceType::KnownLocation, exe).at_depth(1));
            }
        }
    }
    Ok(hits)
}

/// Children of each filesystem root whose name contains a domain keyword.
pub fn scan_folder_patterns(env: &Environment, config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut hits = Vec::new();
    let matches: Vec<PathBuf> = env
        .filesystem_roots
        .iter()
        .flat_map(|root| child_dirs(root))
        .filter(|dir| dir_name_matches(dir, &config.keywords))
        .collect();

    for dir in matches {
        hits.extend(
            known_executables(&dir, config)
                .into_iter()
                .map(|exe| Hit::file(SourceType::FolderPattern, exe)),
        );
    }
    Ok(hits)
}
