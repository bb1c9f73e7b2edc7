//! Independent scanners, one per category of location.
//!
//! A probe is a plain function of the environment and config. Missing or
//! unreadable paths are skipped inside the probe; only a failure of the probe
//! as a whole is returned as `Err`.

use std::path::{Path, PathBuf};

use crate::config::DiscoveryConfig;
use crate::discovery::{Environment, Hit};
use crate::error::Result;

pub mod deep_walk;
pub mod filesystem;
pub mod process;
pub mod recent;
pub mod registry;
pub mod steam;

pub type ProbeFn = fn(&Environment, &DiscoveryConfig) -> Result<Vec<Hit>>;

#[derive(Clone, Copy, Debug)]
pub struct Probe {
    pub name: &'static str,
    pub run: ProbeFn,
}

impl Probe {
    pub const fn new(name: &'static str, run: ProbeFn) -> Self {
        Self { name, run }
    }
}

/// Every probe a full discovery run fans out to.
pub fn default_probes() -> Vec<Probe> {
    vec![
        Probe::new("registry", registry::scan),
        Probe::new("common-paths", filesystem::scan_common_paths),
        Probe::new("user-dirs", filesystem::scan_user_dirs),
        Probe::new("processes", process::scan),
        Probe::new("recent-files", recent::scan),
        Probe::new("known-locations", filesystem::scan_known_locations),
        Probe::new("folder-patterns", filesystem::scan_folder_patterns),
        Probe::new("steam-library", steam::scan),
        Probe::new("deep-walk", deep_walk::scan),
    ]
}

/// Immediate subdirectories of `dir`; unreadable dirs yield nothing.
pub(crate) fn child_dirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    dirs.sort();
    dirs
}

/// Files directly inside `dir` whose name is a known server or client name.
pub(crate) fn known_executables(dir: &Path, config: &DiscoveryConfig) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            config.is_executable(&name) && config.is_known_name(&name)
        })
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

pub(crate) fn dir_name_matches(dir: &Path, needles: &[String]) -> bool {
    dir.file_name()
        .map(|n| crate::util::contains_any(&n.to_string_lossy(), needles))
        .unwrap_or(false)
}
