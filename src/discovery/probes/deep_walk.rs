//! Bounded-depth walk from a handful of promising roots.
//!
//! A directory is entered if it sits directly under a root, or if its name
//! contains a domain keyword. The depth cap is hard. Symlinks are followed,
//! but a directory already walked in this scan is never entered twice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DiscoveryConfig;
use crate::discovery::{Environment, Hit, SourceType};
use crate::error::Result;
use crate::util::contains_any;

pub fn scan(env: &Environment, config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut hits = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();

    for root in env.deep_walk_roots.iter().filter(|r| r.is_dir()) {
        walk_root(root, config, &mut visited, &mut hits);
    }
    tracing::debug!(hits = hits.len(), dirs = visited.len(), "deep walk finished");
    Ok(hits)
}

fn walk_root(root: &Path, config: &DiscoveryConfig, visited: &mut HashSet<PathBuf>, hits: &mut Vec<Hit>) {
    // Files at hit depth N live at walkdir depth N + 1.
    let walker = WalkDir::new(root)
        .follow_links(true)
        .max_depth(config.max_walk_depth + 1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            if entry.depth() > 0 {
                let name = entry.file_name().to_string_lossy();
                if name.starts_with('.') {
                    return false;
                }
                if entry.depth() > 1 && !contains_any(&name, &config.keywords) {
                    return false;
                }
            }
            // Overlapping roots and links back into an already-walked tree.
            let key = std::fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
            visited.insert(key)
        });

    for entry in walker.flatten() {
        if entry.depth() == 0 || entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if config.is_executable(&name) && config.is_known_name(&name) {
            let depth = u32::try_from(entry.depth() - 1).unwrap_or(u32::MAX);
            hits.push(Hit::file(SourceType::DeepWalk, entry.path()).at_depth(depth));
        }
    }
}
