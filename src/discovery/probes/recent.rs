//! The OS "recent items" folder: shortcuts mentioning a domain keyword whose
//! target is a known executable.

use crate::config::DiscoveryConfig;
use crate::discovery::{shortcut, Environment, Hit, SourceType};
use crate::error::Result;
use crate::util::{contains_any, file_name_of};

pub fn scan(env: &Environment, config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut hits = Vec::new();
    for dir in &env.recent_dirs {
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        let mut paths: Vec<_> = entries.flatten().map(|e| e.path()).collect();
        paths.sort();

        for entry in paths {
            let name = file_name_of(&entry).unwrap_or_default();
            if !contains_any(&name, &config.keywords) {
                continue;
            }
            let Some(target) = shortcut::resolve(&entry) else {
                continue;
            };
            let target_name = file_name_of(&target).unwrap_or_default();
            if config.is_executable(&target_name) && config.is_known_name(&target_name) {
                hits.push(
                    Hit::file(SourceType::RecentShortcut, target)
                        .with_detail(entry.to_string_lossy().to_string()),
                );
            }
        }
    }
    Ok(hits)
}
