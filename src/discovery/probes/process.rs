//! Running processes whose image name is a known server or client executable.

use sysinfo::{ProcessesToUpdate, System};

use crate::config::DiscoveryConfig;
use crate::discovery::{Environment, Hit};
use crate::error::Result;

/// Hits here carry only the process name; they are diagnostics, never candidates.
pub fn scan(_env: &Environment, config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    let names = system
        .processes()
        .values()
        .map(|p| p.name().to_string_lossy().to_string());
    Ok(matching_processes(names, config))
}

pub(crate) fn matching_processes(
    names: impl IntoIterator<Item = String>,
    config: &DiscoveryConfig,
) -> Vec<Hit> {
    let mut seen: Vec<String> = Vec::new();
    for name in names {
        if config.is_known_name(&name) && !seen.iter().any(|s| s.eq_ignore_ascii_case(&name)) {
            seen.push(name);
        }
    }
    seen.sort();
    seen.into_iter().map(Hit::process).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::SourceType;

    #[test]
    fn matches_known_names_once() {
        let names = ["explorer.exe", "SPT.Server.exe", "spt.server.exe", "launcher.exe"]
            .map(String::from);
        let hits = matching_processes(names, &DiscoveryConfig::default());

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.source_type == SourceType::Process));
        assert!(hits.iter().all(|h| h.file_path.is_none()));
        assert_eq!(hits[0].detail.as_deref(), Some("SPT.Server.exe"));
    }

    #[test]
    fn live_scan_does_not_fail() {
        assert!(scan(&Environment::default(), &DiscoveryConfig::default()).is_ok());
    }
}
