//! Install roots declared by the games platform (Steam registry keys on
//! Windows, `~/.steam/root` style links elsewhere).

use std::path::PathBuf;
use std::process::Command;

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

use crate::config::DiscoveryConfig;
use crate::discovery::{Environment, Hit, SourceType};
use crate::error::Result;

/// Emits the platform's common games folder for every declared root.
pub fn scan(env: &Environment, _config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut hits = Vec::new();
    for root in declared_steam_roots(env) {
        let common = root.join("steamapps").join("common");
        if common.is_dir() {
            hits.push(Hit::dir(SourceType::Registry, common));
        }
    }
    Ok(hits)
}

/// Steam roots from registry values and root links, deduplicated.
pub(crate) fn declared_steam_roots(env: &Environment) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = env
        .registry_keys
        .iter()
        .filter_map(|(key, value)| query_registry(key, value))
        .map(PathBuf::from)
        .collect();

    roots.extend(
        env.steam_root_links
            .iter()
            .filter_map(|link| std::fs::canonicalize(link).ok()),
    );

    let mut unique = Vec::new();
    for root in roots {
        if !unique.contains(&root) {
            unique.push(root);
        }
    }
    unique
}

/// Runs `reg query <key> /v <value>` and returns the string data.
fn query_registry(key: &str, value: &str) -> Option<String> {
    let mut cmd = Command::new("reg");
    cmd.args(["query", key, "/v", value]);
    #[cfg(target_os = "windows")]
    cmd.creation_flags(0x08000000); // CREATE_NO_WINDOW
    let output = cmd.output().ok()?;
    if !output.status.success() {
        tracing::debug!(key, value, "registry value not present");
        return None;
    }
    parse_reg_output(&String::from_utf8_lossy(&output.stdout), value)
}

/// Pulls the data column out of `reg query` output:
/// `    InstallPath    REG_SZ    C:\Program Files (x86)\Steam`
pub(crate) fn parse_reg_output(stdout: &str, value: &str) -> Option<String> {
    stdout.lines().find_map(|line| {
        let line = line.trim();
        let rest = line.strip_prefix(value)?;
        let (_, data) = rest.split_once("REG_SZ")?;
        let data = data.trim();
        (!data.is_empty()).then(|| data.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reg_sz_line() {
        let stdout = "\r\nHKEY_LOCAL_MACHINE\\SOFTWARE\\WOW6432Node\\Valve\\Steam\r\n    InstallPath    REG_SZ    C:\\Program Files (x86)\\Steam\r\n\r\n";
        assert_eq!(
            parse_reg_output(stdout, "InstallPath").as_deref(),
            Some("C:\\Program Files (x86)\\Steam")
        );
        assert_eq!(parse_reg_output(stdout, "SteamPath"), None);
    }

    #[cfg(unix)]
    #[test]
    fn root_links_yield_common_folder() {
        let dir = tempfile::TempDir::new().unwrap();
        let steam = dir.path().join("Steam");
        std::fs::create_dir_all(steam.join("steamapps").join("common")).unwrap();
        let link = dir.path().join("root");
        std::os::unix::fs::symlink(&steam, &link).unwrap();

        let env = Environment {
            steam_root_links: vec![link.clone(), link],
            ..Environment::default()
        };
        let hits = scan(&env, &DiscoveryConfig::default()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_type, SourceType::Registry);
        assert!(hits[0].file_name.is_none());
    }
}
