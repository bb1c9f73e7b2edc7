//! Steam library folders: `steamapps/common` under every known root and every
//! library declared in `libraryfolders.vdf`.

use std::path::{Path, PathBuf};

use super::{child_dirs, known_executables, registry::declared_steam_roots};
use crate::config::DiscoveryConfig;
use crate::discovery::{Environment, Hit, SourceType};
use crate::error::Result;

pub fn scan(env: &Environment, config: &DiscoveryConfig) -> Result<Vec<Hit>> {
    let mut roots = env.steam_roots.clone();
    for root in declared_steam_roots(env) {
        if !roots.contains(&root) {
            roots.push(root);
        }
    }

    let mut libraries: Vec<PathBuf> = Vec::new();
    for root in roots.iter().filter(|r| r.is_dir()) {
        for library in std::iter::once(root.clone()).chain(library_folders(root)) {
            if !libraries.contains(&library) {
                libraries.push(library);
            }
        }
    }

    let mut hits = Vec::new();
    for library in &libraries {
        let common = library.join("steamapps").join("common");
        for game_dir in child_dirs(&common) {
            if !is_game_dir(&game_dir, config) {
                continue;
            }
            hits.extend(
                known_executables(&game_dir, config)
                    .into_iter()
                    .map(|exe| Hit::file(SourceType::Steam, exe)),
            );
        }
    }
    Ok(hits)
}

fn is_game_dir(dir: &Path, config: &DiscoveryConfig) -> bool {
    super::dir_name_matches(dir, &config.keywords) || super::dir_name_matches(dir, &config.store_game_dirs)
}

/// Library paths listed in `<root>/steamapps/libraryfolders.vdf`.
fn library_folders(root: &Path) -> Vec<PathBuf> {
    let vdf = root.join("steamapps").join("libraryfolders.vdf");
    std::fs::read_to_string(vdf)
        .map(|content| parse_library_folders(&content))
        .unwrap_or_default()
}

/// Extracts `"path"  "..."` entries; backslashes are escaped as `\\` in VDF.
pub(crate) fn parse_library_folders(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let rest = line.strip_prefix("\"path\"")?.trim();
            let value = rest.strip_prefix('"')?.strip_suffix('"')?;
            Some(PathBuf::from(value.replace("\\\\", "\\")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_library_paths() {
        let vdf = r#"
"libraryfolders"
{
	"0"
	{
		"path"		"C:\\Program Files (x86)\\Steam"
		"label"		""
	}
	"1"
	{
		"path"		"D:\\SteamLibrary"
	}
}
"#;
        assert_eq!(
            parse_library_folders(vdf),
            vec![
                PathBuf::from(r"C:\Program Files (x86)\Steam"),
                PathBuf::from(r"D:\SteamLibrary"),
            ]
        );
    }

    #[test]
    fn scans_declared_libraries_for_game_dirs() {
        let dir = TempDir::new().unwrap();
        let steam = dir.path().join("Steam");
        let library = dir.path().join("Library2");
        std::fs::create_dir_all(steam.join("steamapps").join("common").join("Portal")).unwrap();
        let tarkov = library.join("steamapps").join("common").join("EscapeFromTarkov");
        std::fs::create_dir_all(&tarkov).unwrap();
        std::fs::write(tarkov.join("SPT.Server.exe"), b"").unwrap();
        std::fs::write(
            steam.join("steamapps").join("libraryfolders.vdf"),
            format!("\"libraryfolders\"\n{{\n\"1\"\n{{\n\"path\"\t\t\"{}\"\n}}\n}}\n", library.display()),
        )
        .unwrap();

        let env = Environment {
            steam_roots: vec![steam],
            ..Environment::default()
        };
        let hits = scan(&env, &DiscoveryConfig::default()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_type, SourceType::Steam);
        assert_eq!(hits[0].file_path.as_deref(), Some(tarkov.join("SPT.Server.exe").as_path()));
    }
}
