use std::path::{Path, PathBuf};

/// Every location the probes inspect. `detect()` fills it for this host;
/// tests build one by hand over temporary directories.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    /// `(key, value)` pairs queried with `reg query` (Windows only).
    pub registry_keys: Vec<(String, String)>,
    /// Links that point at a Steam install root (`~/.steam/root` on Linux).
    pub steam_root_links: Vec<PathBuf>,
    /// Conventional Steam install roots checked directly.
    pub steam_roots: Vec<PathBuf>,
    pub common_dirs: Vec<PathBuf>,
    pub user_dirs: Vec<PathBuf>,
    /// Folder names guessed under each user directory.
    pub install_folder_names: Vec<String>,
    pub recent_dirs: Vec<PathBuf>,
    pub known_locations: Vec<PathBuf>,
    pub filesystem_roots: Vec<PathBuf>,
    pub deep_walk_roots: Vec<PathBuf>,
}

const INSTALL_FOLDERS: &[&str] = &["SPT", "SPT-AKI", "SPT-AKI-Server", "SPTarkov"];
const VERSIONED_FOLDERS: &[&str] = &["SPT-AKI-3.7", "SPT-AKI-3.8", "SPT-3.9", "SPT-3.10", "SPT-3.11"];

impl Environment {
    pub fn detect() -> Self {
        let home = dirs::home_dir();
        let mut env = Self {
            install_folder_names: INSTALL_FOLDERS.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        };

        let user_bases: Vec<PathBuf> = [
            dirs::desktop_dir(),
            dirs::document_dir(),
            dirs::download_dir(),
            home.as_ref().map(|h| h.join("Games")),
        ]
        .into_iter()
        .flatten()
        .collect();
        env.user_dirs = user_bases.clone();
        env.deep_walk_roots = user_bases;

        if cfg!(windows) {
            env.fill_windows(home.as_deref());
        } else {
            env.fill_unix(home.as_deref());
        }
        env
    }

    fn fill_windows(&mut self, home: Option<&Path>) {
        self.registry_keys = vec![
            (r"HKLM\SOFTWARE\WOW6432Node\Valve\Steam".into(), "InstallPath".into()),
            (r"HKLM\SOFTWARE\Valve\Steam".into(), "InstallPath".into()),
            (r"HKCU\Software\Valve\Steam".into(), "SteamPath".into()),
        ];

        let drives: Vec<PathBuf> = ["C:\\", "D:\\", "E:\\"].iter().map(PathBuf::from).collect();
        let program_files: Vec<PathBuf> = ["ProgramFiles", "ProgramFiles(x86)"]
            .iter()
            .filter_map(std::env::var_os)
            .map(PathBuf::from)
            .collect();

        for base in program_files.iter().chain(drives.iter()) {
            for folder in INSTALL_FOLDERS.iter().chain(VERSIONED_FOLDERS) {
                self.common_dirs.push(base.join(folder));
            }
        }
        for drive in &drives {
            for folder in INSTALL_FOLDERS {
                self.common_dirs.push(drive.join("Games").join(folder));
            }
            self.deep_walk_roots.push(drive.join("Games"));
        }

        self.steam_roots = program_files.iter().map(|p| p.join("Steam")).collect();
        for drive in &drives[1..] {
            self.steam_roots.push(drive.join("Steam"));
            self.steam_roots.push(drive.join("SteamLibrary"));
        }

        if let Some(roaming) = dirs::data_dir() {
            self.recent_dirs
                .push(roaming.join("Microsoft").join("Windows").join("Recent"));
        }

        self.known_locations = vec![
            PathBuf::from(r"C:\SPTarkov"),
            PathBuf::from(r"C:\Battlestate Games\SPT"),
            PathBuf::from(r"C:\Games\EFT-SPT"),
            PathBuf::from(r"D:\SPTarkov"),
            PathBuf::from(r"D:\Games\EFT-SPT"),
        ];

        self.filesystem_roots = drives;
        if let Some(home) = home {
            self.filesystem_roots.push(home.to_path_buf());
        }
    }

    fn fill_unix(&mut self, home: Option<&Path>) {
        for base in [Path::new("/opt"), Path::new("/srv")] {
            for folder in INSTALL_FOLDERS.iter().chain(VERSIONED_FOLDERS) {
                self.common_dirs.push(base.join(folder));
            }
        }

        self.filesystem_roots = vec![PathBuf::from("/"), PathBuf::from("/mnt"), PathBuf::from("/media")];

        let Some(home) = home else {
            return;
        };

        // Wine prefixes are where a Windows-only server ends up on Linux.
        let drive_c = home.join(".wine").join("drive_c");
        for folder in INSTALL_FOLDERS {
            self.common_dirs.push(drive_c.join(folder));
            self.common_dirs.push(drive_c.join("Games").join(folder));
        }

        self.steam_root_links = vec![home.join(".steam").join("root"), home.join(".steam").join("steam")];
        self.steam_roots = vec![home.join(".local").join("share").join("Steam")];
        self.recent_dirs = vec![home.join(".local").join("share").join("RecentDocuments")];
        self.known_locations = vec![
            home.join("SPTarkov"),
            home.join("Games").join("EFT-SPT"),
            drive_c.join("SPTarkov"),
        ];
        self.filesystem_roots.push(home.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_fills_every_probe_root_list() {
        let env = Environment::detect();
        assert!(!env.common_dirs.is_empty());
        assert!(!env.filesystem_roots.is_empty());
        assert_eq!(env.install_folder_names.len(), INSTALL_FOLDERS.len());
        if cfg!(windows) {
            assert_eq!(env.registry_keys.len(), 3);
        } else {
            assert!(env.registry_keys.is_empty());
        }
    }
}
