//! Locates a local SPT server and client install, ranks the guesses, and
//! learns from launch outcomes.

#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod util;

pub use config::DiscoveryConfig;
pub use discovery::{Discovery, DiscoveryResult, Hit, LearningRecord, LearningStore, PathValidation, Role, SourceType};
pub use error::{LauncherError, Result};

#[cfg(feature = "desktop")]
pub fn run() {
    logging::init(false);

    let discovery = match Discovery::for_host() {
        Ok(discovery) => discovery,
        Err(e) => {
            tracing::error!(error = %e, "cannot open learning store, falling back to a temporary one");
            Discovery::new(
                discovery::Environment::detect(),
                DiscoveryConfig::load(),
                LearningStore::new(std::env::temp_dir().join("spt-launcher").join("learning.json")),
            )
        }
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_fs::init())
        .manage(commands::detect::DiscoveryState::new(discovery))
        .invoke_handler(tauri::generate_handler![
            commands::detect::detect_paths,
            commands::detect::record_launch_outcome,
            commands::detect::validate_path,
        ])
        .run(tauri::generate_context!())
        .expect("failed to run SPT Launcher");
}
