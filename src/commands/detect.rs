use std::sync::Arc;

use crate::discovery::{Discovery, DiscoveryResult, PathValidation, Role};
use crate::error::Result;

/// Managed state: one discovery engine per app.
pub struct DiscoveryState {
    pub discovery: Arc<Discovery>,
}

impl DiscoveryState {
    pub fn new(discovery: Discovery) -> Self {
        Self {
            discovery: Arc::new(discovery),
        }
    }
}

/// Searches the system for the server and client executables.
#[tauri::command]
pub async fn detect_paths(state: tauri::State<'_, DiscoveryState>) -> Result<DiscoveryResult> {
    let discovery = Arc::clone(&state.discovery);
    Ok(discovery.detect_paths().await)
}

/// Called by the launch flow after every start attempt.
#[tauri::command]
pub async fn record_launch_outcome(
    server_path: String,
    client_path: String,
    success: bool,
    state: tauri::State<'_, DiscoveryState>,
) -> Result<()> {
    let discovery = Arc::clone(&state.discovery);
    tokio::task::spawn_blocking(move || {
        discovery.record_launch_outcome(&server_path, &client_path, success);
    })
    .await
    .map_err(|e| crate::error::LauncherError::Custom(e.to_string()))?;
    Ok(())
}

/// Checks a user-picked executable against the expected names.
#[tauri::command]
pub async fn validate_path(
    path: String,
    role: Role,
    state: tauri::State<'_, DiscoveryState>,
) -> Result<PathValidation> {
    Ok(state.discovery.validate_path(&path, role))
}
