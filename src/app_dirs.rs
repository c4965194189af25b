use directories::ProjectDirs;
use std::path::PathBuf;

/// Env var that overrides where the log file goes
pub const LOG_PATH_ENV: &str = "RESTWATCH_LOG";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(LOG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("restwatch");
            Some(state_dir.join("restwatch.log"))
        } else {
            ProjectDirs::from("", "", "restwatch")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("restwatch.log"))
        }
    }
}
