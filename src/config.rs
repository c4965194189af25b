use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::error::Result;
use crate::session::SessionConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// UI refresh interval
    pub tick_rate_ms: u64,
    /// Sensor switch position at launch
    pub sensor_enabled: bool,
    /// How long a feedback banner stays up
    pub feedback_secs: u64,
    /// Rest time shown in orange from here
    pub rest_warning_secs: u32,
    /// Rest time shown in red from here
    pub rest_alert_secs: u32,
    pub min_auto_rest_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            sensor_enabled: true,
            feedback_secs: 3,
            rest_warning_secs: 240,
            rest_alert_secs: 300,
            min_auto_rest_secs: 3,
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn feedback_ttl(&self) -> Duration {
        Duration::from_secs(self.feedback_secs)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            sensor_enabled: self.sensor_enabled,
            min_auto_rest_secs: self.min_auto_rest_secs,
            ..SessionConfig::default()
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "restwatch") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("restwatch_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing file means defaults. A file that exists but does not parse
    /// also means defaults, with a warning in the log.
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
