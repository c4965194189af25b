use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing_subscriber::filter::EnvFilter;

/// Send tracing output to `path`, appending.
///
/// The terminal belongs to the UI, so there is no stderr fallback: if the
/// file cannot be opened, logging is simply off. Returns whether a
/// subscriber was installed.
pub fn init_logging(path: &Path) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(file)
        .try_init()
        .is_ok()
}
