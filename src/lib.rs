// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod feedback;
pub mod format;
pub mod logging;
pub mod runtime;
pub mod sensor;
pub mod session;
pub mod stats;
pub mod timer;
pub mod workout;

pub use error::{CommandError, Error, Result};
pub use format::{format_time, TimeFormat};
pub use session::Session;
pub use workout::{Phase, WorkoutState};
