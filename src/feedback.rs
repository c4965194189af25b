use std::time::Duration;

use crate::error::CommandError;
use crate::format::{format_secs, TimeFormat};
use crate::workout::SetRecord;

/// A transient message for the user. Display timing is up to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub is_warning: bool,
}

impl Feedback {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_warning: false,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_warning: true,
        }
    }

    pub fn started(sensor_enabled: bool) -> Self {
        Self::info(format!(
            "Workout started! {}",
            if sensor_enabled {
                "Sensor activated"
            } else {
                "Manual mode"
            }
        ))
    }

    pub fn paused(is_paused: bool) -> Self {
        Self::info(if is_paused {
            "Workout paused"
        } else {
            "Workout resumed"
        })
    }

    pub fn set_completed(record: &SetRecord) -> Self {
        if record.is_new_best {
            Self::info(format!(
                "New best time! {}",
                format_secs(record.rest_secs, TimeFormat::Interval)
            ))
        } else {
            Self::info(format!("Set {} completed! Resting...", record.number))
        }
    }

    pub fn reset() -> Self {
        Self::info("Workout reset. Ready to start again")
    }

    pub fn sensor(enabled: bool) -> Self {
        Self::info(if enabled {
            "Sensor enabled"
        } else {
            "Sensor disabled"
        })
    }
}

impl From<CommandError> for Feedback {
    fn from(err: CommandError) -> Self {
        Self::warning(err.to_string())
    }
}

/// A feedback message with a countdown, held by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub feedback: Feedback,
    remaining: Duration,
}

impl Banner {
    pub fn new(feedback: Feedback, ttl: Duration) -> Self {
        Self {
            feedback,
            remaining: ttl,
        }
    }

    /// Count down by `dt`. Returns false once the banner has expired.
    pub fn on_tick(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        !self.remaining.is_zero()
    }
}
