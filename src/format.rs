use crate::error::{Error, Result};

/// Which tier set applies when rendering a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// Seconds, then minutes. Never rolls over into hours.
    Interval,
    /// Seconds, minutes, then hours from 3600s up.
    TotalWorkout,
}

/// Render a whole number of seconds as `45s`, `2m 05s` or `1h 01m 01s`.
pub fn format_time(seconds: i64, format: TimeFormat) -> Result<String> {
    if seconds < 0 {
        return Err(Error::NegativeDuration(seconds));
    }

    let formatted = match (format, seconds) {
        (_, s) if s < 60 => format!("{s}s"),
        (TimeFormat::TotalWorkout, s) if s >= 3600 => {
            format!("{}h {:02}m {:02}s", s / 3600, (s % 3600) / 60, s % 60)
        }
        (_, s) => format!("{}m {:02}s", s / 60, s % 60),
    };

    Ok(formatted)
}

/// Shorthand for the counters the workout keeps, which are never negative.
pub fn format_secs(seconds: u32, format: TimeFormat) -> String {
    // u32 always fits in i64, so this cannot hit the negative branch
    format_time(i64::from(seconds), format).unwrap_or_default()
}
