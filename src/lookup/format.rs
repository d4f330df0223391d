//! Current-time rendering for an IANA timezone
//!
//! Produces display strings like `Asia/Bangkok – Fri, May 2, 9:30 AM` for the
//! current instant. The timestamp itself is never cached, only the zone, so
//! every call renders fresh.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use super::TimeFormatter;

/// Layout of the time portion of the display string
const TIME_LAYOUT: &str = "%a, %b %-d, %-I:%M %p";

/// Errors that can occur when formatting a timezone
#[derive(Debug, Error)]
pub enum FormatError {
    /// The identifier is blank or not a known IANA zone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Formatter that renders clock time in a given zone
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockFormatter;

impl ClockFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render a specific instant in the given zone
    ///
    /// Split out from the trait method so tests can pin the instant.
    fn format_at(&self, timezone: &str, instant: DateTime<Utc>) -> Result<String, FormatError> {
        let name = timezone.trim();
        if name.is_empty() {
            return Err(FormatError::InvalidTimezone(timezone.to_string()));
        }

        let tz: Tz = name
            .parse()
            .map_err(|_| FormatError::InvalidTimezone(name.to_string()))?;

        let local = instant.with_timezone(&tz);
        Ok(format!("{} – {}", tz.name(), local.format(TIME_LAYOUT)))
    }
}

impl TimeFormatter for ClockFormatter {
    fn format(&self, timezone: &str) -> Result<String, FormatError> {
        self.format_at(timezone, Utc::now())
    }
}
