//! Result presentation for the terminal and for Alfred
//!
//! Success and failure are rendered either as plain text or as Alfred Script
//! Filter JSON. Failures carry distinct markers: an info icon for the missing
//! query prompt, a warning icon when a place or timezone cannot be found, and
//! an error icon for format and cache problems.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::resolver::{Resolution, ResolveError};

const ICON_INFO: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/ToolbarInfo.icns";
const ICON_WARNING: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/AlertCautionIcon.icns";
const ICON_ERROR: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/AlertStopIcon.icns";
const ICON_CLOCK: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/Clock.icns";

/// Semantic class of a failure, mapped to an icon in Alfred output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Info,
    Warning,
    Error,
}

impl Marker {
    fn icon_path(self) -> &'static str {
        match self {
            Marker::Info => ICON_INFO,
            Marker::Warning => ICON_WARNING,
            Marker::Error => ICON_ERROR,
        }
    }
}

/// Title, detail, and marker for a failure
fn failure_parts(err: &ResolveError) -> (&'static str, String, Marker) {
    match err {
        ResolveError::EmptyQuery => (
            "Enter a city name",
            "Example: timein Bangkok".to_string(),
            Marker::Info,
        ),
        ResolveError::PlaceNotFound(_) => ("City not found", err.to_string(), Marker::Warning),
        ResolveError::TimezoneNotFound(_) => {
            ("Timezone not found", err.to_string(), Marker::Warning)
        }
        ResolveError::FormatFailed(_) => ("Could not format time", err.to_string(), Marker::Error),
        ResolveError::CacheWriteFailed(_) => ("Cache error", err.to_string(), Marker::Error),
    }
}

/// Alfred Script Filter output envelope
#[derive(Debug, Serialize)]
struct ScriptFilterOutput {
    items: Vec<Item>,
}

/// A single Alfred Script Filter row
#[derive(Debug, Serialize)]
struct Item {
    title: String,
    subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    arg: Option<String>,
    valid: bool,
    icon: Icon,
}

#[derive(Debug, Serialize)]
struct Icon {
    path: &'static str,
}

/// Renders resolutions and failures in the selected output format
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    format: OutputFormat,
}

impl Presenter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a successful resolution
    pub fn success(&self, resolution: &Resolution) -> String {
        match self.format {
            OutputFormat::Plain => resolution.display.clone(),
            OutputFormat::Alfred => {
                let cached_note = if resolution.cached { " (cached)" } else { "" };
                to_json(&ScriptFilterOutput {
                    items: vec![Item {
                        title: resolution.display.clone(),
                        subtitle: format!("Current time in {}{}", resolution.query, cached_note),
                        arg: Some(resolution.display.clone()),
                        valid: true,
                        icon: Icon { path: ICON_CLOCK },
                    }],
                })
            }
        }
    }

    /// Render a failure with its title, detail, and marker
    pub fn failure(&self, err: &ResolveError) -> String {
        let (title, detail, marker) = failure_parts(err);
        match self.format {
            OutputFormat::Plain => match err {
                ResolveError::EmptyQuery => format!("{}. {}", title, detail),
                _ => format!("Error: {}", detail),
            },
            OutputFormat::Alfred => to_json(&ScriptFilterOutput {
                items: vec![Item {
                    title: title.to_string(),
                    subtitle: detail,
                    arg: None,
                    valid: false,
                    icon: Icon {
                        path: marker.icon_path(),
                    },
                }],
            }),
        }
    }
}

/// Serialization of these plain-string structs cannot fail; fall back to an
/// empty item list rather than panicking if it somehow does.
fn to_json(output: &ScriptFilterOutput) -> String {
    serde_json::to_string(output).unwrap_or_else(|_| r#"{"items":[]}"#.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution() -> Resolution {
        Resolution {
            query: "Bangkok".to_string(),
            timezone: "Asia/Bangkok".to_string(),
            display: "Asia/Bangkok – Fri, May 2, 9:30 AM".to_string(),
            cached: false,
        }
    }

    #[test]
    fn test_plain_success_is_the_display_string() {
        let presenter = Presenter::new(OutputFormat::Plain);
        assert_eq!(
            presenter.success(&resolution()),
            "Asia/Bangkok – Fri, May 2, 9:30 AM"
        );
    }

    #[test]
    fn test_plain_failure_prefixes_error() {
        let presenter = Presenter::new(OutputFormat::Plain);
        let rendered = presenter.failure(&ResolveError::PlaceNotFound(
            "No results found for: Nowhereville".to_string(),
        ));
        assert!(rendered.starts_with("Error: "));
        assert!(rendered.contains("Nowhereville"));
    }

    #[test]
    fn test_plain_empty_query_prompt() {
        let presenter = Presenter::new(OutputFormat::Plain);
        let rendered = presenter.failure(&ResolveError::EmptyQuery);
        assert!(rendered.contains("Enter a city name"));
        assert!(rendered.contains("timein Bangkok"));
    }

    #[test]
    fn test_alfred_success_shape() {
        let presenter = Presenter::new(OutputFormat::Alfred);
        let json: serde_json::Value =
            serde_json::from_str(&presenter.success(&resolution())).expect("Valid JSON");

        let item = &json["items"][0];
        assert_eq!(item["title"], "Asia/Bangkok – Fri, May 2, 9:30 AM");
        assert_eq!(item["subtitle"], "Current time in Bangkok");
        assert_eq!(item["arg"], "Asia/Bangkok – Fri, May 2, 9:30 AM");
        assert_eq!(item["valid"], true);
        assert_eq!(item["icon"]["path"], ICON_CLOCK);
    }

    #[test]
    fn test_alfred_success_marks_cached_hits() {
        let presenter = Presenter::new(OutputFormat::Alfred);
        let mut cached = resolution();
        cached.cached = true;

        let json: serde_json::Value =
            serde_json::from_str(&presenter.success(&cached)).expect("Valid JSON");
        assert_eq!(json["items"][0]["subtitle"], "Current time in Bangkok (cached)");
    }

    #[test]
    fn test_alfred_failures_carry_distinct_icons() {
        let presenter = Presenter::new(OutputFormat::Alfred);

        let empty: serde_json::Value =
            serde_json::from_str(&presenter.failure(&ResolveError::EmptyQuery)).expect("JSON");
        assert_eq!(empty["items"][0]["icon"]["path"], ICON_INFO);
        assert_eq!(empty["items"][0]["valid"], false);
        assert!(empty["items"][0].get("arg").is_none());

        let not_found: serde_json::Value = serde_json::from_str(
            &presenter.failure(&ResolveError::PlaceNotFound("nope".to_string())),
        )
        .expect("JSON");
        assert_eq!(not_found["items"][0]["icon"]["path"], ICON_WARNING);

        let format_failed: serde_json::Value = serde_json::from_str(
            &presenter.failure(&ResolveError::FormatFailed("bad zone".to_string())),
        )
        .expect("JSON");
        assert_eq!(format_failed["items"][0]["icon"]["path"], ICON_ERROR);
    }
}
