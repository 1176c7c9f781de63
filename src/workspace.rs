//! Workspace naming.
use chrono::{DateTime, Local, TimeZone};

/// Timestamp layout for generated workspace names (14 digits).
pub const WORKSPACE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Workspace name derived from the current local time.
pub fn default_workspace_name() -> String {
    workspace_name_at(&Local::now())
}

pub fn workspace_name_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(WORKSPACE_TIMESTAMP_FORMAT).to_string()
}

/// Use the requested workspace name, or generate one.
pub fn resolve_workspace_name(explicit: Option<&str>) -> String {
    explicit
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(default_workspace_name)
}
