//! Time utilities

use chrono::{DateTime, Utc};

/// Format a past timestamp relative to now ("just now", "2 hours ago").
/// Timestamps older than a week fall back to the calendar date.
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - then;
    let seconds = diff.num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if days > 7 {
        then.format("%Y-%m-%d").to_string()
    } else if days > 0 {
        format!("{} day{} ago", days, plural(days))
    } else if hours > 0 {
        format!("{} hour{} ago", hours, plural(hours))
    } else {
        format!("{} minute{} ago", minutes, plural(minutes))
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}
