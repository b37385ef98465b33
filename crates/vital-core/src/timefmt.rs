//! Humanized time labels for the dashboard.
//!
//! Both functions take `now` explicitly so they stay pure and testable.

use jiff::Timestamp;

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Label for a patient's last visit.
///
/// With a timestamp, whole elapsed days (clamped at zero) bucket into
/// "Today" / "N day(s) ago" / "N week(s) ago". Without one, a
/// deterministic fallback derived from the patient's ordinal index keeps
/// the label stable across renders.
pub fn last_visit_label(created_at: Option<Timestamp>, index: usize, now: Timestamp) -> String {
    if let Some(ts) = created_at {
        let ms = now.duration_since(ts).as_millis();
        let days = (ms / 86_400_000).max(0) as i64;
        if days == 0 {
            return "Today".to_string();
        }
        if days == 1 {
            return "1 day ago".to_string();
        }
        if days < 7 {
            return format!("{days} days ago");
        }
        let weeks = days / 7;
        if weeks == 1 {
            return "1 week ago".to_string();
        }
        return format!("{weeks} weeks ago");
    }

    let fallback = (index % 6) as i64 + 1;
    format!("{fallback} day{} ago", plural(fallback))
}

/// Coarse relative label for an update's publication time, e.g.
/// "5 min ago", "3 hours ago", "2 weeks ago". Each unit is rounded from
/// the previous one, so the label matches what the dashboard has always
/// shown.
pub fn relative_label(timestamp: Option<Timestamp>, now: Timestamp) -> String {
    let Some(ts) = timestamp else {
        return "Just now".to_string();
    };

    let ms = now.duration_since(ts).as_millis() as f64;
    let minutes = (ms / 60_000.0).round() as i64;
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    let hours = (minutes as f64 / 60.0).round() as i64;
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    let days = (hours as f64 / 24.0).round() as i64;
    if days < 7 {
        return format!("{days} day{} ago", plural(days));
    }
    let weeks = (days as f64 / 7.0).round() as i64;
    if weeks < 5 {
        return format!("{weeks} week{} ago", plural(weeks));
    }
    let months = (days as f64 / 30.0).round() as i64;
    if months < 12 {
        return format!("{months} month{} ago", plural(months));
    }
    let years = (days as f64 / 365.0).round() as i64;
    format!("{years} year{} ago", plural(years))
}
