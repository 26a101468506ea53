use chrono::{DateTime, Utc};
use console::style;
use std::fmt::Display;
use std::path::Path;

/// Print a non-fatal problem to stderr.
pub fn warn(message: impl Display) {
    eprintln!("{} {message}", style("warning:").yellow().bold().for_stderr());
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Describe `then` relative to `now` the way `git log --format=%ar` does.
pub fn relative_time(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *then).num_seconds();
    if secs < 0 {
        return "in the future".to_string();
    }
    if secs < 90 {
        return format!("{} ago", plural(secs, "second"));
    }

    let minutes = (secs + 30) / 60;
    if minutes < 90 {
        return format!("{} ago", plural(minutes, "minute"));
    }

    let hours = (minutes + 30) / 60;
    if hours < 36 {
        return format!("{} ago", plural(hours, "hour"));
    }

    let days = (hours + 12) / 24;
    if days < 14 {
        return format!("{} ago", plural(days, "day"));
    }
    if days < 70 {
        return format!("{} ago", plural((days + 3) / 7, "week"));
    }
    if days < 365 {
        return format!("{} ago", plural((days + 15) / 30, "month"));
    }
    if days < 1825 {
        let total_months = (days * 12 * 2 + 365) / (365 * 2);
        let years = total_months / 12;
        let months = total_months % 12;
        if months > 0 {
            return format!("{}, {} ago", plural(years, "year"), plural(months, "month"));
        }
        return format!("{} ago", plural(years, "year"));
    }

    format!("{} ago", plural((days + 183) / 365, "year"))
}

/// Final component of `path`; `None` for paths like `/`.
pub fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().to_string())
}
