//! Shared display formatting helpers.

use chrono::{DateTime, Local, TimeZone};

/// Formats an optional ABV for table display: "6.2%" or "-".
pub fn format_abv(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}

/// Formats an optional IBU for table display: "45" or "-".
pub fn format_ibu(value: Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

/// Formats the mean ABV statistic, rounded to one decimal place.
pub fn format_mean_abv(mean: f64) -> String {
    format!("{:.1}%", mean)
}

/// Formats the mean IBU statistic, rounded to the nearest integer.
pub fn format_mean_ibu(mean: f64) -> String {
    format!("{}", mean.round() as i64)
}

/// Formats a store-assigned epoch timestamp as a local date.
pub fn format_date(epoch: i64) -> String {
    Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(|dt: DateTime<Local>| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----".to_string())
}

/// Truncates text to `max` characters, appending an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_abv() {
        assert_eq!(format_abv(Some(6.0)), "6.0%");
        assert_eq!(format_abv(Some(6.25)), "6.2%");
        assert_eq!(format_abv(None), "-");
    }

    #[test]
    fn test_format_ibu() {
        assert_eq!(format_ibu(Some(45)), "45");
        assert_eq!(format_ibu(None), "-");
    }

    #[test]
    fn test_format_means() {
        assert_eq!(format_mean_abv(6.0), "6.0%");
        assert_eq!(format_mean_abv(0.0), "0.0%");
        assert_eq!(format_mean_ibu(44.5), "45");
        assert_eq!(format_mean_ibu(0.0), "0");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long note", 7), "a very…");
    }
}
