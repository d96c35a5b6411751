//! Shared helper functions for CLI commands

use crate::core::report::hours_to_days;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// "123.4h"
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}h", hours)
}

/// "15.4d"
pub fn format_days(hours: f64) -> String {
    format!("{:.1}d", hours_to_days(hours))
}

/// Fraction in [0,1] as "42.0%"
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn format_optional_percent(fraction: Option<f64>) -> String {
    fraction.map(format_percent).unwrap_or_else(|| "-".to_string())
}
