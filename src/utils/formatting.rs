//! Formatting utilities used for CLI outputs.

use crate::models::work_mode::WorkMode;

/// Whole hours + remainder minutes, floor-rounded: `2h 5m`.
pub fn duration_hm(mins: i64) -> String {
    let m = mins.max(0);
    format!("{}h {}m", m / 60, m % 60)
}

/// Hours with one decimal, as shown in the monthly overview: `7.5h`.
pub fn hours_1dp(hours: f64) -> String {
    format!("{:.1}h", hours)
}

pub fn percent_1dp(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}%", r * 100.0),
        None => "--".to_string(),
    }
}

pub fn pad_right(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Text label and ANSI colour for a work mode.
pub fn describe_work_mode(mode: WorkMode) -> (&'static str, &'static str) {
    match mode {
        WorkMode::OnSite => (mode.label(), "\x1b[34m"),
        WorkMode::Remote => (mode.label(), "\x1b[35m"),
    }
}
