//! Shared formatting utilities for console output

use console::Emoji;

/// Rocket emoji for launch/start operations
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Sparkles emoji for completion/success
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Microscope emoji for analysis/inspection
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Marker appended to truncated previews
pub const ELLIPSIS: &str = "...";

/// Format a reduction percentage with one decimal place
///
/// # Examples
///
/// ```
/// use ir_compare::fmt::format_percent;
///
/// assert_eq!(format_percent(40.0), "40.0%");
/// assert_eq!(format_percent(-12.345), "-12.3%");
/// ```
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Format a signed line delta, always showing the sign
///
/// # Examples
///
/// ```
/// use ir_compare::fmt::format_line_delta;
///
/// assert_eq!(format_line_delta(20), "-20 lines");
/// assert_eq!(format_line_delta(-5), "+5 lines");
/// assert_eq!(format_line_delta(0), "±0 lines");
/// ```
pub fn format_line_delta(removed: i64) -> String {
    match removed {
        0 => "±0 lines".to_string(),
        n if n > 0 => format!("-{} lines", n),
        n => format!("+{} lines", n.unsigned_abs()),
    }
}
