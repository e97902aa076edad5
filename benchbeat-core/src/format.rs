//! Display formatting for currency magnitudes and percentages.

/// Rendered in place of any value that could not be retrieved or computed.
pub const MISSING: &str = "N/A";

const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;

/// `$2.50B`, `$2.50M`, `$999.00`, or `N/A`.
///
/// Negative values never reach the magnitude branches and render as plain amounts.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => {
            if v >= BILLION {
                format!("${:.2}B", v / BILLION)
            } else if v >= MILLION {
                format!("${:.2}M", v / MILLION)
            } else {
                format!("${v:.2}")
            }
        }
        _ => MISSING.to_string(),
    }
}

/// `12.35%` or `N/A`.
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.2}%"),
        _ => MISSING.to_string(),
    }
}
