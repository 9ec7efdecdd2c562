/// Canonical form used for every identity comparison: trimmed and lowercased.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Render a spreadsheet number the way a cell would display it when used as text.
///
/// Integral values drop the fractional part (`12.0` -> `"12"`).
pub fn number_to_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Truncate a spreadsheet number toward zero.
///
/// Non-finite values have no integer meaning and yield `None`.
pub fn truncate_count(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some(value.trunc() as i64)
    } else {
        None
    }
}
