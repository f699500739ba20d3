//! Dutch-style number formatting for the side panel (`1.234.567`).

/// Round to a whole number (halves go up, so -2.5 becomes -2) and group
/// thousands with dots.
pub fn format_dutch(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let rounded = (value + 0.5).floor();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// `"1.234 m³"`, or `"N/A"` when the figure is missing.
pub fn format_figure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{} {}", format_dutch(v), unit),
        _ => "N/A".to_string(),
    }
}

pub fn format_euro(value: f64) -> String {
    format!("€ {}", format_dutch(value))
}
