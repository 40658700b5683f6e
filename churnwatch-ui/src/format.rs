//! Display formatting shared by the components.

/// Group digits in thousands: `12480` -> `12,480`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// At most two fraction digits, trailing zeros dropped
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Fraction as a percentage with one decimal: `0.2734` -> `27.3%`
pub fn format_fraction(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Model accuracy, or "N/A" when the model has not been evaluated
pub fn accuracy_label(accuracy: Option<f64>) -> String {
    match accuracy {
        Some(accuracy) if accuracy != 0.0 => format_fraction(accuracy),
        _ => "N/A".to_string(),
    }
}
