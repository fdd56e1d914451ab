//! German-locale numeric parsing and formatting.
//!
//! The published CSV files use `;` as the field separator and `,` as the
//! decimal separator ("12,3"). Values that cannot be read as numbers are
//! treated as missing rather than as errors, matching how the measurement
//! tables are curated (blank cells, "n/a" placeholders and free text all
//! mean "no reading").

/// Parse a decimal string with either a comma or a dot separator.
///
/// Returns `None` for empty strings, the usual missing-value placeholders
/// and anything else that does not read as a finite number.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.to_lowercase().as_str() {
        "na" | "n/a" | "nan" | "null" | "-" => return None,
        _ => {}
    }
    let dotted = trimmed.replace(',', ".");
    dotted.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a value with up to `max_places` fraction digits, trailing zeros
/// trimmed, using the German decimal comma.
pub fn format_decimal(value: f64, max_places: usize) -> String {
    let mut s = format!("{value:.max_places$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s.replace('.', ",")
}

/// Format a value with exactly `places` fraction digits and a decimal comma.
pub fn format_decimal_fixed(value: f64, places: usize) -> String {
    format!("{value:.places$}").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_and_dot_decimals() {
        assert_eq!(parse_decimal("12,3"), Some(12.3));
        assert_eq!(parse_decimal("12.3"), Some(12.3));
        assert_eq!(parse_decimal(" 0,05 "), Some(0.05));
        assert_eq!(parse_decimal("-7,5"), Some(-7.5));
        assert_eq!(parse_decimal("13"), Some(13.0));
    }

    #[test]
    fn missing_values_parse_to_none() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal("NA"), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("keine Messung"), None);
    }

    #[test]
    fn thousands_separators_are_not_supported() {
        // "1.234,5" turns into "1.234.5" after comma replacement and is
        // rejected, same as the upstream coercion.
        assert_eq!(parse_decimal("1.234,5"), None);
    }

    #[test]
    fn formats_with_decimal_comma() {
        assert_eq!(format_decimal(12.3, 4), "12,3");
        assert_eq!(format_decimal(13.0, 4), "13");
        assert_eq!(format_decimal(0.05, 2), "0,05");
    }

    #[test]
    fn fixed_formatting_keeps_zeros() {
        assert_eq!(format_decimal_fixed(12.96, 4), "12,9600");
        assert_eq!(format_decimal_fixed(13.1, 4), "13,1000");
        assert_eq!(format_decimal_fixed(7.0, 2), "7,00");
    }

    #[test]
    fn round_trips_through_format_and_parse() {
        for v in [12.3, 0.05, 101.25, -3.5] {
            let formatted = format_decimal(v, 6);
            assert_eq!(parse_decimal(&formatted), Some(v));
        }
    }
}
