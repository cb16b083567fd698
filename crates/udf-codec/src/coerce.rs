//! Value coercion for numeric descriptors.

use tracing::warn;
use udf_model::ScalarValue;

/// Parse numeric text.
///
/// Accepts surrounding whitespace and thousands separators ("1,234.5").
/// Non-finite results are rejected because they have no JSON form.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = trimmed.replace([',', '\u{a0}'], "");
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a value bound to a numeric field.
///
/// Numbers are kept, numeric text is parsed, booleans become 1/0. Empty or
/// unparseable text becomes null.
pub fn coerce_numeric(field: &str, value: &ScalarValue) -> ScalarValue {
    match value {
        ScalarValue::Null => ScalarValue::Null,
        ScalarValue::Number(n) => ScalarValue::Number(*n),
        ScalarValue::Bool(flag) => ScalarValue::Number(if *flag { 1.0 } else { 0.0 }),
        ScalarValue::Text(text) => match parse_numeric(text) {
            Some(n) => ScalarValue::Number(n),
            None => {
                if !text.trim().is_empty() {
                    warn!(field, value = %text, "non-numeric text for numeric field, using null");
                }
                ScalarValue::Null
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_formats() {
        assert_eq!(parse_numeric(" 42 "), Some(42.0));
        assert_eq!(parse_numeric("-3.5"), Some(-3.5));
        assert_eq!(parse_numeric("1,234.5"), Some(1234.5));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("abc"), None);
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(
            coerce_numeric("n", &ScalarValue::text("7")),
            ScalarValue::Number(7.0)
        );
        assert_eq!(
            coerce_numeric("n", &ScalarValue::Bool(true)),
            ScalarValue::Number(1.0)
        );
        assert_eq!(coerce_numeric("n", &ScalarValue::text("")), ScalarValue::Null);
        assert_eq!(coerce_numeric("n", &ScalarValue::text("x")), ScalarValue::Null);
        assert_eq!(
            coerce_numeric("n", &ScalarValue::Number(2.5)),
            ScalarValue::Number(2.5)
        );
    }
}
