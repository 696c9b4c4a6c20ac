//! Normalization of raw indicator text into typed values.
//!
//! Detail pages report numbers in Brazilian locale format (`.` as thousands
//! separator, `,` as decimal separator) mixed with percentages, placeholders
//! and free text. [`normalize`] maps any raw string to an [`IndicatorValue`]
//! and never fails.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Locale-formatted number: optional leading minus, groups of up to three
/// digits separated by `.`, optional comma-decimal suffix. Deliberately
/// rejects non-digit-leading tokens so currency-prefixed strings fall
/// through to the failure branch.
static LOCALE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d{1,3}(?:\.\d{3})*(?:,\d+)?$").expect("locale number pattern is valid")
});

/// A normalized indicator value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum IndicatorValue {
    /// A numeric value. Percentages are stored as fractions (1% = 0.01).
    Number(f64),
    /// Free text left as-is (names, dates, codes).
    Text(String),
    /// Placeholder or malformed numeric text; treated as "not reported".
    Missing,
}

impl IndicatorValue {
    /// Returns the numeric value, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the textual value, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for the [`IndicatorValue::Missing`] marker.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Normalizes one raw indicator string.
///
/// Rules, in priority order:
///
/// 1. Empty and placeholder strings (`"-"`, `"--"`) are [`IndicatorValue::Missing`].
/// 2. Strings containing `%` parse as a percentage divided by 100
///    (`"10,5%"` becomes `0.105`); a failed parse is `Missing`.
/// 3. Locale-formatted numbers parse with `.` stripped and `,` as the
///    decimal point (`"1.234.567,89"` becomes `1234567.89`).
/// 4. Currency-prefixed strings (`"R$ 10,50"`) are `Missing`: they look
///    numeric but never match the plain-number shape.
/// 5. Anything else is returned unchanged as [`IndicatorValue::Text`].
#[must_use]
pub fn normalize(raw: &str) -> IndicatorValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "--" {
        return IndicatorValue::Missing;
    }

    if trimmed.contains('%') {
        return match parse_locale_number(&trimmed.replace('%', "")) {
            Some(value) => IndicatorValue::Number(value / 100.0),
            None => IndicatorValue::Missing,
        };
    }

    if LOCALE_NUMBER.is_match(trimmed) {
        return match parse_locale_number(trimmed) {
            Some(value) => IndicatorValue::Number(value),
            None => IndicatorValue::Missing,
        };
    }

    if trimmed.contains('$') {
        return IndicatorValue::Missing;
    }

    IndicatorValue::Text(raw.to_string())
}

/// Parses a Brazilian locale number after separators are rewritten.
fn parse_locale_number(s: &str) -> Option<f64> {
    s.replace('.', "").replace(',', ".").trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_becomes_fraction() {
        assert_eq!(normalize("10,5%"), IndicatorValue::Number(0.105));
        assert_eq!(normalize("0,81%"), IndicatorValue::Number(0.81 / 100.0));
        assert_eq!(normalize("100%"), IndicatorValue::Number(1.0));
    }

    #[test]
    fn test_percent_with_thousands_separator() {
        assert_eq!(normalize("1.050,0%"), IndicatorValue::Number(10.5));
    }

    #[test]
    fn test_negative_percent() {
        assert_eq!(normalize("-1,2%"), IndicatorValue::Number(-1.2 / 100.0));
    }

    #[test]
    fn test_locale_number_with_separators() {
        assert_eq!(normalize("1.234.567,89"), IndicatorValue::Number(1_234_567.89));
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(normalize("150"), IndicatorValue::Number(150.0));
    }

    #[test]
    fn test_thousands_only() {
        assert_eq!(normalize("1.500"), IndicatorValue::Number(1500.0));
    }

    #[test]
    fn test_negative_number() {
        assert_eq!(normalize("-9,81"), IndicatorValue::Number(-9.81));
    }

    #[test]
    fn test_free_text_unchanged() {
        assert_eq!(
            normalize("Híbrido"),
            IndicatorValue::Text("Híbrido".to_string())
        );
    }

    #[test]
    fn test_dates_stay_textual() {
        assert_eq!(
            normalize("26/12/2024"),
            IndicatorValue::Text("26/12/2024".to_string())
        );
    }

    #[test]
    fn test_placeholders_are_missing() {
        assert!(normalize("--").is_missing());
        assert!(normalize("-").is_missing());
        assert!(normalize("").is_missing());
        assert!(normalize("   ").is_missing());
    }

    #[test]
    fn test_currency_prefix_is_missing() {
        assert!(normalize("R$ 10,50").is_missing());
        assert!(normalize("US$ 1.000,00").is_missing());
    }

    #[test]
    fn test_malformed_percent_is_missing() {
        assert!(normalize("abc%").is_missing());
    }

    #[test]
    fn test_misgrouped_number_is_not_numeric() {
        // "1.2345" breaks the three-digit grouping; it carries no currency
        // sign, so it survives as text rather than a number.
        assert_eq!(
            normalize("1.2345"),
            IndicatorValue::Text("1.2345".to_string())
        );
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        for input in ["%", "%%", "R$", ",", ".", "-%", "1,2,3"] {
            let _ = normalize(input);
        }
    }
}
