//! Label-keyed indicator maps scraped from a fund detail page.
//!
//! Detail pages repeat some labels across table sections (a 12-month block
//! and a 3-month block share `Receita`, for example), so both maps preserve
//! insertion order and disambiguate repeated labels with a numeric suffix
//! instead of overwriting.

use crate::normalize::{IndicatorValue, normalize};

/// Ordered label -> raw text mapping, as extracted from the page.
///
/// Labels keep their source casing and spacing. A second occurrence of a
/// label is stored under `{label}_2`, a third under `{label}_3`, and so on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawIndicators {
    entries: Vec<(String, String)>,
}

impl RawIndicators {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a label/value pair, suffixing the label if already present.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let key = if self.contains(&label) {
            let mut n = 2;
            while self.contains(&format!("{label}_{n}")) {
                n += 1;
            }
            format!("{label}_{n}")
        } else {
            label
        };
        self.entries.push((key, value.into()));
    }

    /// Returns the raw value stored under an exact label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if an exact label is present.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == label)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(label, raw value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Ordered label -> [`IndicatorValue`] mapping, the normalized counterpart
/// of [`RawIndicators`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndicatorSet {
    entries: Vec<(String, IndicatorValue)>,
}

impl IndicatorSet {
    /// Normalizes every raw value, keeping keys and order.
    #[must_use]
    pub fn from_raw(raw: &RawIndicators) -> Self {
        Self {
            entries: raw
                .iter()
                .map(|(label, value)| (label.to_string(), normalize(value)))
                .collect(),
        }
    }

    /// Returns the normalized value stored under an exact label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&IndicatorValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value)
    }

    /// Looks up a label and returns its numeric value, if both exist.
    #[must_use]
    pub fn number(&self, label: &str) -> Option<f64> {
        self.get(label).and_then(IndicatorValue::as_number)
    }

    /// Looks up a label and returns its textual value, if both exist.
    #[must_use]
    pub fn text(&self, label: &str) -> Option<String> {
        self.get(label)
            .and_then(IndicatorValue::as_text)
            .map(str::to_string)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut raw = RawIndicators::new();
        raw.insert("Cotação", "10,50");
        assert_eq!(raw.get("Cotação"), Some("10,50"));
        assert!(raw.get("FFO").is_none());
    }

    #[test]
    fn test_duplicate_label_gets_suffix() {
        let mut raw = RawIndicators::new();
        raw.insert("Receita", "100");
        raw.insert("Receita", "25");
        assert_eq!(raw.get("Receita"), Some("100"));
        assert_eq!(raw.get("Receita_2"), Some("25"));
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn test_third_occurrence_gets_next_suffix() {
        let mut raw = RawIndicators::new();
        raw.insert("FFO", "1");
        raw.insert("FFO", "2");
        raw.insert("FFO", "3");
        assert_eq!(raw.get("FFO"), Some("1"));
        assert_eq!(raw.get("FFO_2"), Some("2"));
        assert_eq!(raw.get("FFO_3"), Some("3"));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut raw = RawIndicators::new();
        raw.insert("b", "2");
        raw.insert("a", "1");
        let keys: Vec<&str> = raw.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_from_raw_normalizes_values() {
        let mut raw = RawIndicators::new();
        raw.insert("Cotação", "10,50");
        raw.insert("Mandato", "Híbrido");
        raw.insert("Vacância Média", "--");

        let set = IndicatorSet::from_raw(&raw);
        assert_eq!(set.number("Cotação"), Some(10.5));
        assert_eq!(set.text("Mandato"), Some("Híbrido".to_string()));
        assert!(set.get("Vacância Média").is_some_and(IndicatorValue::is_missing));
        assert_eq!(set.number("Vacância Média"), None);
    }

    #[test]
    fn test_number_lookup_on_text_is_none() {
        let mut raw = RawIndicators::new();
        raw.insert("Nome", "FII Exemplo");
        let set = IndicatorSet::from_raw(&raw);
        assert_eq!(set.number("Nome"), None);
        assert_eq!(set.text("Nome"), Some("FII Exemplo".to_string()));
    }
}
