//! Extraction of the raw indicator map from detail-page HTML.
//!
//! Detail pages carry their indicators in several loosely structured tables
//! where label cells (`td` with a `label` class marker) and data cells (`td`
//! with a `data` class marker) appear side by side within a row. The
//! extractor pairs them positionally and tolerates any malformed row.

use fii_core::RawIndicators;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static LABEL_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"td[class*="label"]"#).expect("static selector"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"td[class*="data"]"#).expect("static selector"));

/// Parses a detail page into its raw label -> value map.
///
/// Rows with mismatched label/data cell counts pair up to the shorter count;
/// rows without labeled cells contribute nothing. A page with no recognizable
/// table structure yields an empty map, never an error.
#[must_use]
pub fn extract_indicators(html: &str) -> RawIndicators {
    let document = Html::parse_document(html);
    let mut indicators = RawIndicators::new();

    for table in document.select(&TABLE) {
        for row in table.select(&ROW) {
            let labels: Vec<ElementRef<'_>> = row.select(&LABEL_CELL).collect();
            let data: Vec<ElementRef<'_>> = row.select(&DATA_CELL).collect();

            for (label_cell, data_cell) in labels.into_iter().zip(data) {
                let label = label_text(label_cell);
                if label.is_empty() {
                    continue;
                }
                indicators.insert(label, cell_text(data_cell));
            }
        }
    }

    indicators
}

/// Text of a label cell with any embedded help/tooltip span removed, so
/// tooltip text never pollutes the key.
fn label_text(cell: ElementRef<'_>) -> String {
    let mut out = String::new();
    let mut stack: Vec<_> = cell.children().rev().collect();
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                let is_help =
                    element.name() == "span" && element.classes().any(|class| class == "help");
                if !is_help {
                    stack.extend(node.children().rev());
                }
            }
            _ => {}
        }
    }
    clean_text(&out)
}

/// Trimmed, whitespace-normalized text of a data cell.
fn cell_text(cell: ElementRef<'_>) -> String {
    clean_text(&cell.text().collect::<String>())
}

fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_labels_and_data_positionally() {
        let html = r#"
            <table>
              <tr>
                <td class="label w35">Cotação</td><td class="data w35">10,50</td>
                <td class="label">P/VP</td><td class="data">0,95</td>
              </tr>
            </table>
        "#;
        let indicators = extract_indicators(html);
        assert_eq!(indicators.len(), 2);
        assert_eq!(indicators.get("Cotação"), Some("10,50"));
        assert_eq!(indicators.get("P/VP"), Some("0,95"));
    }

    #[test]
    fn test_help_span_is_stripped_from_label() {
        let html = r#"
            <table>
              <tr>
                <td class="label"><span class="help">?</span>FFO Yield</td>
                <td class="data">8,1%</td>
              </tr>
            </table>
        "#;
        let indicators = extract_indicators(html);
        assert_eq!(indicators.get("FFO Yield"), Some("8,1%"));
    }

    #[test]
    fn test_duplicate_label_across_tables_keeps_both_values() {
        let html = r#"
            <table><tr><td class="label">Receita</td><td class="data">100</td></tr></table>
            <table><tr><td class="label">Receita</td><td class="data">25</td></tr></table>
        "#;
        let indicators = extract_indicators(html);
        assert_eq!(indicators.get("Receita"), Some("100"));
        assert_eq!(indicators.get("Receita_2"), Some("25"));
    }

    #[test]
    fn test_mismatched_row_pairs_up_to_shorter_count() {
        let html = r#"
            <table>
              <tr>
                <td class="label">Min 52 sem</td>
                <td class="label">Max 52 sem</td>
                <td class="data">9,10</td>
              </tr>
            </table>
        "#;
        let indicators = extract_indicators(html);
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators.get("Min 52 sem"), Some("9,10"));
        assert!(indicators.get("Max 52 sem").is_none());
    }

    #[test]
    fn test_rows_without_labeled_cells_contribute_nothing() {
        let html = r#"
            <table>
              <tr><td>Cabeçalho</td><td>qualquer</td></tr>
              <tr><td class="data">10,50</td></tr>
            </table>
        "#;
        assert!(extract_indicators(html).is_empty());
    }

    #[test]
    fn test_page_without_tables_yields_empty_map() {
        assert!(extract_indicators("<html><body><p>nada</p></body></html>").is_empty());
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let html = r#"
            <table>
              <tr>
                <td class="label">  Vol $ méd
                     (2m)  </td>
                <td class="data">  1.234  </td>
              </tr>
            </table>
        "#;
        let indicators = extract_indicators(html);
        assert_eq!(indicators.get("Vol $ méd (2m)"), Some("1.234"));
    }
}
