//! Table row extraction and aggregate-row filtering
//!
//! ERP tables mix data rows with footer/aggregate rows ("Итого:" totals
//! rendered as a single cell spanning the full 15-column grid). Every lookup
//! in the suite works on [`RowSnapshot`]s with aggregates filtered out.

use serde::{Deserialize, Serialize};

/// One `<tr>` as read from the live DOM in a single evaluate round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSnapshot {
    /// Trimmed `innerText` of each cell, in order.
    pub cells: Vec<String>,

    /// `colspan` attribute of the first cell, when set.
    pub first_colspan: Option<u32>,
}

/// Column span used by the ERP for totals rows.
const AGGREGATE_COLSPAN: u32 = 15;

/// Marker text of totals rows.
const AGGREGATE_MARKER: &str = "Итого:";

impl RowSnapshot {
    /// Totals/footer row: excluded from every search.
    pub fn is_aggregate(&self) -> bool {
        if self.first_colspan == Some(AGGREGATE_COLSPAN) {
            return true;
        }
        self.cells.iter().any(|c| c.contains(AGGREGATE_MARKER))
    }

    /// Cell text by index, empty when the row is shorter.
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Data rows only, aggregates removed. Correct for any row count >= 0.
pub fn data_rows(rows: &[RowSnapshot]) -> Vec<&RowSnapshot> {
    rows.iter().filter(|r| !r.is_aggregate()).collect()
}

/// Find the data row whose `column` cell normalizes to `key`.
///
/// `normalize` is applied to both sides so callers can match order keys and
/// dates regardless of surface-specific decoration.
pub fn find_by_key<'a, F>(
    rows: &'a [RowSnapshot],
    column: usize,
    key: &str,
    normalize: F,
) -> Option<&'a RowSnapshot>
where
    F: Fn(&str) -> String,
{
    let wanted = normalize(key);
    rows.iter()
        .filter(|r| !r.is_aggregate())
        .find(|r| normalize(r.cell(column)) == wanted)
}

/// JS that serializes a table body into [`RowSnapshot`]s.
///
/// `table_selector` must be quote-free apart from the `data-testid` double
/// quotes (the snippet wraps it in single quotes).
pub fn snapshot_script(table_selector: &str) -> String {
    format!(
        r#"(() => {{
            const rows = Array.from(document.querySelectorAll('{table_selector} tbody tr'));
            return rows.map(r => {{
                const cells = Array.from(r.cells).map(c => (c.innerText || '').trim());
                const first = r.cells[0];
                const span = first ? first.getAttribute('colspan') : null;
                return {{ cells, first_colspan: span ? parseInt(span, 10) : null }};
            }});
        }})()"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RowSnapshot {
        RowSnapshot {
            cells: cells.iter().map(|s| s.to_string()).collect(),
            first_colspan: None,
        }
    }

    #[test]
    fn colspan_15_marks_aggregate() {
        let mut r = row(&["Итог строки"]);
        r.first_colspan = Some(15);
        assert!(r.is_aggregate());

        let mut narrow = row(&["data"]);
        narrow.first_colspan = Some(2);
        assert!(!narrow.is_aggregate());
    }

    #[test]
    fn totals_marker_marks_aggregate() {
        assert!(row(&["", "Итого: 12", ""]).is_aggregate());
        assert!(!row(&["25-4545 /0", "TEST_PRODUCT_1", "5"]).is_aggregate());
    }

    #[test]
    fn filtering_handles_empty_tables() {
        assert!(data_rows(&[]).is_empty());
    }

    #[test]
    fn find_skips_aggregates_and_normalizes_both_sides() {
        let rows = vec![
            row(&["№ 25-4545 /0 от 18.11.2025", "TEST_PRODUCT_1", "5"]),
            row(&["Итого:", "", "5"]),
            row(&["№ 25-4546 /0 от 18.11.2025", "OTHER", "1"]),
        ];

        let found = find_by_key(&rows, 0, "25-4545 /0", crate::normalize::order_key)
            .expect("row should match after normalization");
        assert_eq!(found.cell(1), "TEST_PRODUCT_1");

        // "Итого:" normalizes to itself and must never match.
        assert!(find_by_key(&rows, 0, "Итого:", |s| s.to_string()).is_none());
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let r = row(&["only"]);
        assert_eq!(r.cell(5), "");
    }

    #[test]
    fn snapshot_script_embeds_the_selector() {
        let js = snapshot_script("[data-testid=\"deficit-table\"]");
        assert!(js.contains("[data-testid=\"deficit-table\"] tbody tr"));
        assert!(js.contains("first_colspan"));
    }

    #[test]
    fn snapshot_deserializes_from_dom_json() {
        let json = r#"[{"cells":["a","b"],"first_colspan":null},
                       {"cells":["Итого:"],"first_colspan":15}]"#;
        let rows: Vec<RowSnapshot> = serde_json::from_str(json).unwrap();
        assert_eq!(data_rows(&rows).len(), 1);
    }
}
