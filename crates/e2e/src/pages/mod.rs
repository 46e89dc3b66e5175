//! Page objects, one per ERP screen
//!
//! Thin wrappers translating named UI actions into locate → wait → interact
//! → settle sequences against the live DOM. No page object keeps state
//! beyond the tab it drives; every wait goes through [`crate::poll`] with
//! the shared timeout table.

mod deficit;
mod edit;
mod modal;
mod products;
pub mod shipments;
mod warehouse;

pub use deficit::DeficitPage;
pub use edit::ShipmentEditPage;
pub use modal::OrderModal;
pub use products::ProductsPage;
pub use shipments::ShipmentsPage;
pub use warehouse::WarehousePage;

use crate::browser::{js_escape, Tab};
use crate::config::timeouts;
use crate::error::E2eResult;
use crate::poll::poll_until;
use crate::table::{snapshot_script, RowSnapshot};

/// Read the current rows of a table in one evaluate round trip.
pub(crate) async fn snapshot(tab: &Tab, table_selector: &str) -> E2eResult<Vec<RowSnapshot>> {
    tab.eval_json(&snapshot_script(table_selector)).await
}

/// Type a query into a search box, commit with Enter, and wait for the
/// table to repopulate (every data row containing the query, or no data
/// rows at all - a miss is a valid search result).
pub(crate) async fn search_and_settle(
    tab: &Tab,
    input_selector: &str,
    table_selector: &str,
    query: &str,
) -> E2eResult<Vec<RowSnapshot>> {
    tab.fill_verified(input_selector, query).await?;
    tab.press_enter(input_selector).await?;

    poll_until(
        "search repopulated",
        timeouts::POLL_INTERVAL,
        timeouts::ACTION,
        move || async move {
            let rows = snapshot(tab, table_selector).await?;
            Ok(rows
                .iter()
                .filter(|r| !r.is_aggregate())
                .all(|r| r.cells.iter().any(|c| c.contains(query))))
        },
    )
    .await?;

    snapshot(tab, table_selector).await
}

/// JS: click a button inside the first data row whose `col` cell starts
/// with `needle`. Resolves to true when a row matched.
pub(crate) fn click_in_matching_row_script(
    table: &str,
    col: usize,
    needle: &str,
    button: &str,
) -> String {
    let needle = js_escape(needle);
    format!(
        r#"(() => {{
            for (const r of document.querySelectorAll('{table} tbody tr')) {{
                const cell = r.cells[{col}];
                if (!cell || cell.getAttribute('colspan') === '15') continue;
                if (!(cell.innerText || '').trim().startsWith('{needle}')) continue;
                const btn = r.querySelector('{button}');
                if (btn) {{ btn.click(); return true; }}
            }}
            return false;
        }})()"#
    )
}

/// JS: double-click the first data row whose `col` cell contains `needle`.
pub(crate) fn dblclick_matching_row_script(table: &str, col: usize, needle: &str) -> String {
    let needle = js_escape(needle);
    format!(
        r#"(() => {{
            for (const r of document.querySelectorAll('{table} tbody tr')) {{
                const cell = r.cells[{col}];
                if (!cell || cell.getAttribute('colspan') === '15') continue;
                if (!(cell.innerText || '').includes('{needle}')) continue;
                r.dispatchEvent(new MouseEvent('dblclick', {{ bubbles: true, cancelable: true }}));
                return true;
            }}
            return false;
        }})()"#
    )
}

/// JS: set the value of an input inside the first data row whose `col` cell
/// equals `needle`, firing framework events.
pub(crate) fn set_value_in_matching_row_script(
    table: &str,
    col: usize,
    needle: &str,
    input: &str,
    value: &str,
) -> String {
    let needle = js_escape(needle);
    let value = js_escape(value);
    format!(
        r#"(() => {{
            for (const r of document.querySelectorAll('{table} tbody tr')) {{
                const cell = r.cells[{col}];
                if (!cell || cell.getAttribute('colspan') === '15') continue;
                if ((cell.innerText || '').trim() !== '{needle}') continue;
                const inp = r.querySelector('{input}');
                if (!inp) return false;
                inp.focus();
                inp.value = '{value}';
                inp.dispatchEvent(new Event('input', {{ bubbles: true }}));
                inp.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }}
            return false;
        }})()"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_scripts_skip_aggregate_rows() {
        let js = click_in_matching_row_script("[data-testid=\"t\"]", 1, "TEST_", "[data-testid=\"b\"]");
        assert!(js.contains("colspan') === '15'"));
        assert!(js.contains("startsWith('TEST_')"));
    }

    #[test]
    fn row_scripts_escape_needles() {
        let js = dblclick_matching_row_script("[data-testid=\"t\"]", 0, "it's");
        assert!(js.contains(r"includes('it\'s')"));
    }
}
