//! Typed selector groups, one per ERP screen
//!
//! The ERP's `data-testid` attributes are the de facto contract this suite
//! depends on. Each screen's selectors live behind a dedicated struct so a
//! UI rename shows up as one localized change instead of a silent runtime
//! selector miss scattered across scenarios.

/// CSS attribute selector for a `data-testid` value.
pub fn testid(id: &str) -> String {
    format!("[data-testid=\"{id}\"]")
}

pub struct LoginSelectors;

impl LoginSelectors {
    pub fn username() -> String {
        testid("login-username-input")
    }
    pub fn password() -> String {
        testid("login-password-input")
    }
    pub fn submit() -> String {
        testid("login-submit-button")
    }
    /// Present once authentication finished and the shell rendered.
    pub fn app_shell() -> String {
        testid("app-shell")
    }
}

/// Parts database (product catalog).
pub struct ProductSelectors;

impl ProductSelectors {
    pub const NAME_COL: usize = 1;
    pub const ARTICLE_COL: usize = 2;

    pub fn path() -> &'static str {
        "/parts"
    }
    pub fn table() -> String {
        testid("parts-table")
    }
    pub fn search_input() -> String {
        testid("parts-search-input")
    }
    pub fn add_button() -> String {
        testid("parts-add-button")
    }
    pub fn form_modal() -> String {
        testid("parts-form-modal")
    }
    pub fn form_name() -> String {
        testid("parts-form-name-input")
    }
    pub fn form_article() -> String {
        testid("parts-form-article-input")
    }
    pub fn form_save() -> String {
        testid("parts-form-save-button")
    }
    /// Archive control inside a row.
    pub fn row_archive_button() -> String {
        testid("parts-row-archive-button")
    }
    pub fn archive_confirm() -> String {
        testid("confirm-dialog-accept")
    }
}

/// Shipment order list.
pub struct ShipmentSelectors;

impl ShipmentSelectors {
    pub const NUMBER_COL: usize = 0;
    pub const PRODUCT_COL: usize = 2;
    pub const ARTICLE_COL: usize = 3;
    pub const QTY_COL: usize = 5;
    pub const URGENCY_COL: usize = 7;

    pub fn path() -> &'static str {
        "/shipments"
    }
    pub fn table() -> String {
        testid("shipment-table")
    }
    pub fn search_input() -> String {
        testid("shipment-search-input")
    }
    pub fn create_button() -> String {
        testid("shipment-create-button")
    }
    pub fn form_modal() -> String {
        testid("shipment-form-modal")
    }
    pub fn form_product_search() -> String {
        testid("shipment-form-product-search")
    }
    pub fn form_product_option() -> String {
        testid("shipment-form-product-option")
    }
    pub fn form_qty() -> String {
        testid("shipment-form-qty-input")
    }
    pub fn form_urgency() -> String {
        testid("shipment-form-urgency-input")
    }
    pub fn form_save() -> String {
        testid("shipment-form-save-button")
    }
    /// Number of the order just created, rendered in the save confirmation.
    pub fn created_number() -> String {
        testid("shipment-created-number")
    }
    pub fn row_archive_button() -> String {
        testid("shipment-row-archive-button")
    }
    pub fn archive_confirm() -> String {
        testid("confirm-dialog-accept")
    }
}

/// Shipment order edit page.
pub struct ShipmentEditSelectors;

impl ShipmentEditSelectors {
    pub const LINE_ARTICLE_COL: usize = 1;
    pub const LINE_QTY_COL: usize = 3;

    pub fn path_for(order_base: &str, variant: u32) -> String {
        format!("/shipments/{order_base}/{variant}")
    }
    pub fn header_number() -> String {
        testid("shipment-edit-number")
    }
    pub fn header_urgency() -> String {
        testid("shipment-edit-urgency")
    }
    pub fn lines_table() -> String {
        testid("shipment-edit-lines-table")
    }
    pub fn line_qty_input() -> String {
        testid("shipment-edit-line-qty-input")
    }
    pub fn add_line_button() -> String {
        testid("shipment-edit-add-line-button")
    }
    pub fn save_button() -> String {
        testid("shipment-edit-save-button")
    }
    pub fn line_product_search() -> String {
        testid("shipment-edit-line-product-search")
    }
    pub fn line_product_option() -> String {
        testid("shipment-edit-line-product-option")
    }
    pub fn line_new_qty_input() -> String {
        testid("shipment-edit-line-new-qty-input")
    }
}

/// Modal opened by double-clicking a shipment list row.
pub struct OrderModalSelectors;

impl OrderModalSelectors {
    pub fn modal() -> String {
        testid("order-details-modal")
    }
    pub fn number() -> String {
        testid("order-details-number")
    }
    pub fn product() -> String {
        testid("order-details-product")
    }
    pub fn qty() -> String {
        testid("order-details-qty")
    }
    pub fn urgency() -> String {
        testid("order-details-urgency")
    }
    pub fn close_button() -> String {
        testid("order-details-close-button")
    }
}

/// Production deficit report.
pub struct DeficitSelectors;

impl DeficitSelectors {
    pub const ARTICLE_COL: usize = 0;
    pub const ORDER_REF_COL: usize = 2;
    pub const DEFICIT_COL: usize = 6;

    pub fn path() -> &'static str {
        "/deficit"
    }
    pub fn table() -> String {
        testid("deficit-table")
    }
    pub fn search_input() -> String {
        testid("deficit-search-input")
    }
}

/// Warehouse revision (stocktaking) screen.
pub struct WarehouseSelectors;

impl WarehouseSelectors {
    pub const ARTICLE_COL: usize = 0;
    pub const ON_HAND_COL: usize = 3;

    pub fn path() -> &'static str {
        "/warehouse/revision"
    }
    pub fn table() -> String {
        testid("revision-table")
    }
    pub fn search_input() -> String {
        testid("revision-search-input")
    }
    pub fn row_on_hand_input() -> String {
        testid("revision-row-on-hand-input")
    }
    pub fn save_button() -> String {
        testid("revision-save-button")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testid_builds_attribute_selector() {
        assert_eq!(testid("parts-table"), "[data-testid=\"parts-table\"]");
    }

    #[test]
    fn edit_path_embeds_base_and_variant() {
        assert_eq!(
            ShipmentEditSelectors::path_for("25-4545", 1),
            "/shipments/25-4545/1"
        );
    }
}
