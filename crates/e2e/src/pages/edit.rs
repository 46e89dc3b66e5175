//! Shipment order edit page object

use tracing::info;

use crate::browser::Tab;
use crate::config::{timeouts, TargetConfig};
use crate::error::{E2eError, E2eResult};
use crate::normalize;
use crate::pages::{set_value_in_matching_row_script, snapshot};
use crate::poll::poll_until;
use crate::selectors::ShipmentEditSelectors;
use crate::table::find_by_key;

pub struct ShipmentEditPage<'a> {
    tab: &'a Tab,
    cfg: &'a TargetConfig,
}

impl<'a> ShipmentEditPage<'a> {
    pub fn new(tab: &'a Tab, cfg: &'a TargetConfig) -> Self {
        Self { tab, cfg }
    }

    /// Navigate to the edit page of an order given any of its rendered
    /// identities (prefix/date decorations are stripped here).
    pub async fn open_for(&self, order: &str) -> E2eResult<()> {
        let key = normalize::order_key(order);
        let base = normalize::order_base(&key);
        let variant = normalize::variant_of(&key).ok_or_else(|| E2eError::StepFailed {
            step: format!("open edit page for '{order}'"),
            reason: "order key has no /N variant".to_string(),
        })?;

        self.tab
            .goto(&self.cfg.url(&ShipmentEditSelectors::path_for(base, variant)))
            .await?;
        self.tab
            .wait_for_selector(&ShipmentEditSelectors::lines_table(), timeouts::NAVIGATION)
            .await
    }

    /// Order identity as the edit page header renders it.
    pub async fn header_number(&self) -> E2eResult<String> {
        self.tab.text_of(&ShipmentEditSelectors::header_number()).await
    }

    pub async fn header_urgency(&self) -> E2eResult<String> {
        self.tab
            .text_of(&ShipmentEditSelectors::header_urgency())
            .await
    }

    /// Quantity cell of the line for `article`.
    pub async fn quantity_of(&self, article: &str) -> E2eResult<String> {
        let rows = snapshot(self.tab, &ShipmentEditSelectors::lines_table()).await?;
        find_by_key(&rows, ShipmentEditSelectors::LINE_ARTICLE_COL, article, |s| {
            s.trim().to_string()
        })
        .map(|r| r.cell(ShipmentEditSelectors::LINE_QTY_COL).to_string())
        .ok_or_else(|| E2eError::ElementNotFound(format!("edit line for article '{article}'")))
    }

    /// Set the quantity on the line for `article`, save, and wait until the
    /// table shows the new value.
    pub async fn set_quantity(&self, article: &str, qty: i64) -> E2eResult<()> {
        info!(article, qty, "changing line quantity");
        let js = set_value_in_matching_row_script(
            &ShipmentEditSelectors::lines_table(),
            ShipmentEditSelectors::LINE_ARTICLE_COL,
            article,
            &ShipmentEditSelectors::line_qty_input(),
            &qty.to_string(),
        );
        if !self.tab.eval_json::<bool>(&js).await? {
            return Err(E2eError::ElementNotFound(format!(
                "quantity input on line '{article}'"
            )));
        }
        self.tab.click(&ShipmentEditSelectors::save_button()).await?;

        // Saved value must be readable back from the rendered table.
        poll_until(
            "saved quantity rendered",
            timeouts::POLL_INTERVAL,
            timeouts::ACTION,
            move || async move {
                let shown = self.quantity_of(article).await?;
                Ok(normalize::parse_qty(&shown) == Some(qty))
            },
        )
        .await
    }

    /// Add a new product line to the order and save.
    ///
    /// Saving triggers the asynchronous creation of the next `/N` order
    /// variant on the backend; callers wait for it through the list page.
    pub async fn add_line(&self, product: &str, qty: i64) -> E2eResult<()> {
        info!(product, qty, "adding order line");
        self.tab
            .click(&ShipmentEditSelectors::add_line_button())
            .await?;
        self.tab
            .fill_verified(&ShipmentEditSelectors::line_product_search(), product)
            .await?;
        self.tab
            .click(&ShipmentEditSelectors::line_product_option())
            .await?;
        self.tab
            .fill_verified(
                &ShipmentEditSelectors::line_new_qty_input(),
                &qty.to_string(),
            )
            .await?;
        self.tab.click(&ShipmentEditSelectors::save_button()).await
    }
}
