//! Shipment order list page object

use tracing::info;

use crate::browser::Tab;
use crate::config::{timeouts, TargetConfig};
use crate::error::{E2eError, E2eResult};
use crate::normalize;
use crate::pages::{click_in_matching_row_script, search_and_settle};
use crate::poll::poll_until;
use crate::selectors::ShipmentSelectors;
use crate::table::{find_by_key, RowSnapshot};

const MAX_ARCHIVE_PASSES: usize = 200;

/// Which business key a list search uses. All three must resolve to the
/// same underlying row for the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    OrderNumber,
    Article,
    ProductName,
}

pub struct ShipmentsPage<'a> {
    tab: &'a Tab,
    cfg: &'a TargetConfig,
}

impl<'a> ShipmentsPage<'a> {
    pub fn new(tab: &'a Tab, cfg: &'a TargetConfig) -> Self {
        Self { tab, cfg }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.tab
            .goto(&self.cfg.url(ShipmentSelectors::path()))
            .await?;
        self.tab
            .wait_for_selector(&ShipmentSelectors::table(), timeouts::NAVIGATION)
            .await
    }

    pub async fn search(&self, query: &str) -> E2eResult<Vec<RowSnapshot>> {
        search_and_settle(
            self.tab,
            &ShipmentSelectors::search_input(),
            &ShipmentSelectors::table(),
            query,
        )
        .await
    }

    /// Create a shipment order through the form modal.
    ///
    /// Returns the generated order identity (`NN-NNNN /0 от DD.MM.YYYY`)
    /// captured from the save confirmation.
    pub async fn create_order(
        &self,
        product: &str,
        qty: i64,
        urgency_date: &str,
    ) -> E2eResult<String> {
        info!(product, qty, urgency_date, "creating shipment order");
        self.tab.click(&ShipmentSelectors::create_button()).await?;
        self.tab
            .wait_for_selector(&ShipmentSelectors::form_modal(), timeouts::MODAL)
            .await
            .map_err(|_| E2eError::ModalTimeout("shipment order form".to_string()))?;

        // Product picker: type the name, then click the first suggestion.
        self.tab
            .fill_verified(&ShipmentSelectors::form_product_search(), product)
            .await?;
        self.tab
            .click(&ShipmentSelectors::form_product_option())
            .await?;

        self.tab
            .fill_verified(&ShipmentSelectors::form_qty(), &qty.to_string())
            .await?;
        self.tab
            .fill_verified(&ShipmentSelectors::form_urgency(), urgency_date)
            .await?;
        self.tab.click(&ShipmentSelectors::form_save()).await?;

        let number = self
            .tab
            .text_of(&ShipmentSelectors::created_number())
            .await?;
        if !normalize::order_number_re().is_match(&number) {
            return Err(E2eError::StepFailed {
                step: "create shipment order".to_string(),
                reason: format!("generated number has unexpected shape: '{number}'"),
            });
        }
        info!(number, "order created");
        Ok(number)
    }

    /// Search by one of the three business keys and return the order's row.
    pub async fn row_by_key(&self, key: SearchKey, value: &str) -> E2eResult<Option<RowSnapshot>> {
        let rows = self.search(value).await?;
        let found = match key {
            SearchKey::OrderNumber => find_by_key(
                &rows,
                ShipmentSelectors::NUMBER_COL,
                value,
                normalize::order_key,
            ),
            SearchKey::Article => find_by_key(&rows, ShipmentSelectors::ARTICLE_COL, value, |s| {
                s.trim().to_string()
            }),
            SearchKey::ProductName => {
                find_by_key(&rows, ShipmentSelectors::PRODUCT_COL, value, |s| {
                    s.trim().to_string()
                })
            }
        };
        Ok(found.cloned())
    }

    /// The list row for an order, searched by its number.
    pub async fn row_for_order(&self, order: &str) -> E2eResult<Option<RowSnapshot>> {
        self.row_by_key(SearchKey::OrderNumber, &normalize::order_key(order))
            .await
    }

    /// Quantity cell of an order's list row. The row must exist.
    pub async fn quantity_in_list(&self, order: &str) -> E2eResult<String> {
        self.row_for_order(order)
            .await?
            .map(|r| r.cell(ShipmentSelectors::QTY_COL).to_string())
            .ok_or_else(|| E2eError::ElementNotFound(format!("list row for order '{order}'")))
    }

    /// Urgency date cell of an order's list row.
    pub async fn urgency_in_list(&self, order: &str) -> E2eResult<String> {
        self.row_for_order(order)
            .await?
            .map(|r| r.cell(ShipmentSelectors::URGENCY_COL).to_string())
            .ok_or_else(|| E2eError::ElementNotFound(format!("list row for order '{order}'")))
    }

    /// Wait until a `/variant` renumbering of `order_base` is searchable.
    ///
    /// The backend creates derived variants asynchronously after a save, so
    /// this polls with the long backend deadline and returns the full new
    /// order key.
    pub async fn wait_for_variant(&self, order_base: &str, variant: u32) -> E2eResult<String> {
        crate::poll::poll_for(
            &format!("order variant /{variant}"),
            timeouts::POLL_INTERVAL,
            timeouts::BACKEND_SETTLE,
            move || async move {
                let rows = self.search(order_base).await?;
                Ok(rows
                    .iter()
                    .filter(|r| !r.is_aggregate())
                    .map(|r| normalize::order_key(r.cell(ShipmentSelectors::NUMBER_COL)))
                    .find(|key| {
                        normalize::order_base(key) == order_base
                            && normalize::variant_of(key) == Some(variant)
                    }))
            },
        )
        .await
    }

    /// Archive every order whose product cell starts with `prefix`.
    pub async fn archive_matching_prefix(&self, prefix: &str) -> E2eResult<usize> {
        let mut archived = 0usize;

        for _ in 0..MAX_ARCHIVE_PASSES {
            let rows = self.search(prefix).await?;
            let remaining = rows
                .iter()
                .filter(|r| !r.is_aggregate())
                .filter(|r| r.cell(ShipmentSelectors::PRODUCT_COL).starts_with(prefix))
                .count();
            if remaining == 0 {
                info!(prefix, archived, "shipment archive pass finished");
                return Ok(archived);
            }

            let js = click_in_matching_row_script(
                &ShipmentSelectors::table(),
                ShipmentSelectors::PRODUCT_COL,
                prefix,
                &ShipmentSelectors::row_archive_button(),
            );
            if !self.tab.eval_json::<bool>(&js).await? {
                return Err(E2eError::ElementNotFound(
                    ShipmentSelectors::row_archive_button(),
                ));
            }
            self.tab.click(&ShipmentSelectors::archive_confirm()).await?;

            poll_until(
                "archived order removed",
                timeouts::POLL_INTERVAL,
                timeouts::ACTION,
                move || async move {
                    let rows = self.search(prefix).await?;
                    let now = rows
                        .iter()
                        .filter(|r| !r.is_aggregate())
                        .filter(|r| r.cell(ShipmentSelectors::PRODUCT_COL).starts_with(prefix))
                        .count();
                    Ok(now < remaining)
                },
            )
            .await?;
            archived += 1;
        }

        Err(E2eError::StepFailed {
            step: format!("archive orders '{prefix}'"),
            reason: format!("still matching after {MAX_ARCHIVE_PASSES} passes"),
        })
    }

    /// Data rows matching a search, aggregates excluded.
    pub async fn data_row_count(&self, query: &str) -> E2eResult<usize> {
        let rows = self.search(query).await?;
        Ok(rows.iter().filter(|r| !r.is_aggregate()).count())
    }

    pub(crate) fn tab(&self) -> &'a Tab {
        self.tab
    }
}
