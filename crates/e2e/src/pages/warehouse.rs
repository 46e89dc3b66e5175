//! Warehouse revision (stocktaking) page object

use tracing::info;

use crate::browser::Tab;
use crate::config::{timeouts, TargetConfig};
use crate::error::{E2eError, E2eResult};
use crate::normalize;
use crate::pages::{search_and_settle, set_value_in_matching_row_script};
use crate::poll::poll_until;
use crate::selectors::WarehouseSelectors;
use crate::table::{find_by_key, RowSnapshot};

pub struct WarehousePage<'a> {
    tab: &'a Tab,
    cfg: &'a TargetConfig,
}

impl<'a> WarehousePage<'a> {
    pub fn new(tab: &'a Tab, cfg: &'a TargetConfig) -> Self {
        Self { tab, cfg }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.tab
            .goto(&self.cfg.url(WarehouseSelectors::path()))
            .await?;
        self.tab
            .wait_for_selector(&WarehouseSelectors::table(), timeouts::NAVIGATION)
            .await
    }

    pub async fn search(&self, article: &str) -> E2eResult<Vec<RowSnapshot>> {
        search_and_settle(
            self.tab,
            &WarehouseSelectors::search_input(),
            &WarehouseSelectors::table(),
            article,
        )
        .await
    }

    /// On-hand balance for an article, `None` when not listed.
    pub async fn on_hand_of(&self, article: &str) -> E2eResult<Option<i64>> {
        let rows = self.search(article).await?;
        Ok(
            find_by_key(&rows, WarehouseSelectors::ARTICLE_COL, article, |s| {
                s.trim().to_string()
            })
            .and_then(|r| normalize::parse_qty(r.cell(WarehouseSelectors::ON_HAND_COL))),
        )
    }

    /// Manually correct the on-hand balance for an article and save the
    /// revision; waits until the table shows the corrected value.
    pub async fn set_on_hand(&self, article: &str, qty: i64) -> E2eResult<()> {
        info!(article, qty, "correcting on-hand balance");
        self.search(article).await?;

        let js = set_value_in_matching_row_script(
            &WarehouseSelectors::table(),
            WarehouseSelectors::ARTICLE_COL,
            article,
            &WarehouseSelectors::row_on_hand_input(),
            &qty.to_string(),
        );
        if !self.tab.eval_json::<bool>(&js).await? {
            return Err(E2eError::ElementNotFound(format!(
                "on-hand input on revision row '{article}'"
            )));
        }
        self.tab.click(&WarehouseSelectors::save_button()).await?;

        poll_until(
            "revision saved",
            timeouts::POLL_INTERVAL,
            timeouts::ACTION,
            move || async move { Ok(self.on_hand_of(article).await? == Some(qty)) },
        )
        .await
    }
}
