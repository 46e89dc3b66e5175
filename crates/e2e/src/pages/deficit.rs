//! Production deficit report page object
//!
//! Read-only surface: demand vs. available quantity per article, with a
//! signed Deficit column (negative = shortage). The backend recomputes the
//! report asynchronously after order or warehouse mutations, so readers
//! either accept `None` or poll through [`wait_for_row`].
//!
//! [`wait_for_row`]: DeficitPage::wait_for_row

use crate::browser::Tab;
use crate::config::{timeouts, TargetConfig};
use crate::error::{E2eError, E2eResult};
use crate::normalize;
use crate::pages::search_and_settle;
use crate::selectors::DeficitSelectors;
use crate::table::{find_by_key, RowSnapshot};

pub struct DeficitPage<'a> {
    tab: &'a Tab,
    cfg: &'a TargetConfig,
}

impl<'a> DeficitPage<'a> {
    pub fn new(tab: &'a Tab, cfg: &'a TargetConfig) -> Self {
        Self { tab, cfg }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.tab.goto(&self.cfg.url(DeficitSelectors::path())).await?;
        self.tab
            .wait_for_selector(&DeficitSelectors::table(), timeouts::NAVIGATION)
            .await
    }

    pub async fn search(&self, article: &str) -> E2eResult<Vec<RowSnapshot>> {
        search_and_settle(
            self.tab,
            &DeficitSelectors::search_input(),
            &DeficitSelectors::table(),
            article,
        )
        .await
    }

    fn row_for<'r>(rows: &'r [RowSnapshot], article: &str) -> Option<&'r RowSnapshot> {
        find_by_key(rows, DeficitSelectors::ARTICLE_COL, article, |s| {
            s.trim().to_string()
        })
    }

    /// Signed deficit for an article, `None` while the report has no row.
    pub async fn deficit_of(&self, article: &str) -> E2eResult<Option<i64>> {
        let rows = self.search(article).await?;
        match Self::row_for(&rows, article) {
            Some(row) => {
                let cell = row.cell(DeficitSelectors::DEFICIT_COL);
                normalize::parse_qty(cell)
                    .map(Some)
                    .ok_or_else(|| E2eError::StepFailed {
                        step: format!("read deficit for '{article}'"),
                        reason: format!("cell is not a number: '{cell}'"),
                    })
            }
            None => Ok(None),
        }
    }

    /// Order reference cell for an article's deficit row (rendered with the
    /// `№` prefix and ` от <date>` suffix).
    pub async fn order_ref_of(&self, article: &str) -> E2eResult<Option<String>> {
        let rows = self.search(article).await?;
        Ok(Self::row_for(&rows, article)
            .map(|r| r.cell(DeficitSelectors::ORDER_REF_COL).to_string()))
    }

    /// Poll until the article shows up in the report at all.
    pub async fn wait_for_row(&self, article: &str) -> E2eResult<i64> {
        crate::poll::poll_for(
            &format!("deficit row for {article}"),
            timeouts::POLL_INTERVAL,
            timeouts::BACKEND_SETTLE,
            move || async move { self.deficit_of(article).await },
        )
        .await
    }
}
