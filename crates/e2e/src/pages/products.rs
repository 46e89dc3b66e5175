//! Parts database (product catalog) page object

use tracing::info;

use crate::browser::Tab;
use crate::config::{timeouts, TargetConfig};
use crate::error::{E2eError, E2eResult};
use crate::pages::{click_in_matching_row_script, search_and_settle, snapshot};
use crate::poll::poll_until;
use crate::selectors::ProductSelectors;
use crate::table::{find_by_key, RowSnapshot};

/// Guard against an archive loop that never converges (e.g. the archive
/// button silently failing while the row keeps matching).
const MAX_ARCHIVE_PASSES: usize = 200;

pub struct ProductsPage<'a> {
    tab: &'a Tab,
    cfg: &'a TargetConfig,
}

impl<'a> ProductsPage<'a> {
    pub fn new(tab: &'a Tab, cfg: &'a TargetConfig) -> Self {
        Self { tab, cfg }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.tab.goto(&self.cfg.url(ProductSelectors::path())).await?;
        self.tab
            .wait_for_selector(&ProductSelectors::table(), timeouts::NAVIGATION)
            .await
    }

    pub async fn search(&self, query: &str) -> E2eResult<Vec<RowSnapshot>> {
        search_and_settle(
            self.tab,
            &ProductSelectors::search_input(),
            &ProductSelectors::table(),
            query,
        )
        .await
    }

    /// Create a product through the form modal and wait until the list
    /// shows it.
    pub async fn create_product(&self, name: &str, article: &str) -> E2eResult<()> {
        info!(name, article, "creating product");
        self.tab.click(&ProductSelectors::add_button()).await?;
        self.tab
            .wait_for_selector(&ProductSelectors::form_modal(), timeouts::MODAL)
            .await
            .map_err(|_| E2eError::ModalTimeout("product form".to_string()))?;

        self.tab
            .fill_verified(&ProductSelectors::form_name(), name)
            .await?;
        self.tab
            .fill_verified(&ProductSelectors::form_article(), article)
            .await?;
        self.tab.click(&ProductSelectors::form_save()).await?;
        self.tab
            .wait_for_gone(&ProductSelectors::form_modal(), timeouts::MODAL)
            .await?;

        // Creation is synchronous for products, but the list refresh is not.
        poll_until(
            "created product listed",
            timeouts::POLL_INTERVAL,
            timeouts::ACTION,
            move || async move { Ok(self.row_for(article).await?.is_some()) },
        )
        .await
    }

    /// The data row for an article, if listed.
    pub async fn row_for(&self, article: &str) -> E2eResult<Option<RowSnapshot>> {
        let rows = self.search(article).await?;
        Ok(find_by_key(&rows, ProductSelectors::ARTICLE_COL, article, |s| {
            s.trim().to_string()
        })
        .cloned())
    }

    /// Archive every product whose name starts with `prefix`.
    ///
    /// Returns the number archived; zero matches is a success with count 0.
    pub async fn archive_matching_prefix(&self, prefix: &str) -> E2eResult<usize> {
        let mut archived = 0usize;

        for _ in 0..MAX_ARCHIVE_PASSES {
            let rows = self.search(prefix).await?;
            let remaining = rows
                .iter()
                .filter(|r| !r.is_aggregate())
                .filter(|r| r.cell(ProductSelectors::NAME_COL).starts_with(prefix))
                .count();
            if remaining == 0 {
                info!(prefix, archived, "product archive pass finished");
                return Ok(archived);
            }

            let js = click_in_matching_row_script(
                &ProductSelectors::table(),
                ProductSelectors::NAME_COL,
                prefix,
                &ProductSelectors::row_archive_button(),
            );
            if !self.tab.eval_json::<bool>(&js).await? {
                return Err(E2eError::ElementNotFound(
                    ProductSelectors::row_archive_button(),
                ));
            }
            self.tab.click(&ProductSelectors::archive_confirm()).await?;

            // Wait until the archived row actually left the table.
            poll_until(
                "archived product removed",
                timeouts::POLL_INTERVAL,
                timeouts::ACTION,
                move || async move {
                    let rows = self.search(prefix).await?;
                    let now = rows
                        .iter()
                        .filter(|r| !r.is_aggregate())
                        .filter(|r| r.cell(ProductSelectors::NAME_COL).starts_with(prefix))
                        .count();
                    Ok(now < remaining)
                },
            )
            .await?;
            archived += 1;
        }

        Err(E2eError::StepFailed {
            step: format!("archive products '{prefix}'"),
            reason: format!("still matching after {MAX_ARCHIVE_PASSES} passes"),
        })
    }

    /// Data rows currently matching a search, aggregates excluded.
    pub async fn data_row_count(&self, query: &str) -> E2eResult<usize> {
        let rows = self.search(query).await?;
        Ok(rows.iter().filter(|r| !r.is_aggregate()).count())
    }

    /// Current table snapshot without a new search.
    pub async fn rows(&self) -> E2eResult<Vec<RowSnapshot>> {
        snapshot(self.tab, &ProductSelectors::table()).await
    }
}
