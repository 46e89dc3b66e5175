//! Order details modal (double-click on a shipment list row)

use crate::browser::Tab;
use crate::config::timeouts;
use crate::error::{E2eError, E2eResult};
use crate::pages::dblclick_matching_row_script;
use crate::pages::ShipmentsPage;
use crate::selectors::{OrderModalSelectors, ShipmentSelectors};

pub struct OrderModal<'a> {
    tab: &'a Tab,
}

impl<'a> OrderModal<'a> {
    /// Double-click the list row for `order_key` and wait for the modal.
    pub async fn open_for(list: &ShipmentsPage<'a>, order_key: &str) -> E2eResult<OrderModal<'a>> {
        let tab = list.tab();
        let js = dblclick_matching_row_script(
            &ShipmentSelectors::table(),
            ShipmentSelectors::NUMBER_COL,
            order_key,
        );
        if !tab.eval_json::<bool>(&js).await? {
            return Err(E2eError::ElementNotFound(format!(
                "list row for order '{order_key}'"
            )));
        }
        tab.wait_for_selector(&OrderModalSelectors::modal(), timeouts::MODAL)
            .await
            .map_err(|_| E2eError::ModalTimeout(format!("order details for '{order_key}'")))?;
        Ok(OrderModal { tab })
    }

    pub async fn number(&self) -> E2eResult<String> {
        self.tab.text_of(&OrderModalSelectors::number()).await
    }

    pub async fn product(&self) -> E2eResult<String> {
        self.tab.text_of(&OrderModalSelectors::product()).await
    }

    pub async fn qty(&self) -> E2eResult<String> {
        self.tab.text_of(&OrderModalSelectors::qty()).await
    }

    pub async fn urgency(&self) -> E2eResult<String> {
        self.tab.text_of(&OrderModalSelectors::urgency()).await
    }

    pub async fn close(self) -> E2eResult<()> {
        self.tab.click(&OrderModalSelectors::close_button()).await?;
        self.tab
            .wait_for_gone(&OrderModalSelectors::modal(), timeouts::MODAL)
            .await
    }
}
