//! Scenarios 2-4: order creation, cross-view consistency, search equivalence

use tracing::info;

use crate::compare::{self, CrossViewCheck, Surface};
use crate::context::{ARTICLE_1, INITIAL_QTY, PRODUCT_1, URGENCY_DATE};
use crate::error::E2eResult;
use crate::normalize;
use crate::pages::{OrderModal, ShipmentEditPage, ShipmentsPage};
use crate::pages::shipments::SearchKey;
use crate::scenarios::World;
use crate::selectors::ShipmentSelectors;

/// Scenario 2: create a shipment order for the test product and capture
/// the generated order identity.
pub async fn create_shipment_order(world: &mut World) -> E2eResult<()> {
    let shipments = ShipmentsPage::new(&world.tab, &world.cfg);
    shipments.open().await?;

    let number = shipments
        .create_order(PRODUCT_1, INITIAL_QTY, URGENCY_DATE)
        .await?;

    let key = normalize::order_key(&number);
    world.soft.check_eq(
        "variant index of a fresh order",
        "0",
        &normalize::variant_of(&key)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    );

    let (_, date) = normalize::split_order_date(&number);
    world.ctx.order_date = date.map(str::to_string);
    world.ctx.order_number = Some(number);
    world.ctx.quantity = Some(INITIAL_QTY);
    Ok(())
}

/// Scenario 3: the same order rendered on the main list, the edit page and
/// the double-click modal must agree field by field.
pub async fn order_cross_view(world: &mut World) -> E2eResult<()> {
    let order = world.ctx.order_number()?.to_string();
    let key = normalize::order_key(&order);

    // Surface 1: main list row (primary tab).
    let shipments = ShipmentsPage::new(&world.tab, &world.cfg);
    shipments.open().await?;
    let list_row = shipments.row_for_order(&order).await?.ok_or_else(|| {
        crate::error::E2eError::ElementNotFound(format!("list row for order '{key}'"))
    })?;

    // Surface 2: double-click modal over the same row.
    let modal = OrderModal::open_for(&shipments, &key).await?;
    let modal_number = modal.number().await?;
    let modal_product = modal.product().await?;
    let modal_qty = modal.qty().await?;
    let modal_urgency = modal.urgency().await?;
    modal.close().await?;

    // Surface 3: edit page in its own tab.
    let edit_tab = world.session.open_tab(&world.cfg.base_url).await?;
    let edit = ShipmentEditPage::new(&edit_tab, &world.cfg);
    edit_tab.activate().await?;
    edit.open_for(&order).await?;
    let edit_number = edit.header_number().await?;
    let edit_qty = edit.quantity_of(ARTICLE_1).await?;
    world.tab.activate().await?;

    let mut number_check = CrossViewCheck::new("order number", compare::order_key);
    number_check
        .add(Surface::MainList, list_row.cell(ShipmentSelectors::NUMBER_COL))
        .add(Surface::Modal, modal_number)
        .add(Surface::EditPage, edit_number);
    number_check.verify(&mut world.soft);

    let mut product_check = CrossViewCheck::new("product name", compare::identity);
    product_check
        .add(Surface::MainList, list_row.cell(ShipmentSelectors::PRODUCT_COL))
        .add(Surface::Modal, modal_product);
    product_check.verify(&mut world.soft);

    let mut qty_check = CrossViewCheck::new("quantity", compare::quantity);
    qty_check
        .add(Surface::MainList, list_row.cell(ShipmentSelectors::QTY_COL))
        .add(Surface::Modal, modal_qty)
        .add(Surface::EditPage, edit_qty);
    qty_check.verify(&mut world.soft);

    // List vs edit page goes through the dedicated date scenario, which
    // tolerates the SUT's one-day discrepancy.
    let mut urgency_check = CrossViewCheck::new("urgency date", compare::date);
    urgency_check
        .add(Surface::MainList, list_row.cell(ShipmentSelectors::URGENCY_COL))
        .add(Surface::Modal, modal_urgency);
    urgency_check.verify(&mut world.soft);

    Ok(())
}

/// Scenario 4: searching by order number, by article and by product name
/// must resolve to the same underlying row.
pub async fn search_equivalence(world: &mut World) -> E2eResult<()> {
    let order = world.ctx.order_number()?.to_string();
    let key = normalize::order_key(&order);

    let shipments = ShipmentsPage::new(&world.tab, &world.cfg);
    shipments.open().await?;

    let methods: [(SearchKey, &str, &str); 3] = [
        (SearchKey::OrderNumber, key.as_str(), "order number"),
        (SearchKey::Article, ARTICLE_1, "article"),
        (SearchKey::ProductName, PRODUCT_1, "product name"),
    ];

    for (method, value, label) in methods {
        let found = shipments.row_by_key(method, value).await?;
        let resolved = found
            .map(|r| normalize::order_key(r.cell(ShipmentSelectors::NUMBER_COL)))
            .unwrap_or_else(|| "<no row>".to_string());
        world
            .soft
            .check_eq(&format!("search by {label}"), &key, &resolved);
    }

    info!(key, "search equivalence checked");
    Ok(())
}
