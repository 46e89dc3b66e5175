//! Scenario 7: adding a product line renumbers the order to the next /N
//!
//! The backend creates the new variant asynchronously after the save, so
//! the scenario polls the list until the renumbered key becomes locatable.

use tracing::info;

use crate::context::{ARTICLE_2, PRODUCT_2};
use crate::error::E2eResult;
use crate::normalize;
use crate::pages::{ProductsPage, ShipmentEditPage, ShipmentsPage};
use crate::scenarios::World;
use crate::selectors::ShipmentSelectors;

const SECOND_LINE_QTY: i64 = 3;

pub async fn order_variant(world: &mut World) -> E2eResult<()> {
    let order = world.ctx.order_number()?.to_string();
    let key = normalize::order_key(&order);
    let base = normalize::order_base(&key).to_string();
    let next_variant = normalize::variant_of(&key).unwrap_or(0) + 1;

    // The second line needs its own product.
    let products = ProductsPage::new(&world.tab, &world.cfg);
    products.open().await?;
    products.create_product(PRODUCT_2, ARTICLE_2).await?;

    let edit = ShipmentEditPage::new(&world.tab, &world.cfg);
    edit.open_for(&order).await?;
    edit.add_line(PRODUCT_2, SECOND_LINE_QTY).await?;

    let shipments = ShipmentsPage::new(&world.tab, &world.cfg);
    shipments.open().await?;
    let new_key = shipments.wait_for_variant(&base, next_variant).await?;
    info!(old = key, new = new_key, "order renumbered");

    // The renumbered order must be locatable by a plain search.
    let row = shipments.row_for_order(&new_key).await?;
    let full = row
        .map(|r| {
            normalize::strip_number_prefix(r.cell(ShipmentSelectors::NUMBER_COL)).to_string()
        })
        .unwrap_or_else(|| "<no row>".to_string());
    world.soft.check_eq(
        "renumbered order resolvable by search",
        &new_key,
        &normalize::order_key(&full),
    );

    // Later scenarios track the current variant.
    if full != "<no row>" {
        let (_, date) = normalize::split_order_date(&full);
        world.ctx.order_date = date.map(str::to_string);
        world.ctx.order_number = Some(full);
    }
    Ok(())
}
