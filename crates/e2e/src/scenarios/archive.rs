//! Scenarios 11-13: archive all fixtures and verify nothing is left

use tracing::info;

use crate::context::TEST_PREFIX;
use crate::error::E2eResult;
use crate::pages::{ProductsPage, ShipmentsPage};
use crate::scenarios::World;

/// Scenario 11: archive every shipment order carrying a test product.
pub async fn archive_orders(world: &mut World) -> E2eResult<()> {
    let shipments = ShipmentsPage::new(&world.tab, &world.cfg);
    shipments.open().await?;
    let count = shipments.archive_matching_prefix(TEST_PREFIX).await?;
    info!(count, "test orders archived");
    Ok(())
}

/// Scenario 12: archive every test product (orders are gone by now, so
/// nothing holds a reference).
pub async fn archive_products(world: &mut World) -> E2eResult<()> {
    let products = ProductsPage::new(&world.tab, &world.cfg);
    products.open().await?;
    let count = products.archive_matching_prefix(TEST_PREFIX).await?;
    info!(count, "test products archived");
    Ok(())
}

/// Scenario 13: the prefix search yields no data rows anywhere (aggregate
/// rows excluded from the count).
pub async fn verify_cleanup(world: &mut World) -> E2eResult<()> {
    let products = ProductsPage::new(&world.tab, &world.cfg);
    products.open().await?;
    let part_rows = products.data_row_count(TEST_PREFIX).await?;
    world
        .soft
        .check_eq("parts left after cleanup", "0", &part_rows.to_string());

    let shipments = ShipmentsPage::new(&world.tab, &world.cfg);
    shipments.open().await?;
    let order_rows = shipments.data_row_count(TEST_PREFIX).await?;
    world
        .soft
        .check_eq("orders left after cleanup", "0", &order_rows.to_string());
    Ok(())
}
