//! Scenario 0: archive leftovers of previous runs
//!
//! Every fixture this suite creates carries the `TEST_` prefix; archiving
//! by that prefix resets shared state between runs. Zero matches is the
//! normal case on a clean system and must succeed with a count of 0.

use tracing::info;

use crate::context::TEST_PREFIX;
use crate::error::E2eResult;
use crate::pages::{ProductsPage, ShipmentsPage};
use crate::scenarios::World;

pub async fn previous_runs(world: &mut World) -> E2eResult<()> {
    // Orders first: a product referenced by an active order cannot be
    // archived.
    let shipments = ShipmentsPage::new(&world.tab, &world.cfg);
    shipments.open().await?;
    let orders = shipments.archive_matching_prefix(TEST_PREFIX).await?;

    let products = ProductsPage::new(&world.tab, &world.cfg);
    products.open().await?;
    let parts = products.archive_matching_prefix(TEST_PREFIX).await?;

    info!(orders, parts, "previous-run fixtures archived");
    Ok(())
}
