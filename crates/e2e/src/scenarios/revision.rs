//! Scenario 8: warehouse revision corrects on-hand and moves the deficit

use tracing::info;

use crate::config::timeouts;
use crate::context::{ARTICLE_1, REVISION_INCREMENT};
use crate::error::E2eResult;
use crate::pages::{DeficitPage, WarehousePage};
use crate::poll::poll_for;
use crate::scenarios::World;

pub async fn warehouse_revision(world: &mut World) -> E2eResult<()> {
    let deficit_before = world.ctx.deficit_before_revision()?;

    let warehouse = WarehousePage::new(&world.tab, &world.cfg);
    warehouse.open().await?;

    let on_hand = warehouse.on_hand_of(ARTICLE_1).await?.unwrap_or(0);
    let corrected = on_hand + REVISION_INCREMENT;
    warehouse.set_on_hand(ARTICLE_1, corrected).await?;
    info!(on_hand, corrected, "revision saved");

    // Extra stock relieves the shortage by exactly the correction.
    let expected = deficit_before + REVISION_INCREMENT;
    let deficit = DeficitPage::new(&world.tab, &world.cfg);
    deficit.open().await?;

    let deficit = &deficit;
    let after = poll_for(
        "deficit recomputed after revision",
        timeouts::POLL_INTERVAL,
        timeouts::BACKEND_SETTLE,
        move || async move {
            Ok(deficit
                .deficit_of(ARTICLE_1)
                .await?
                .filter(|v| *v != deficit_before))
        },
    )
    .await?;

    world.soft.check_eq(
        "deficit delta after on-hand correction",
        &expected.to_string(),
        &after.to_string(),
    );
    Ok(())
}
