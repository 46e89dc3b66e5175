//! Scenarios 9-10: cross-surface formatting consistency
//!
//! Different surfaces render the same logical value with different
//! decorations: month-name dates on the list vs numeric on the edit page,
//! and order references on the deficit report carrying both the `№` prefix
//! and the ` от <date>` suffix.

use crate::compare::{self, CrossViewCheck, Surface};
use crate::context::ARTICLE_1;
use crate::error::E2eResult;
use crate::normalize;
use crate::pages::{DeficitPage, ShipmentEditPage, ShipmentsPage};
use crate::scenarios::World;

/// Scenario 9: urgency date on the list vs the edit page.
///
/// The SUT is known to occasionally render the two a calendar day apart;
/// that exact discrepancy is recorded as a known issue rather than a
/// failure, anything else counts.
pub async fn date_across_views(world: &mut World) -> E2eResult<()> {
    let order = world.ctx.order_number()?.to_string();

    let shipments = ShipmentsPage::new(&world.tab, &world.cfg);
    shipments.open().await?;
    let list_date = shipments.urgency_in_list(&order).await?;

    let edit = ShipmentEditPage::new(&world.tab, &world.cfg);
    edit.open_for(&order).await?;
    let edit_date = edit.header_urgency().await?;

    match (
        normalize::parse_ui_date(&list_date),
        normalize::parse_ui_date(&edit_date),
    ) {
        (Some(a), Some(b)) if a == b => {}
        (Some(a), Some(b)) if (a - b).num_days().abs() == 1 => {
            world.soft.known_issue(
                "urgency date on list vs edit page",
                "dates can differ by one day",
                &format!("{list_date} vs {edit_date}"),
            );
        }
        _ => {
            let mut check = CrossViewCheck::new("urgency date", compare::date);
            check
                .add(Surface::MainList, list_date)
                .add(Surface::EditPage, edit_date);
            check.verify(&mut world.soft);
        }
    }
    Ok(())
}

/// Scenario 10: the deficit report's order reference normalizes to the
/// list's order key.
pub async fn order_number_across_views(world: &mut World) -> E2eResult<()> {
    let order = world.ctx.order_number()?.to_string();

    let deficit = DeficitPage::new(&world.tab, &world.cfg);
    deficit.open().await?;
    let order_ref = deficit
        .order_ref_of(ARTICLE_1)
        .await?
        .unwrap_or_else(|| "<no deficit row>".to_string());

    let mut check = CrossViewCheck::new("order reference", compare::order_key);
    check
        .add(Surface::MainList, order.as_str())
        .add(Surface::Deficit, order_ref);
    check.verify(&mut world.soft);
    Ok(())
}
