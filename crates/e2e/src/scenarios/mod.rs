//! The fixed scenario runbook
//!
//! Scenarios are numbered and strictly ordered: later ones consume values
//! earlier ones wrote into the [`ScenarioContext`]. The runner executes
//! them in index order and reports a scenario as skipped when its
//! preconditions were never produced.

mod archive;
mod cleanup;
mod normalization;
mod order;
mod product;
mod quantity;
mod revision;
mod variant;

use futures::future::BoxFuture;

use crate::browser::{Session, Tab};
use crate::config::TargetConfig;
use crate::context::ScenarioContext;
use crate::error::E2eResult;
use crate::soft::SoftAssert;

/// Everything a scenario needs: the logged-in browser session, the shared
/// fixture context, and the soft-assertion collector.
pub struct World {
    pub cfg: TargetConfig,
    pub session: Session,
    /// Primary tab, authenticated before the first scenario runs.
    pub tab: Tab,
    pub ctx: ScenarioContext,
    pub soft: SoftAssert,
}

pub type ScenarioFn = for<'a> fn(&'a mut World) -> BoxFuture<'a, E2eResult<()>>;

pub struct Scenario {
    pub index: u32,
    pub name: &'static str,
    pub tags: &'static [&'static str],
    pub run: ScenarioFn,
}

fn s00(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(cleanup::previous_runs(w))
}
fn s01(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(product::create_product(w))
}
fn s02(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(order::create_shipment_order(w))
}
fn s03(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(order::order_cross_view(w))
}
fn s04(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(order::search_equivalence(w))
}
fn s05(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(quantity::quantity_propagation(w))
}
fn s06(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(quantity::deficit_propagation(w))
}
fn s07(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(variant::order_variant(w))
}
fn s08(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(revision::warehouse_revision(w))
}
fn s09(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(normalization::date_across_views(w))
}
fn s10(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(normalization::order_number_across_views(w))
}
fn s11(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(archive::archive_orders(w))
}
fn s12(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(archive::archive_products(w))
}
fn s13(w: &mut World) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(archive::verify_cleanup(w))
}

/// All scenarios in execution order.
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario { index: 0, name: "cleanup-previous-runs", tags: &["cleanup"], run: s00 },
        Scenario { index: 1, name: "create-product", tags: &["fixtures"], run: s01 },
        Scenario { index: 2, name: "create-shipment-order", tags: &["fixtures", "orders"], run: s02 },
        Scenario { index: 3, name: "order-cross-view", tags: &["orders", "consistency"], run: s03 },
        Scenario { index: 4, name: "search-equivalence", tags: &["orders"], run: s04 },
        Scenario { index: 5, name: "quantity-propagation", tags: &["orders", "consistency"], run: s05 },
        Scenario { index: 6, name: "deficit-propagation", tags: &["deficit", "consistency"], run: s06 },
        Scenario { index: 7, name: "order-variant", tags: &["orders"], run: s07 },
        Scenario { index: 8, name: "warehouse-revision", tags: &["warehouse", "deficit"], run: s08 },
        Scenario { index: 9, name: "date-normalization-views", tags: &["consistency"], run: s09 },
        Scenario { index: 10, name: "order-number-normalization-views", tags: &["consistency"], run: s10 },
        Scenario { index: 11, name: "archive-orders", tags: &["cleanup"], run: s11 },
        Scenario { index: 12, name: "archive-products", tags: &["cleanup"], run: s12 },
        Scenario { index: 13, name: "verify-cleanup", tags: &["cleanup"], run: s13 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn runbook_is_ordered_and_unique() {
        let scenarios = all();
        assert_eq!(scenarios.len(), 14);
        for (i, s) in scenarios.iter().enumerate() {
            assert_eq!(s.index, i as u32, "scenario {} out of order", s.name);
        }
        let names: HashSet<_> = scenarios.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn cleanup_opens_and_closes_the_runbook() {
        let scenarios = all();
        assert!(scenarios.first().unwrap().tags.contains(&"cleanup"));
        assert!(scenarios.last().unwrap().tags.contains(&"cleanup"));
    }
}
