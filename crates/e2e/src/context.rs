//! Explicit scenario fixture state
//!
//! Scenarios hand values to each other through this struct instead of
//! process-wide globals, so the ordering dependency between test cases is
//! visible in function signatures. Reading a value its producer never wrote
//! is a hard `MissingPrecondition` abort, which the runner reports as a
//! skip (the producer already reported the real failure).

use crate::error::{E2eError, E2eResult};

/// Prefix shared by every fixture this suite creates; cleanup archives by it.
pub const TEST_PREFIX: &str = "TEST_";

pub const PRODUCT_1: &str = "TEST_PRODUCT_1";
pub const ARTICLE_1: &str = "TEST_ARTICLE_1";
pub const PRODUCT_2: &str = "TEST_PRODUCT_2";
pub const ARTICLE_2: &str = "TEST_ARTICLE_2";

/// Quantity and urgency date used when creating the shipment order.
pub const INITIAL_QTY: i64 = 5;
pub const QTY_INCREMENT: i64 = 2;
pub const URGENCY_DATE: &str = "23.01.2025";

/// On-hand correction applied during the warehouse revision scenario.
pub const REVISION_INCREMENT: i64 = 3;

/// Values produced by earlier scenarios and consumed by later ones.
#[derive(Debug, Default)]
pub struct ScenarioContext {
    /// Full generated order identity, e.g. `25-4545 /0 от 18.11.2025`.
    pub order_number: Option<String>,

    /// Creation date split off the order number.
    pub order_date: Option<String>,

    /// Current quantity on the order's first line.
    pub quantity: Option<i64>,

    /// Deficit-page value for ARTICLE_1 captured before the quantity change.
    pub deficit_before: Option<i64>,

    /// Deficit-page value for ARTICLE_1 captured before the revision.
    pub deficit_before_revision: Option<i64>,
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_number(&self) -> E2eResult<&str> {
        self.order_number
            .as_deref()
            .ok_or_else(|| E2eError::missing("create-shipment-order", "order number"))
    }

    pub fn order_date(&self) -> E2eResult<&str> {
        self.order_date
            .as_deref()
            .ok_or_else(|| E2eError::missing("create-shipment-order", "order date"))
    }

    pub fn quantity(&self) -> E2eResult<i64> {
        self.quantity
            .ok_or_else(|| E2eError::missing("create-shipment-order", "order quantity"))
    }

    pub fn deficit_before(&self) -> E2eResult<i64> {
        self.deficit_before
            .ok_or_else(|| E2eError::missing("quantity-propagation", "deficit before mutation"))
    }

    pub fn deficit_before_revision(&self) -> E2eResult<i64> {
        self.deficit_before_revision.ok_or_else(|| {
            E2eError::missing("warehouse-revision", "deficit before revision")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_aborts_with_missing_precondition() {
        let ctx = ScenarioContext::new();
        let err = ctx.order_number().unwrap_err();
        assert!(err.is_missing_precondition());
        assert!(ctx.quantity().is_err());
    }

    #[test]
    fn produced_values_are_readable() {
        let mut ctx = ScenarioContext::new();
        ctx.order_number = Some("25-4545 /0 от 18.11.2025".into());
        ctx.quantity = Some(INITIAL_QTY);
        assert_eq!(ctx.order_number().unwrap(), "25-4545 /0 от 18.11.2025");
        assert_eq!(ctx.quantity().unwrap(), 5);
    }

    #[test]
    fn fixtures_carry_the_cleanup_prefix() {
        for name in [PRODUCT_1, ARTICLE_1, PRODUCT_2, ARTICLE_2] {
            assert!(name.starts_with(TEST_PREFIX));
        }
    }
}
