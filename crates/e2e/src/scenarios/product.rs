//! Scenario 1: create the primary test product

use crate::context::{ARTICLE_1, PRODUCT_1};
use crate::error::{E2eError, E2eResult};
use crate::pages::ProductsPage;
use crate::scenarios::World;
use crate::selectors::ProductSelectors;

pub async fn create_product(world: &mut World) -> E2eResult<()> {
    let products = ProductsPage::new(&world.tab, &world.cfg);
    products.open().await?;
    products.create_product(PRODUCT_1, ARTICLE_1).await?;

    // The list must render both identity fields exactly as entered.
    let row = products
        .row_for(ARTICLE_1)
        .await?
        .ok_or_else(|| E2eError::ElementNotFound(format!("parts row for '{ARTICLE_1}'")))?;
    world.soft.check_eq(
        "product name in parts list",
        PRODUCT_1,
        row.cell(ProductSelectors::NAME_COL),
    );
    world.soft.check_eq(
        "article in parts list",
        ARTICLE_1,
        row.cell(ProductSelectors::ARTICLE_COL),
    );
    Ok(())
}
