//! Order pricing
//!
//! Resolves requested line items against the product catalog and computes
//! the order total. All monetary arithmetic runs on `Decimal` and is only
//! converted back to `f64` (2 decimal places, half-up) for storage, so
//! accumulated totals never pick up floating-point drift.
//!
//! Pricing is all-or-nothing: if any requested product fails to resolve,
//! the whole operation fails and no partial item list escapes.

use rust_decimal::prelude::*;
use thiserror::Error;

use crate::db::models::{OrderItem, OrderItemInput, Product};
use crate::db::repository::RepoResult;

#[cfg(test)]
mod tests;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Pricing error types
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Product with ID {0} not found")]
    UnknownProduct(String),

    #[error("Product lookup failed: {0}")]
    Lookup(#[from] crate::db::repository::RepoError),
}

/// Catalog seam for pricing: production uses `ProductRepository`, tests use
/// an in-memory map.
#[allow(async_fn_in_trait)]
pub trait ProductLookup {
    async fn product_by_id(&self, id: &str) -> RepoResult<Option<Product>>;
}

/// A fully priced item list plus its total
#[derive(Debug, Clone)]
pub struct PricedOrder {
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Price the requested items against the catalog.
///
/// Each resulting item carries the product's current name and price: a
/// point-in-time snapshot that is persisted with the order and never synced
/// to later product edits. The total is the exact sum of
/// `price x quantity` over all lines.
pub async fn price_items(
    requested: &[OrderItemInput],
    lookup: &impl ProductLookup,
) -> Result<PricedOrder, PricingError> {
    let mut items = Vec::with_capacity(requested.len());
    let mut total = Decimal::ZERO;

    for line in requested {
        let product = lookup
            .product_by_id(&line.product_id)
            .await?
            .ok_or_else(|| PricingError::UnknownProduct(line.product_id.clone()))?;

        // A product read back from the store always has its id set
        let product_id = product
            .id
            .ok_or_else(|| PricingError::UnknownProduct(line.product_id.clone()))?;

        // The snapshot price is rounded to currency precision first and the
        // total accumulates from that same value, so the stored total always
        // equals the exact sum of item price x quantity.
        let unit_price = to_decimal(product.price)
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        total += unit_price * Decimal::from(line.quantity);

        items.push(OrderItem {
            product_id,
            product_name: product.name,
            quantity: line.quantity,
            price: to_f64(unit_price),
        });
    }

    Ok(PricedOrder {
        items,
        total_amount: to_f64(total),
    })
}
