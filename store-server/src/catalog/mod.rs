//! Catalog consistency
//!
//! Guards product deletion against dangling order references: a product
//! still named by any order's line items cannot be removed, and the caller
//! gets the full blocking set to act on.
//!
//! The check and the subsequent delete are two separate store calls with no
//! transaction around them, so an order created in between can still slip
//! through. Best-effort guard, not an isolation guarantee.

use serde::Serialize;

use crate::db::models::{Category, Order, OrderStatus, Product};
use crate::db::repository::{RepoError, RepoResult};
use surrealdb::RecordId;

/// Order-side seam for the reference check: production uses
/// `OrderRepository`, tests use an in-memory list.
#[allow(async_fn_in_trait)]
pub trait OrderReferenceLookup {
    async fn orders_referencing(&self, product_id: &RecordId) -> RepoResult<Vec<Order>>;
}

/// One order blocking a product deletion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockingOrder {
    pub id: String,
    pub customer_name: String,
    pub total_amount: f64,
    pub status: OrderStatus,
}

/// Immutable summary of a product captured before its deletion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProductSummary {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: f64,
}

/// Outcome of the pre-deletion reference check
#[derive(Debug)]
pub enum DeleteCheck {
    /// No references; carries the summary to report after deletion
    Allowed(DeletedProductSummary),
    /// At least one order references the product, each listed exactly once
    Blocked(Vec<BlockingOrder>),
}

/// Check whether the product can be deleted.
pub async fn check_delete(
    product: &Product,
    orders: &impl OrderReferenceLookup,
) -> RepoResult<DeleteCheck> {
    let product_id = product
        .id
        .clone()
        .ok_or_else(|| RepoError::Database("Product has no id".to_string()))?;

    let referencing = orders.orders_referencing(&product_id).await?;

    if referencing.is_empty() {
        return Ok(DeleteCheck::Allowed(DeletedProductSummary {
            id: product_id.to_string(),
            name: product.name.clone(),
            category: product.category,
            price: product.price,
        }));
    }

    let blocking = referencing
        .into_iter()
        .map(|order| BlockingOrder {
            id: order.id.map(|id| id.to_string()).unwrap_or_default(),
            customer_name: order.customer_name,
            total_amount: order.total_amount,
            status: order.status,
        })
        .collect();

    Ok(DeleteCheck::Blocked(blocking))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::db::models::{OrderItem, ShippingAddress};

    struct FakeOrders(Vec<Order>);

    impl OrderReferenceLookup for FakeOrders {
        async fn orders_referencing(&self, product_id: &RecordId) -> RepoResult<Vec<Order>> {
            Ok(self
                .0
                .iter()
                .filter(|o| o.items.iter().any(|i| &i.product_id == product_id))
                .cloned()
                .collect())
        }
    }

    fn make_product(key: &str, name: &str, price: f64) -> Product {
        let now = Utc::now();
        Product {
            id: Some(RecordId::from_table_key("product", key)),
            name: name.to_string(),
            description: "desc".to_string(),
            price,
            category: Category::Sports,
            brand: "Acme".to_string(),
            in_stock: true,
            quantity: 3,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn make_order(key: &str, customer: &str, product_key: &str, total: f64) -> Order {
        let now = Utc::now();
        Order {
            id: Some(RecordId::from_table_key("order", key)),
            order_number: format!("ORD-{key}"),
            customer_name: customer.to_string(),
            customer_email: format!("{customer}@example.com"),
            customer_phone: "555-123-4567".to_string(),
            items: vec![OrderItem {
                product_id: RecordId::from_table_key("product", product_key),
                product_name: "Ball".to_string(),
                quantity: 1,
                price: total,
            }],
            total_amount: total,
            status: OrderStatus::Pending,
            shipping_address: ShippingAddress {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                country: "USA".to_string(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn unreferenced_product_may_be_deleted() {
        let product = make_product("p1", "Ball", 9.5);
        let orders = FakeOrders(vec![make_order("o1", "alice", "other", 20.0)]);

        match check_delete(&product, &orders).await.unwrap() {
            DeleteCheck::Allowed(summary) => {
                assert_eq!(summary.id, "product:p1");
                assert_eq!(summary.name, "Ball");
                assert_eq!(summary.category, Category::Sports);
                assert_eq!(summary.price, 9.5);
            }
            DeleteCheck::Blocked(_) => panic!("expected deletion to be allowed"),
        }
    }

    #[tokio::test]
    async fn referenced_product_is_blocked_with_every_order_listed_once() {
        let product = make_product("p1", "Ball", 9.5);
        let orders = FakeOrders(vec![
            make_order("o1", "alice", "p1", 9.5),
            make_order("o2", "bob", "p1", 19.0),
            make_order("o3", "carol", "other", 5.0),
        ]);

        match check_delete(&product, &orders).await.unwrap() {
            DeleteCheck::Blocked(blocking) => {
                assert_eq!(blocking.len(), 2);
                let ids: Vec<&str> = blocking.iter().map(|b| b.id.as_str()).collect();
                assert_eq!(ids, vec!["order:o1", "order:o2"]);
                assert_eq!(blocking[0].customer_name, "alice");
                assert_eq!(blocking[1].total_amount, 19.0);
            }
            DeleteCheck::Allowed(_) => panic!("expected deletion to be blocked"),
        }
    }
}
