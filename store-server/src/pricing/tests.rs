use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use surrealdb::RecordId;

use super::*;
use crate::db::models::{Category, OrderItemInput, Product};

/// In-memory catalog standing in for the record store
struct FakeCatalog {
    products: HashMap<String, Product>,
}

impl FakeCatalog {
    fn new(products: &[(&str, &str, f64)]) -> Self {
        let products = products
            .iter()
            .map(|(id, name, price)| ((*id).to_string(), make_product(id, name, *price)))
            .collect();
        Self { products }
    }
}

impl ProductLookup for FakeCatalog {
    async fn product_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        Ok(self.products.get(id).cloned())
    }
}

fn make_product(id: &str, name: &str, price: f64) -> Product {
    let now = Utc::now();
    Product {
        id: Some(RecordId::from_table_key("product", id)),
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        category: Category::Other,
        brand: "Acme".to_string(),
        in_stock: true,
        quantity: 10,
        tags: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

fn item(product_id: &str, quantity: u32) -> OrderItemInput {
    OrderItemInput {
        product_id: product_id.to_string(),
        quantity,
    }
}

#[tokio::test]
async fn prices_items_and_computes_total() {
    let catalog = FakeCatalog::new(&[("p1", "Gadget", 10.0), ("p2", "Gizmo", 5.0)]);

    let priced = price_items(&[item("p1", 2), item("p2", 3)], &catalog)
        .await
        .unwrap();

    assert_eq!(priced.items.len(), 2);
    assert_eq!(priced.items[0].product_name, "Gadget");
    assert_eq!(priced.items[0].quantity, 2);
    assert_eq!(priced.items[0].price, 10.0);
    assert_eq!(priced.items[1].product_name, "Gizmo");
    assert_eq!(priced.items[1].price, 5.0);
    assert_eq!(priced.total_amount, 35.0);
}

#[tokio::test]
async fn unknown_product_fails_the_whole_operation() {
    let catalog = FakeCatalog::new(&[("p1", "Gadget", 10.0)]);

    // First item resolves; the second does not. No partial result.
    let err = price_items(&[item("p1", 1), item("missing", 2)], &catalog)
        .await
        .unwrap_err();

    match err {
        PricingError::UnknownProduct(id) => assert_eq!(id, "missing"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn decimal_sums_avoid_float_drift() {
    // 0.1 + 0.2 is the classic f64 failure; the engine must return 0.30
    let catalog = FakeCatalog::new(&[("a", "A", 0.1), ("b", "B", 0.2)]);

    let priced = price_items(&[item("a", 1), item("b", 1)], &catalog)
        .await
        .unwrap();

    assert_eq!(priced.total_amount, 0.3);
}

#[tokio::test]
async fn hundred_penny_items_sum_to_a_dollar() {
    let catalog = FakeCatalog::new(&[("penny", "Penny Item", 0.01)]);

    let priced = price_items(&[item("penny", 100)], &catalog).await.unwrap();

    assert_eq!(priced.total_amount, 1.0);
}

#[tokio::test]
async fn snapshot_is_independent_of_later_price_changes() {
    let mut catalog = FakeCatalog::new(&[("p1", "Gadget", 10.0)]);

    let priced = price_items(&[item("p1", 2)], &catalog).await.unwrap();
    assert_eq!(priced.items[0].price, 10.0);

    // Raise the catalog price after pricing; the snapshot must not move
    catalog.products.get_mut("p1").unwrap().price = 12.0;
    assert_eq!(priced.items[0].price, 10.0);
    assert_eq!(priced.total_amount, 20.0);
}

#[tokio::test]
async fn empty_request_prices_to_zero() {
    let catalog = FakeCatalog::new(&[]);
    let priced = price_items(&[], &catalog).await.unwrap();
    assert!(priced.items.is_empty());
    assert_eq!(priced.total_amount, 0.0);
}

#[test]
fn to_f64_rounds_half_up() {
    assert_eq!(to_f64(Decimal::new(5, 3)), 0.01); // 0.005 -> 0.01
    assert_eq!(to_f64(Decimal::new(4, 3)), 0.0); // 0.004 -> 0.00
}
