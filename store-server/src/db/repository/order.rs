//! Order Repository

use chrono::Utc;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::catalog::OrderReferenceLookup;
use crate::db::models::{Order, OrderPatch};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find all orders placed under the given customer email, newest first
    pub async fn find_by_customer(&self, email: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE customerEmail = $email ORDER BY createdAt DESC")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_id(ORDER_TABLE, id)?;
        let order: Option<Order> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// Find all orders whose line items reference the given product
    pub async fn find_referencing_product(&self, product_id: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE $product IN items.productId ORDER BY createdAt DESC")
            .bind(("product", product_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Persist a new order. The unique index on `orderNumber` turns a true
    /// order-number collision into a `Duplicate` write failure.
    pub async fn create(&self, mut order: Order) -> RepoResult<Order> {
        let now = Utc::now();
        order.id = None;
        order.created_at = now;
        order.updated_at = now;

        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;

        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Update an order, touching only the supplied fields. Items and total
    /// amount travel together: callers re-price before patching items.
    pub async fn update(&self, id: &str, patch: OrderPatch) -> RepoResult<Order> {
        let record_id = parse_id(ORDER_TABLE, id)?;

        let mut set_parts: Vec<&str> = Vec::new();

        if patch.customer_name.is_some() { set_parts.push("customerName = $customer_name"); }
        if patch.customer_email.is_some() { set_parts.push("customerEmail = $customer_email"); }
        if patch.customer_phone.is_some() { set_parts.push("customerPhone = $customer_phone"); }
        if patch.shipping_address.is_some() { set_parts.push("shippingAddress = $shipping_address"); }
        if patch.status.is_some() { set_parts.push("status = $status"); }
        if patch.items.is_some() { set_parts.push("items = $items"); }
        if patch.total_amount.is_some() { set_parts.push("totalAmount = $total_amount"); }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)));
        }

        set_parts.push("updatedAt = $updated_at");

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("record", record_id))
            .bind(("updated_at", Utc::now()));

        if let Some(v) = patch.customer_name { query = query.bind(("customer_name", v)); }
        if let Some(v) = patch.customer_email { query = query.bind(("customer_email", v)); }
        if let Some(v) = patch.customer_phone { query = query.bind(("customer_phone", v)); }
        if let Some(v) = patch.shipping_address { query = query.bind(("shipping_address", v)); }
        if let Some(v) = patch.status { query = query.bind(("status", v)); }
        if let Some(v) = patch.items { query = query.bind(("items", v)); }
        if let Some(v) = patch.total_amount { query = query.bind(("total_amount", v)); }

        let mut result = query.await?;
        let orders: Vec<Order> = result.take(0)?;

        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Hard delete an order, returning the removed record. Orders carry no
    /// inbound references, so deletion is unconditional.
    pub async fn delete(&self, id: &str) -> RepoResult<Order> {
        let record_id = parse_id(ORDER_TABLE, id)?;
        let deleted: Option<Order> = self.base.db().delete(record_id).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}

impl OrderReferenceLookup for OrderRepository {
    async fn orders_referencing(&self, product_id: &RecordId) -> RepoResult<Vec<Order>> {
        self.find_referencing_product(product_id).await
    }
}
