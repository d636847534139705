//! Order Model
//!
//! Line items hold point-in-time snapshots of the referenced product's name
//! and price; later product edits never flow back into stored orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;
use crate::utils::validation::validate_phone;

pub type OrderId = RecordId;

/// Order status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Shipping address (embedded object)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[validate(length(min = 1, message = "Street address is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "USA".to_string()
}

/// One line item: product reference plus name/price snapshots taken when the
/// order was written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product_id: RecordId,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OrderId>,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    /// Server-computed: sum of item price x quantity across all items
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// API Request Types
// =============================================================================

/// A requested line item before pricing: just the reference and quantity.
/// Name and price are resolved server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    #[validate(length(min = 1, message = "Product id is required"))]
    pub product_id: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    /// Generated when absent
    pub order_number: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Customer name is required and cannot exceed 100 characters"))]
    pub customer_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub customer_email: String,
    #[validate(custom(function = validate_phone))]
    pub customer_phone: String,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemInput>,
    #[validate(nested)]
    pub shipping_address: ShippingAddress,
    pub status: Option<OrderStatus>,
}

/// Update order payload - partial-field patch semantics. Items, when
/// present, are re-priced in full; when absent, existing items and the
/// total are left untouched. Unknown fields are rejected outright.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderUpdate {
    #[validate(length(min = 1, max = 100, message = "Customer name must be a non-empty string of at most 100 characters"))]
    pub customer_name: Option<String>,
    #[validate(email(message = "Please enter a valid email"))]
    pub customer_email: Option<String>,
    #[validate(custom(function = validate_phone))]
    pub customer_phone: Option<String>,
    #[validate(length(min = 1, message = "Items must be a non-empty array"), nested)]
    pub items: Option<Vec<OrderItemInput>>,
    #[validate(nested)]
    pub shipping_address: Option<ShippingAddress>,
    pub status: Option<OrderStatus>,
}

/// Field patch applied by the repository; items/total always travel together
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
    pub status: Option<OrderStatus>,
    pub items: Option<Vec<OrderItem>>,
    pub total_amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> OrderCreate {
        OrderCreate {
            order_number: None,
            customer_name: "Jane Doe".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_phone: "555-123-4567".to_string(),
            items: vec![OrderItemInput {
                product_id: "product:abc".to_string(),
                quantity: 1,
            }],
            shipping_address: ShippingAddress {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                country: default_country(),
            },
            status: None,
        }
    }

    #[test]
    fn create_accepts_valid_payload() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn create_rejects_empty_items() {
        let mut payload = valid_create();
        payload.items.clear();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn create_rejects_zero_quantity() {
        let mut payload = valid_create();
        payload.items[0].quantity = 0;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn create_rejects_bad_email_and_phone() {
        let mut payload = valid_create();
        payload.customer_email = "nope".to_string();
        payload.customer_phone = "123".to_string();
        let errors = payload.validate().unwrap_err();
        let messages = crate::utils::validation::collect_messages(&errors);
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn update_rejects_order_number_change() {
        let result: Result<OrderUpdate, _> =
            serde_json::from_str(r#"{"orderNumber": "ORD-1-1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn country_defaults_when_missing() {
        let addr: ShippingAddress = serde_json::from_str(
            r#"{"street": "1 Main St", "city": "Springfield", "state": "IL", "zipCode": "62701"}"#,
        )
        .unwrap();
        assert_eq!(addr.country, "USA");
    }

    #[test]
    fn status_defaults_to_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        let status: OrderStatus = serde_json::from_str(r#""shipped""#).unwrap();
        assert_eq!(status, OrderStatus::Shipped);
    }
}
