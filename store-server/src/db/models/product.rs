//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

pub type ProductId = RecordId;

/// Fixed product category set, enforced at deserialization time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
    Other,
}

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub brand: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Fields compared by the change-diff on partial updates, in the order
    /// changes are reported. Identity and store-managed timestamps are
    /// deliberately absent.
    pub const DIFF_FIELDS: &'static [&'static str] = &[
        "name",
        "description",
        "price",
        "category",
        "brand",
        "inStock",
        "quantity",
        "tags",
    ];
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 100, message = "Product name is required and cannot exceed 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 500, message = "Product description is required and cannot exceed 500 characters"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    pub category: Category,
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    pub in_stock: Option<bool>,
    pub quantity: Option<u32>,
    pub tags: Option<Vec<String>>,
}

/// Update product payload - only supplied fields are validated and applied.
/// Unknown fields are rejected outright.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 100, message = "Product name must be a non-empty string of at most 100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 500, message = "Product description must be a non-empty string of at most 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub category: Option<Category>,
    #[validate(length(min = 1, message = "Brand must be a non-empty string"))]
    pub brand: Option<String>,
    pub in_stock: Option<bool>,
    pub quantity: Option<u32>,
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_negative_price() {
        let payload = ProductCreate {
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: -1.0,
            category: Category::Other,
            brand: "Acme".to_string(),
            in_stock: None,
            quantity: None,
            tags: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn create_rejects_over_long_name() {
        let payload = ProductCreate {
            name: "x".repeat(101),
            description: "desc".to_string(),
            price: 1.0,
            category: Category::Books,
            brand: "Acme".to_string(),
            in_stock: None,
            quantity: None,
            tags: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_rejects_unknown_fields() {
        let result: Result<ProductUpdate, _> =
            serde_json::from_str(r#"{"name": "ok", "warehouse": "A1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_with_no_fields_is_valid() {
        let payload: ProductUpdate = serde_json::from_str("{}").unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.name.is_none());
    }

    #[test]
    fn category_rejects_values_outside_the_set() {
        let result: Result<Category, _> = serde_json::from_str(r#""Groceries""#);
        assert!(result.is_err());
        let ok: Category = serde_json::from_str(r#""Electronics""#).unwrap();
        assert_eq!(ok, Category::Electronics);
    }
}
