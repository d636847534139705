//! API Response types
//!
//! Standardized response envelope for the entire API.
//!
//! All responses follow this format:
//! ```json
//! {
//!     "success": true,
//!     "message": "Product updated successfully",
//!     "data": { ... },
//!     "changes": [ { "field": "price", "oldValue": 10.0, "newValue": 12.0 } ]
//! }
//! ```
//!
//! Handlers only decide the payload (`data` / `changes` / `errors`); the
//! envelope shape is fixed here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field-level change reported by a partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Unified API response envelope
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of items, present on list responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Field-level messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Field-level diff, present on partial-update responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<FieldChange>>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
            errors: None,
            changes: None,
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Create a successful list response carrying an item count
    pub fn ok_with_count(data: T, count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::ok(data)
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            count: None,
            data: None,
            errors: None,
            changes: None,
        }
    }

    /// Create an error response with per-field messages
    pub fn error_with_details(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::error(message)
        }
    }

    /// Attach a field-level diff to the response
    pub fn with_changes(mut self, changes: Vec<FieldChange>) -> Self {
        self.changes = Some(changes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_skips_empty_fields() {
        let resp = ApiResponse::ok(42);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("message").is_none());
        assert!(json.get("errors").is_none());
        assert!(json.get("changes").is_none());
    }

    #[test]
    fn field_change_uses_camel_case() {
        let change = FieldChange {
            field: "price".to_string(),
            old_value: serde_json::json!(10.0),
            new_value: serde_json::json!(12.0),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["oldValue"], 10.0);
        assert_eq!(json["newValue"], 12.0);
    }
}
