//! Field-level JSON diff
//!
//! Compares the before/after snapshots of an entity and reports which fields
//! changed. Fields are walked in a fixed declared order per entity (e.g.
//! `Product::DIFF_FIELDS`), never by whatever keys happen to exist at
//! runtime, so the diff cannot silently drift when an entity grows a field.
//!
//! Only fields present on the *new* snapshot are considered: a field removed
//! entirely by an update never appears as a change. Downstream consumers
//! rely on this asymmetry; do not "fix" it here.
//!
//! Values compare structurally (nested objects and arrays by value), with a
//! tolerance on numbers to absorb float serialization round-trips.

use serde::Serialize;
use serde_json::{Map, Value};

use shared::response::FieldChange;

/// Numeric comparison tolerance (serialization/deserialization jitter)
const FLOAT_EPSILON: f64 = 1e-9;

/// Recursive structural equality with numeric tolerance
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => (fa - fb).abs() < FLOAT_EPSILON,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(va, vb)| values_equal(va, vb))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, va)| b.get(key).is_some_and(|vb| values_equal(va, vb)))
        }
        (a, b) => a == b,
    }
}

/// Diff two snapshots over the declared field list, in declared order.
pub fn diff<T: Serialize>(old: &T, new: &T, fields: &[&str]) -> Vec<FieldChange> {
    let old_json = serde_json::to_value(old).unwrap_or(Value::Null);
    let new_json = serde_json::to_value(new).unwrap_or(Value::Null);
    diff_values(&old_json, &new_json, fields)
}

/// Diff two already-serialized snapshots.
pub fn diff_values(old: &Value, new: &Value, fields: &[&str]) -> Vec<FieldChange> {
    let empty = Map::new();
    let old_obj = old.as_object().unwrap_or(&empty);
    let new_obj = new.as_object().unwrap_or(&empty);

    let mut changes = Vec::new();
    for &field in fields {
        let Some(new_value) = new_obj.get(field) else {
            continue;
        };
        let old_value = old_obj.get(field).cloned().unwrap_or(Value::Null);
        if !values_equal(&old_value, new_value) {
            changes.push(FieldChange {
                field: field.to_string(),
                old_value,
                new_value: new_value.clone(),
            });
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const FIELDS: &[&str] = &["name", "price", "category", "tags", "address"];

    #[test]
    fn identical_snapshots_yield_no_changes() {
        let snapshot = json!({"name": "Coffee", "price": 10.0, "category": "Other"});
        assert!(diff_values(&snapshot, &snapshot, FIELDS).is_empty());
    }

    #[test]
    fn single_field_change_is_reported_alone() {
        let old = json!({"name": "Coffee", "price": 10.0, "category": "Home"});
        let new = json!({"name": "Coffee", "price": 10.0, "category": "Books"});

        let changes = diff_values(&old, &new, FIELDS);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "category");
        assert_eq!(changes[0].old_value, json!("Home"));
        assert_eq!(changes[0].new_value, json!("Books"));
    }

    #[test]
    fn changes_follow_declared_field_order() {
        let old = json!({"name": "Coffee", "price": 10.0});
        let new = json!({"price": 12.0, "name": "Espresso"});

        let changes = diff_values(&old, &new, FIELDS);
        let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "price"]);
    }

    #[test]
    fn fields_missing_from_the_new_snapshot_are_invisible() {
        // Removing a field is not a change under this contract
        let old = json!({"name": "Coffee", "price": 10.0});
        let new = json!({"name": "Coffee"});

        assert!(diff_values(&old, &new, FIELDS).is_empty());
    }

    #[test]
    fn field_appearing_on_the_new_snapshot_diffs_against_null() {
        let old = json!({"name": "Coffee"});
        let new = json!({"name": "Coffee", "price": 10.0});

        let changes = diff_values(&old, &new, FIELDS);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "price");
        assert_eq!(changes[0].old_value, Value::Null);
    }

    #[test]
    fn arrays_and_nested_objects_compare_by_value() {
        let old = json!({
            "tags": ["a", "b"],
            "address": {"city": "Springfield", "zip": "62701"}
        });
        let same = json!({
            "tags": ["a", "b"],
            "address": {"zip": "62701", "city": "Springfield"}
        });
        let different = json!({
            "tags": ["a", "b", "c"],
            "address": {"city": "Springfield", "zip": "62701"}
        });

        assert!(diff_values(&old, &same, FIELDS).is_empty());

        let changes = diff_values(&old, &different, FIELDS);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "tags");
    }

    #[test]
    fn numeric_noise_below_epsilon_is_not_a_change() {
        let old = json!({"price": 10.0});
        let new = json!({"price": 10.0 + 1e-12});
        assert!(diff_values(&old, &new, FIELDS).is_empty());

        let real_change = json!({"price": 10.01});
        assert_eq!(diff_values(&old, &real_change, FIELDS).len(), 1);
    }

    #[test]
    fn undeclared_fields_are_ignored() {
        let old = json!({"name": "Coffee", "internal": 1});
        let new = json!({"name": "Coffee", "internal": 2});
        assert!(diff_values(&old, &new, FIELDS).is_empty());
    }
}
