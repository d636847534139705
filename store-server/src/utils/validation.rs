//! Input validation helpers
//!
//! Glue between `validator` derive output and the API error envelope, plus
//! checks the derive macro cannot express.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Flatten a `ValidationErrors` tree into the flat message list the API
/// returns in the `errors` field.
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_into(errors, "", &mut messages);
    messages
}

fn collect_into(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for e in field_errors {
                    match &e.message {
                        Some(msg) => out.push(msg.to_string()),
                        None => out.push(format!("{path} is invalid")),
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_into(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_into(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Phone format check: optional leading `+`, then at least 10 characters of
/// digits, dashes, parentheses or spaces.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    let valid = rest.chars().count() >= 10
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '(' | ')' | ' '));
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some(Cow::from("Please enter a valid phone number"));
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_phone_formats() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("555-123-4567").is_ok());
    }

    #[test]
    fn rejects_short_or_malformed_phones() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call-me-maybe").is_err());
        assert!(validate_phone("+").is_err());
    }
}
