//! Authentication DTOs
//!
//! Request/response types for the auth endpoints, reused by server and
//! clients for API consistency.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register payload
///
/// Registering as `admin` additionally requires `admin_secret` to match the
/// server's configured secret; otherwise the request is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// "user" (default) or "admin"
    pub role: Option<String>,
    pub admin_secret: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Public view of a user account (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Login/register response: user info plus a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserInfo,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_short_password() {
        let req = RegisterRequest {
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            password: "12345".to_string(),
            role: None,
            admin_secret: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn login_rejects_bad_email() {
        let req = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
