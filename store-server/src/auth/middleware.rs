//! Authentication Middleware
//!
//! Axum middleware validating the bearer token on protected routes and
//! attaching the resulting [`CurrentUser`] to the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Routes that never require a token
fn is_public(req: &Request) -> bool {
    let path = req.uri().path();

    // Non-API routes fall through to the 404 handler
    if !path.starts_with("/api/") {
        return true;
    }

    if path == "/api/auth/login" || path == "/api/auth/register" {
        return true;
    }

    // The product catalog is readable without an account
    req.method() == http::Method::GET && path.starts_with("/api/products")
}

/// Require authentication middleware
///
/// Extracts and validates the JWT from the Authorization header; on success
/// the [`CurrentUser`] is added to the request extensions.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight never carries credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if is_public(&req) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "auth_missing");
            return Err(AppError::Unauthorized);
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);

            tracing::debug!(
                user_id = %user.id,
                email = %user.email,
                role = ?user.role,
                "User authenticated"
            );

            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "auth_failed");

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}
