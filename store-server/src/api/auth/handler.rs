//! Authentication Handlers
//!
//! Registration, login, and account queries.

use std::time::Duration;

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Role, User};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

use shared::ApiResponse;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn issue_token(state: &ServerState, user: &User) -> Result<String, AppError> {
    let user_id = user.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    state
        .get_jwt_service()
        .generate_token(user_id, user.name.as_str(), user.email.as_str(), user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
}

/// POST /api/auth/register - create an account
///
/// Registering as admin requires the configured admin secret; with no secret
/// configured, admin registration is disabled entirely.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    payload.validate()?;

    let role = match payload.role.as_deref() {
        None | Some("user") => Role::User,
        Some("admin") => {
            let granted = matches!(
                (state.config.admin_secret.as_deref(), payload.admin_secret.as_deref()),
                (Some(expected), Some(given)) if expected == given
            );
            if !granted {
                tracing::warn!(target: "security", email = %payload.email, "admin_registration_denied");
                return Err(AppError::forbidden(
                    "Access denied: invalid or missing admin secret",
                ));
            }
            Role::Admin
        }
        Some(_) => {
            return Err(AppError::validation(
                "Role must be either \"user\" or \"admin\"",
            ));
        }
    };

    let repo = UserRepository::new(state.db.clone());
    if repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = User::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let user = repo
        .create(payload.name, payload.email, password_hash, role)
        .await?;

    let token = issue_token(&state, &user)?;

    tracing::info!(email = %user.email, role = ?user.role, "User registered");

    Ok(Json(ApiResponse::ok_with_message(
        LoginResponse {
            user: user.into(),
            token,
        },
        "User registered successfully",
    )))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    payload.validate()?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.find_by_email(&payload.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent account enumeration
    let user = match user {
        Some(user) => {
            let password_valid = user
                .verify_password(&payload.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(email = %payload.email, "Login failed - invalid credentials");
                return Err(AppError::InvalidCredentials);
            }

            user
        }
        None => {
            tracing::warn!(email = %payload.email, "Login failed - user not found");
            return Err(AppError::InvalidCredentials);
        }
    };

    let token = issue_token(&state, &user)?;

    tracing::info!(email = %user.email, "User logged in successfully");

    Ok(Json(ApiResponse::ok_with_message(
        LoginResponse {
            user: user.into(),
            token,
        },
        "Login successful",
    )))
}

/// POST /api/auth/logout
///
/// JWT is stateless: logout is an acknowledgement, the client discards the
/// token.
pub async fn logout(user: CurrentUser) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    tracing::info!(user_id = %user.id, "User logged out");
    Ok(Json(ApiResponse::ok_with_message(
        serde_json::json!({}),
        "Logout successful",
    )))
}

/// GET /api/auth/profile - current account, fresh from the store
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let repo = UserRepository::new(state.db.clone());
    let fresh = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ApiResponse::ok(fresh.into())))
}

/// GET /api/auth/users - all accounts (admin)
pub async fn users(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<UserInfo>>>> {
    user.require_admin()?;

    let repo = UserRepository::new(state.db.clone());
    let users: Vec<UserInfo> = repo.find_all().await?.into_iter().map(UserInfo::from).collect();
    let count = users.len();

    Ok(Json(ApiResponse::ok_with_count(users, count)))
}
