//! Product API Handlers
//!
//! Reads are public; every mutation is admin-only. Partial updates report a
//! field-level diff, and deletion is refused while any order still
//! references the product.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::audit;
use crate::auth::CurrentUser;
use crate::catalog::{self, DeleteCheck, DeletedProductSummary};
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::utils::{AppError, AppResult};

use shared::ApiResponse;

/// GET /api/products - all products, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all().await?;
    let count = products.len();

    Ok(Json(ApiResponse::ok_with_count(products, count)))
}

/// GET /api/products/{id} - single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ApiResponse::ok(product)))
}

/// POST /api/products - create product (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    user.require_admin()?;
    payload.validate()?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;

    tracing::info!(name = %product.name, "Product created");

    Ok(Json(ApiResponse::ok_with_message(
        product,
        "Product created successfully",
    )))
}

/// PUT /api/products/{id} - partial update (admin)
///
/// Only supplied fields are validated and applied; the response carries the
/// field-level diff between the stored snapshots.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    user.require_admin()?;
    payload.validate()?;

    let repo = ProductRepository::new(state.db.clone());
    let old = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let updated = repo.update(&id, payload).await?;

    let changes = audit::diff(&old, &updated, Product::DIFF_FIELDS);

    Ok(Json(
        ApiResponse::ok_with_message(updated, "Product updated successfully").with_changes(changes),
    ))
}

/// DELETE /api/products/{id} - delete product (admin)
///
/// Refused while any order references the product; the 409 payload
/// enumerates every blocking order so the caller can address each one.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedProductSummary>>> {
    user.require_admin()?;

    let products = ProductRepository::new(state.db.clone());
    let orders = OrderRepository::new(state.db.clone());

    let product = products
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    match catalog::check_delete(&product, &orders).await? {
        DeleteCheck::Blocked(blocking) => {
            tracing::info!(id = %id, blocked_by = blocking.len(), "Product deletion blocked");
            Err(AppError::conflict_with_details(
                "Cannot delete product. It is used in existing orders.",
                serde_json::json!({ "orders": blocking }),
            ))
        }
        DeleteCheck::Allowed(summary) => {
            // Check-then-delete window: an order inserted right here slips
            // past the guard. No transaction spans the two calls.
            products.delete(&id).await?;

            tracing::info!(id = %id, name = %summary.name, "Product deleted");

            Ok(Json(ApiResponse::ok_with_message(
                summary,
                "Product deleted successfully",
            )))
        }
    }
}
