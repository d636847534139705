//! Order API Handlers
//!
//! All order routes require authentication. Admins see everything; a
//! regular account only reaches orders placed under its own email.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderPatch, OrderUpdate};
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::orders::number;
use crate::pricing;
use crate::utils::{AppError, AppResult};

use shared::ApiResponse;

fn ensure_can_access(user: &CurrentUser, order: &Order) -> Result<(), AppError> {
    if user.can_access_order(&order.customer_email) {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "You do not have permission to access this resource",
        ))
    }
}

/// GET /api/orders - orders visible to the caller, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = if user.is_admin() {
        repo.find_all().await?
    } else {
        repo.find_by_customer(&user.email).await?
    };
    let count = orders.len();

    Ok(Json(ApiResponse::ok_with_count(orders, count)))
}

/// GET /api/orders/{id} - single order (owner or admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    ensure_can_access(&user, &order)?;

    Ok(Json(ApiResponse::ok(order)))
}

/// POST /api/orders - create order
///
/// Every requested line item is resolved against the catalog at this
/// instant; name and price snapshots plus the computed total are persisted
/// with the order. An unresolvable product fails the whole request.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    payload.validate()?;

    let products = ProductRepository::new(state.db.clone());
    let priced = pricing::price_items(&payload.items, &products).await?;

    let order_number = payload.order_number.unwrap_or_else(number::generate);

    let now = Utc::now();
    let order = Order {
        id: None,
        order_number,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone,
        items: priced.items,
        total_amount: priced.total_amount,
        status: payload.status.unwrap_or_default(),
        shipping_address: payload.shipping_address,
        created_at: now,
        updated_at: now,
    };

    let repo = OrderRepository::new(state.db.clone());
    let created = repo.create(order).await?;

    tracing::info!(order_number = %created.order_number, total = created.total_amount, "Order created");

    Ok(Json(ApiResponse::ok_with_message(
        created,
        "Order created successfully",
    )))
}

/// PUT /api/orders/{id} - partial update (owner or admin)
///
/// Items are re-priced against the live catalog only when the payload
/// carries an `items` field; otherwise the stored snapshots and total stay
/// exactly as they were.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    payload.validate()?;

    let repo = OrderRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    ensure_can_access(&user, &existing)?;

    let mut patch = OrderPatch {
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone,
        shipping_address: payload.shipping_address,
        status: payload.status,
        ..OrderPatch::default()
    };

    if let Some(items) = &payload.items {
        let products = ProductRepository::new(state.db.clone());
        let priced = pricing::price_items(items, &products).await?;
        patch.items = Some(priced.items);
        patch.total_amount = Some(priced.total_amount);
    }

    let updated = repo.update(&id, patch).await?;

    Ok(Json(ApiResponse::ok_with_message(
        updated,
        "Order updated successfully",
    )))
}

/// DELETE /api/orders/{id} - delete order (admin)
///
/// Unconditional: nothing references orders.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    user.require_admin()?;

    let repo = OrderRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;

    tracing::info!(order_number = %deleted.order_number, "Order deleted");

    Ok(Json(ApiResponse::ok_with_message(
        serde_json::json!({}),
        "Order deleted successfully",
    )))
}
