//! HTTP/JSON API.
//!
//! Thin handlers over the [`OrderStore`]: validate request shape, call the
//! store, serialize the result. Storage failures are logged server-side and
//! surfaced as a generic 500 body.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{StoreError, ValidationError};
use crate::models::{validate_new_order, CreateOrderBody, Order, OrderPatch};
use crate::store::{BackendKind, OrderStore};

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The store selected at startup.
    pub store: Arc<dyn OrderStore>,
    /// Which backend the store runs against (reported by `/api/ping`).
    pub backend: BackendKind,
}

impl AppState {
    /// Create the shared state.
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, backend: BackendKind) -> Self {
        Self { store, backend }
    }
}

/// Create the Axum router with all endpoints.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/orders", get(list_orders))
        .route("/api/orders", post(create_order))
        .route("/api/orders/{id}", put(update_order))
        .route("/api/ping", get(ping))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness text route.
async fn root() -> &'static str {
    "🚀 Backend de WorldChange funcionando correctamente!"
}

/// List all orders, newest first.
async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.store.list().await?;
    tracing::debug!(count = orders.len(), "Listed orders");
    Ok(Json(orders))
}

/// Create an order from a raw payload.
async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderBody>,
) -> Result<Json<Order>, ApiError> {
    let input = validate_new_order(body)?;

    let order = state.store.create(input).await?;
    tracing::info!(
        order_id = order.id,
        order_type = %order.order_type,
        "Order created"
    );
    Ok(Json(order))
}

/// Apply a partial update to an order.
async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<OrderPatch>,
) -> Result<Json<Order>, ApiError> {
    let order = state.store.update(id, patch).await?;
    tracing::info!(order_id = id, status = %order.status, "Order updated");
    Ok(Json(order))
}

/// Health probe reporting which backend is active.
async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        env: state.backend.as_str(),
    })
}

/// Body of the `/api/ping` response.
#[derive(Debug, Serialize)]
struct PingResponse {
    ok: bool,
    env: &'static str,
}

/// API error mapped to an HTTP status and JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// Request shape validation failed (400).
    Validation(ValidationError),
    /// The store reported a failure (400/404/500 depending on variant).
    Store(StoreError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": err.to_string() })),
            )
                .into_response(),
            Self::Store(err @ StoreError::Constraint { .. }) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": err.to_string() })),
            )
                .into_response(),
            Self::Store(StoreError::NotFound { id }) => {
                tracing::debug!(order_id = id, "Order not found");
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({ "message": "not found" })),
                )
                    .into_response()
            }
            Self::Store(err) => {
                // Cause stays in the logs, never in the response.
                tracing::error!(error = %err, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "server error" })),
                )
                    .into_response()
            }
        }
    }
}
