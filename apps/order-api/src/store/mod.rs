//! Order persistence.
//!
//! The [`OrderStore`] trait is the seam between the HTTP layer and the two
//! interchangeable backends: PostgreSQL ([`postgres::PgOrderStore`]) and a
//! local JSON document ([`json_file::JsonFileStore`]). [`connect`] picks one
//! at startup from configuration; the choice is fixed for the process
//! lifetime and the instance is passed to handlers explicitly, never held in
//! a global.

pub mod json_file;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::models::{NewOrder, Order, OrderPatch};

/// Storage capability for orders.
///
/// Both backends honor identical externally observable behavior: ids are
/// strictly increasing and never reused, `list` returns newest first, and
/// `update` applies only the fields present in the patch.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order: assign the next id, set status to `OPEN` and
    /// `created_at` to now, and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`] if a required field is empty and
    /// a storage variant if persistence fails.
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Return all orders, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns a storage variant if the read fails.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Apply a partial update to the order with the given id and return the
    /// full updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no order has that id, or a
    /// storage variant if persistence fails.
    async fn update(&self, id: i64, patch: OrderPatch) -> Result<Order, StoreError>;
}

/// Which backend the process is running against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Local JSON document fallback.
    DemoJson,
}

impl BackendKind {
    /// Label reported by `/api/ping`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::DemoJson => "demo-json",
        }
    }
}

/// Reject a record whose required fields would violate the NOT NULL schema.
///
/// The Postgres columns enforce presence for free; the file backend calls
/// this so both backends reject the same inputs.
pub(crate) fn ensure_required(order: &NewOrder) -> Result<(), StoreError> {
    if order.world_id_hash.is_empty() {
        return Err(StoreError::Constraint {
            field: "world_id_hash",
        });
    }
    if order.order_type.is_empty() {
        return Err(StoreError::Constraint { field: "type" });
    }
    if order.amount_wld.is_zero() {
        return Err(StoreError::Constraint {
            field: "amount_wld",
        });
    }
    if order.amount_cop.is_zero() {
        return Err(StoreError::Constraint {
            field: "amount_cop",
        });
    }
    Ok(())
}

/// Build the store selected by configuration.
///
/// A configured `DATABASE_URL` selects Postgres; otherwise the JSON-file
/// fallback is opened (creating its document if absent).
///
/// # Errors
///
/// Returns an error if the database connection or the initial file write
/// fails.
pub async fn connect(config: &AppConfig) -> Result<(Arc<dyn OrderStore>, BackendKind), StoreError> {
    match &config.database_url {
        Some(url) => {
            let store = postgres::PgOrderStore::connect(url).await?;
            Ok((Arc::new(store), BackendKind::Postgres))
        }
        None => {
            let store = json_file::JsonFileStore::open(&config.data_file).await?;
            Ok((Arc::new(store), BackendKind::DemoJson))
        }
    }
}
