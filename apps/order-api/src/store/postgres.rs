//! PostgreSQL order store.
//!
//! Primary backend. Construction is idempotent: the `orders` table is
//! created if missing, with NOT NULL constraints on the four required
//! fields and server-side defaults for status and creation time. All
//! statements are parameterized; concurrent writers are serialized by the
//! engine, so multiple processes may share one database.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use super::{ensure_required, OrderStore};
use crate::error::StoreError;
use crate::models::{NewOrder, Order, OrderPatch, STATUS_OPEN};
use async_trait::async_trait;

/// Maximum connections in the pool.
const MAX_CONNECTIONS: u32 = 5;

/// Idempotent schema creation, matching the Order model column for column.
const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id BIGSERIAL PRIMARY KEY,
    world_id_hash TEXT NOT NULL,
    "type" TEXT NOT NULL,
    amount_wld NUMERIC(18,8) NOT NULL,
    amount_cop NUMERIC(18,2) NOT NULL,
    status TEXT NOT NULL DEFAULT 'OPEN',
    counterparty_contact TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const INSERT_ORDER: &str = r#"
INSERT INTO orders (world_id_hash, "type", amount_wld, amount_cop, status, counterparty_contact)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING id, world_id_hash, "type", amount_wld, amount_cop, status, counterparty_contact, created_at
"#;

const LIST_ORDERS: &str = r#"
SELECT id, world_id_hash, "type", amount_wld, amount_cop, status, counterparty_contact, created_at
FROM orders
ORDER BY created_at DESC, id DESC
"#;

const UPDATE_ORDER: &str = r#"
UPDATE orders
SET status = COALESCE($2, status),
    counterparty_contact = COALESCE($3, counterparty_contact)
WHERE id = $1
RETURNING id, world_id_hash, "type", amount_wld, amount_cop, status, counterparty_contact, created_at
"#;

/// [`OrderStore`] over a PostgreSQL connection pool.
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Connect to the database and ensure the `orders` table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the schema statement fails.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;

        info!(
            max_connections = MAX_CONNECTIONS,
            "PostgreSQL order store initialized"
        );
        Ok(Self { pool })
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        ensure_required(&order)?;

        let stored = sqlx::query_as::<_, Order>(INSERT_ORDER)
            .bind(&order.world_id_hash)
            .bind(&order.order_type)
            .bind(order.amount_wld)
            .bind(order.amount_cop)
            .bind(STATUS_OPEN)
            .bind(&order.counterparty_contact)
            .fetch_one(&self.pool)
            .await?;

        debug!(order_id = stored.id, "Order inserted");
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as::<_, Order>(LIST_ORDERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    async fn update(&self, id: i64, patch: OrderPatch) -> Result<Order, StoreError> {
        let updated = sqlx::query_as::<_, Order>(UPDATE_ORDER)
            .bind(id)
            .bind(&patch.status)
            .bind(&patch.counterparty_contact)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })?;

        debug!(order_id = id, "Order updated");
        Ok(updated)
    }
}
