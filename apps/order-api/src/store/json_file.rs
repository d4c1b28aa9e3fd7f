//! JSON-file order store.
//!
//! Fallback backend for local and demo operation: the whole store is one
//! pretty-printed UTF-8 document `{"orders": [...], "lastId": n}`. Every
//! operation is a full read-modify-write of that document, serialized by an
//! async mutex so interleaved handlers cannot lose updates. Writes land in a
//! temporary file first and are renamed into place, so a crash mid-write
//! never leaves a truncated document.
//!
//! Single process only. Two processes sharing one document can still
//! clobber each other; that is an accepted limitation of demo mode.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{ensure_required, OrderStore};
use crate::error::StoreError;
use crate::models::{NewOrder, Order, OrderPatch, COP_SCALE, STATUS_OPEN, WLD_SCALE};
use async_trait::async_trait;

/// On-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    orders: Vec<Order>,
    #[serde(rename = "lastId")]
    last_id: i64,
}

/// [`OrderStore`] over a single local JSON document.
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes every read-modify-write of the document.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating the empty document if the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial document cannot be written.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        };

        if tokio::fs::try_exists(&store.path).await? {
            debug!(path = %store.path.display(), "Using existing order document");
        } else {
            store.write_document(&StoreDocument::default()).await?;
            info!(path = %store.path.display(), "Created empty order document");
        }

        Ok(store)
    }

    async fn read_document(&self) -> Result<StoreDocument, StoreError> {
        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Write the document to a sibling temp file, then rename into place.
    async fn write_document(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let raw = serde_json::to_vec_pretty(doc)?;

        let mut tmp = self.path.clone();
        tmp.as_mut_os_string().push(".tmp");

        tokio::fs::write(&tmp, &raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for JsonFileStore {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        ensure_required(&order)?;

        let _guard = self.lock.lock().await;

        let mut doc = self.read_document().await?;
        let id = doc.last_id + 1;
        doc.last_id = id;

        let stored = Order {
            id,
            world_id_hash: order.world_id_hash,
            order_type: order.order_type,
            amount_wld: order.amount_wld.round_dp(WLD_SCALE),
            amount_cop: order.amount_cop.round_dp(COP_SCALE),
            status: STATUS_OPEN.to_string(),
            counterparty_contact: order.counterparty_contact,
            created_at: Utc::now(),
        };
        doc.orders.push(stored.clone());

        self.write_document(&doc).await?;

        debug!(order_id = id, "Order appended to document");
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let _guard = self.lock.lock().await;

        let doc = self.read_document().await?;
        // Insertion order is oldest first; the contract is newest first.
        Ok(doc.orders.into_iter().rev().collect())
    }

    async fn update(&self, id: i64, patch: OrderPatch) -> Result<Order, StoreError> {
        let _guard = self.lock.lock().await;

        let mut doc = self.read_document().await?;
        let order = doc
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StoreError::NotFound { id })?;

        patch.apply(order);
        let updated = order.clone();

        self.write_document(&doc).await?;

        debug!(order_id = id, "Order updated in document");
        Ok(updated)
    }
}
