//! Error types for the order store and the API boundary.
//!
//! Storage failures carry their cause for server-side logging; the HTTP
//! layer maps them to a generic 500 body and never echoes the cause to the
//! client.

use thiserror::Error;

/// Errors surfaced by [`crate::store::OrderStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or empty when persisting a record.
    ///
    /// The Postgres backend gets this from its NOT NULL columns; the file
    /// backend runs the same check explicitly so both reject identically.
    #[error("required field `{field}` is missing or empty")]
    Constraint {
        /// Name of the offending field.
        field: &'static str,
    },

    /// No order exists with the given id.
    #[error("order {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// Query or connection failure from the relational engine.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem failure from the JSON-file backend.
    #[error("file storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing JSON document could not be read or written.
    #[error("storage document error: {0}")]
    Document(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this error is a storage failure (as opposed to a caller
    /// mistake such as an unknown id or a missing field).
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Io(_) | Self::Document(_)
        )
    }
}

/// A create payload failed shape validation at the API boundary.
#[derive(Debug, Error)]
#[error("missing required field `{field}`")]
pub struct ValidationError {
    /// Name of the missing or empty field.
    pub field: &'static str,
}
