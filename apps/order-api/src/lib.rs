//! WorldChange order-tracking backend.
//!
//! A small REST service for a peer-to-peer WLD/COP exchange: clients submit
//! trade orders, list the open book, and update an order's status once a
//! counterparty is found.
//!
//! Orders persist to PostgreSQL when `DATABASE_URL` is configured, and to a
//! single local JSON document otherwise. Both backends sit behind the
//! [`store::OrderStore`] contract and are interchangeable from the API's
//! point of view.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod store;

pub use config::AppConfig;
pub use error::StoreError;
pub use models::{NewOrder, Order, OrderPatch};
pub use store::{BackendKind, OrderStore};
