//! Record store client abstraction.
//!
//! The store is a remote, generic CRUD API keyed by an opaque id and
//! scoped by the owning identity. This module defines the consumed
//! contract (`RecordStore`), a PostgreSQL-backed client (`PgStore`), an
//! in-memory implementation for demo mode and tests (`MemoryStore`), and
//! the worker thread that serializes remote operations (`worker`).

mod memory;
mod postgres;
pub mod worker;

pub use memory::{CallLog, MemoryStore};
pub use postgres::PgStore;

use crate::model::{Record, RecordPatch};

/// Error raised by any store operation. Carries only a human-readable
/// message; no structured error codes are consumed by this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Could not reach or authenticate against the store.
    Connection(String),
    /// The store rejected or failed the operation.
    Query(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Connection(msg) => write!(f, "store connection: {}", msg),
            StoreError::Query(msg) => write!(f, "store: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// The consumed store contract.
///
/// All reads are scoped to the caller's own records; `insert` deliberately
/// omits the owner and relies on the store's ambient-identity defaulting.
/// Updates resubmit all editable fields together, even unchanged ones.
pub trait RecordStore: Send {
    /// All records owned by `owner`, ordered by creation time descending.
    fn select_all(&mut self, owner: &str) -> Result<Vec<Record>, StoreError>;

    /// Creates a record; id, owner and creation time are store-assigned.
    fn insert(&mut self, patch: &RecordPatch) -> Result<Record, StoreError>;

    /// Full-field update of the record with the given id.
    fn update(&mut self, id: &str, patch: &RecordPatch) -> Result<(), StoreError>;

    /// Deletes the record with the given id.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}
