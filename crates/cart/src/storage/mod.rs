//! Durable key-value slots for the persisted cart.
//!
//! Values are opaque strings, mirroring browser local storage: the cart
//! container owns the JSON encoding and writes the whole cart to a single
//! slot on every change.

mod file;
mod memory;

use std::future::Future;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on slot '{key}': {source}")]
    Io {
        /// Slot being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A string key-value store.
pub trait CartStorage: Send + Sync {
    /// Read a slot. Returns `None` if it has never been written.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace a slot's contents.
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete a slot. Deleting a missing slot is not an error.
    ///
    /// Used when the cart is cleared.
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
