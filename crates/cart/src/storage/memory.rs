//! In-process storage.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{CartStorage, StorageError};

/// Slots kept in a shared map. Clones see the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one slot.
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let slots = HashMap::from([(key.into(), value.into())]);
        Self {
            slots: Arc::new(RwLock::new(slots)),
        }
    }
}

impl CartStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_slots() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("k", "v").await.unwrap();
        assert_eq!(other.get_item("k").await.unwrap().as_deref(), Some("v"));

        other.remove_item("k").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_with_item() {
        let storage = MemoryStorage::with_item("@RocketShoes:cart", "[]");
        assert_eq!(
            storage.get_item("@RocketShoes:cart").await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
