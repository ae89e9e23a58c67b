//! Item store used for credentials and published vehicle values.
//!
//! This module provides:
//! - `ItemStore`: the get-by-key / put-by-key contract
//! - `OpenHabStore`: the openHAB REST implementation
//! - `items`: the item names read and written by this crate
//!
//! Write failures are never fatal; use [`publish`] to write a value and log
//! a warning when the store rejects it.

pub mod items;
pub mod openhab;

#[cfg(test)]
pub(crate) mod memory;

use std::fmt::Display;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

pub use openhab::OpenHabStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Item {key} rejected with status {status}")]
    Rejected { key: String, status: u16 },

    #[error("Item {key} has no {field}")]
    MissingField { key: String, field: &'static str },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// An item as returned by the store.
///
/// Static configuration (account data) is kept in `label`, mutable values
/// in `state`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn item(&self, key: &str) -> Result<Item, StoreError>;

    async fn put_state(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn label(&self, key: &str) -> Result<String, StoreError> {
        self.item(key).await?.label.ok_or_else(|| StoreError::MissingField {
            key: key.to_string(),
            field: "label",
        })
    }

    /// `None` when the item exists but carries no state.
    async fn state(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.item(key).await?.state)
    }
}

/// Write a value to the store, logging (not failing) when it is rejected.
pub async fn publish<V: Display + ?Sized>(store: &dyn ItemStore, key: &str, value: &V) -> bool {
    match store.put_state(key, &value.to_string()).await {
        Ok(()) => true,
        Err(e) => {
            warn!(item = key, error = %e, "Couldn't save item to the store");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;

    #[tokio::test]
    async fn test_publish_swallows_rejection() {
        let store = MemoryStore::new().rejecting_writes();
        assert!(!publish(&store, items::SOC_MAX, "22.5").await);
        assert_eq!(store.writes().len(), 0);
    }

    #[tokio::test]
    async fn test_label_requires_field() {
        let store = MemoryStore::new().with_state(items::VIN, "NULL");
        let err = store.label(items::VIN).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingField { field: "label", .. }));
    }
}
