//! In-process item store for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Item, ItemStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, Item>>,
    writes: Mutex<Vec<(String, String)>>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    pub fn with_label(self, key: &str, label: &str) -> Self {
        self.entry(key, |item| item.label = Some(label.to_string()));
        self
    }

    pub fn with_state(self, key: &str, state: &str) -> Self {
        self.entry(key, |item| item.state = Some(state.to_string()));
        self
    }

    /// Every accepted write, in order
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn state_of(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap()
            .get(key)
            .and_then(|item| item.state.clone())
    }

    fn entry(&self, key: &str, f: impl FnOnce(&mut Item)) {
        let mut items = self.items.lock().unwrap();
        f(items.entry(key.to_string()).or_default());
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn item(&self, key: &str) -> Result<Item, StoreError> {
        self.items
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::Rejected {
                key: key.to_string(),
                status: 404,
            })
    }

    async fn put_state(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                status: 404,
            });
        }
        self.entry(key, |item| item.state = Some(value.to_string()));
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}
