use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::ports::ListStore;

/// Process-local list store
///
/// Follows remote list semantics: `create` appends to an existing list,
/// writing past the end of a list is an error and reading past it yields
/// `None`. Useful for tests and for sharing one filter between threads of a
/// single process.
#[derive(Default)]
pub struct InMemoryListStore {
    lists: RwLock<HashMap<String, Vec<Vec<u8>>>>,
}

impl InMemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lists held
    pub fn key_count(&self) -> usize {
        self.lists.read().len()
    }
}

impl ListStore for InMemoryListStore {
    fn length(&self, key: &str) -> Result<u64, StoreError> {
        Ok(self.lists.read().get(key).map_or(0, |list| list.len() as u64))
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.lists.write().remove(key);
        Ok(())
    }

    fn create(&self, key: &str, len: u64, value: &[u8]) -> Result<(), StoreError> {
        let len = usize::try_from(len).map_err(|_| StoreError::CommandFailed {
            command: "RPUSH",
            message: format!("length {} exceeds addressable memory", len),
        })?;
        let mut lists = self.lists.write();
        let list = lists.entry(key.to_string()).or_default();
        list.extend(std::iter::repeat(value.to_vec()).take(len));
        Ok(())
    }

    fn set_at(&self, key: &str, index: u64, value: &[u8]) -> Result<(), StoreError> {
        let mut lists = self.lists.write();
        let list = lists.get_mut(key).ok_or_else(|| StoreError::CommandFailed {
            command: "LSET",
            message: "no such key".to_string(),
        })?;
        let len = list.len() as u64;
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| list.get_mut(i))
            .ok_or_else(|| StoreError::IndexOutOfRange {
                key: key.to_string(),
                index,
                len,
            })?;
        *slot = value.to_vec();
        Ok(())
    }

    fn get_at(&self, key: &str, index: u64) -> Result<Option<Vec<u8>>, StoreError> {
        let lists = self.lists.read();
        Ok(lists
            .get(key)
            .and_then(|list| usize::try_from(index).ok().and_then(|i| list.get(i)))
            .cloned())
    }
}
