//! Outbound Port (Driven Port)
//!
//! The remote backend stores one list element per bit in an external
//! key-value server. It needs exactly five list operations from that server
//! and nothing about its transport: connecting, authenticating and
//! reconnecting belong to whoever hands the client in.

use crate::error::StoreError;

/// Ordered-list operations of a shared remote store
///
/// Each call is a single atomic command on the server. Implementations are
/// shared between filters through `Arc`, so methods take `&self`.
pub trait ListStore: Send + Sync {
    /// Length of the list at `key` (0 if absent)
    fn length(&self, key: &str) -> Result<u64, StoreError>;

    /// Remove the list at `key` if present
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Create the list at `key` with `len` copies of `value`
    fn create(&self, key: &str, len: u64, value: &[u8]) -> Result<(), StoreError>;

    /// Overwrite the element at `index`
    fn set_at(&self, key: &str, index: u64, value: &[u8]) -> Result<(), StoreError>;

    /// Read the element at `index`, `None` if there is none
    fn get_at(&self, key: &str, index: u64) -> Result<Option<Vec<u8>>, StoreError>;
}
