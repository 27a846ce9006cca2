//! Remote list-backed bit vector
//!
//! Stores one list element per bit in a shared [`ListStore`]. The list key is
//! derived from `(n, k)` only, so filters with identical parameters share
//! remote state: several processes can build one filter together, and the
//! bits outlive every filter handle.
//!
//! Construction resets the list when its length differs from `n`. That
//! check-then-recreate is not guarded by any lock: two processes
//! constructing concurrently can both reset the list and wipe bits a third
//! writer just set. Serialize construction externally when sharing a filter.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::bit_vector::check_bounds;
use crate::domain::{BitVector, BloomFilter, FilterConfig};
use crate::error::{FilterError, StoreError};
use crate::ports::ListStore;

/// Element value marking a set bit
pub const BIT_SET: &[u8] = b"1";

/// Element value marking an unset bit
pub const BIT_UNSET: &[u8] = b"0";

/// List key shared by every filter with these parameters
pub fn remote_key(capacity_bits: u64, hash_count: u32) -> String {
    format!("_bloomfilter:n{}:k{}", capacity_bits, hash_count)
}

/// Bit vector living in a remote ordered list
pub struct RemoteBitVector<S: ListStore> {
    store: Arc<S>,
    key: String,
    capacity: u64,
}

impl<S: ListStore> RemoteBitVector<S> {
    /// Attach to the list for `(capacity, hash_count)`, resetting it if its
    /// length is not `capacity`
    pub fn attach(store: Arc<S>, capacity: u64, hash_count: u32) -> Result<Self, FilterError> {
        FilterConfig::new(capacity, hash_count)?;
        let key = remote_key(capacity, hash_count);

        let len = store.length(&key)?;
        if len != capacity {
            warn!(
                key = %key,
                found = len,
                expected = capacity,
                "Remote bit list length mismatch, reinitializing"
            );
            store.delete(&key)?;
            store.create(&key, capacity, BIT_UNSET)?;
        } else {
            debug!(key = %key, capacity_bits = capacity, "Attached to existing remote bit list");
        }

        Ok(Self {
            store,
            key,
            capacity,
        })
    }

    /// Remote list key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Shared store handle
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: ListStore> BitVector for RemoteBitVector<S> {
    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn set(&mut self, index: u64) -> Result<(), FilterError> {
        check_bounds(index, self.capacity)?;
        self.store.set_at(&self.key, index, BIT_SET)?;
        Ok(())
    }

    fn is_set(&self, index: u64) -> Result<bool, FilterError> {
        check_bounds(index, self.capacity)?;
        match self.store.get_at(&self.key, index)? {
            Some(value) => Ok(value == BIT_SET),
            None => Err(StoreError::MissingElement {
                key: self.key.clone(),
                index,
            }
            .into()),
        }
    }

    /// Drop the local handle; remote bits are left in place
    fn close(self) -> Result<(), FilterError> {
        debug!(key = %self.key, "Detached from remote bit list");
        Ok(())
    }
}

impl<S: ListStore> BloomFilter<RemoteBitVector<S>> {
    /// Create a filter whose bits live in `store`
    ///
    /// Filters built with the same `(capacity_bits, hash_count)` against the
    /// same store share their bits.
    pub fn remote(store: Arc<S>, capacity_bits: u64, hash_count: u32) -> Result<Self, FilterError> {
        Self::remote_from_config(store, FilterConfig::new(capacity_bits, hash_count)?)
    }

    /// Create a remote filter from a validated config
    pub fn remote_from_config(store: Arc<S>, config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        let bits = RemoteBitVector::attach(store, config.capacity_bits, config.hash_count)?;
        Self::with_backend(config, bits)
    }
}
