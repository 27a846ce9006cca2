//! Bit-addressable storage abstraction
//!
//! The Bloom filter engine only needs to set and test bits. Each backend
//! (process memory, durable file, remote list) implements [`BitVector`].

use crate::error::FilterError;

/// Storage for `capacity()` addressable bits
///
/// Indices handed to `set`/`is_set` must lie in `[0, capacity)`. A violation
/// is an internal invariant breach and is reported as
/// [`FilterError::IndexOutOfBounds`] without touching storage.
pub trait BitVector {
    /// Number of addressable bits
    fn capacity(&self) -> u64;

    /// Mark the bit at `index`. Idempotent.
    fn set(&mut self, index: u64) -> Result<(), FilterError>;

    /// Test the bit at `index`
    fn is_set(&self, index: u64) -> Result<bool, FilterError>;

    /// Release the backend, persisting state where the backend is durable
    fn close(self) -> Result<(), FilterError>
    where
        Self: Sized;
}

/// Reject indices outside `[0, capacity)`
#[inline]
pub fn check_bounds(index: u64, capacity: u64) -> Result<(), FilterError> {
    if index >= capacity {
        return Err(FilterError::IndexOutOfBounds { index, capacity });
    }
    Ok(())
}
