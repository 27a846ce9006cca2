//! Inbound Port (Driving Port)
//!
//! The operations every filter backend offers.

use crate::domain::{BitVector, BloomFilter};
use crate::error::FilterError;

/// Membership API shared by the memory, file and remote filters
///
/// Lets callers be generic over the backend:
///
/// ```
/// use membership_filter::{BloomFilter, FilterError, MembershipFilter};
///
/// fn load_seen<F: MembershipFilter>(filter: &mut F, keys: &[&str]) -> Result<(), FilterError> {
///     for key in keys {
///         filter.put_str(key)?;
///     }
///     Ok(())
/// }
///
/// let mut filter = BloomFilter::memory(1 << 16, 5)?;
/// load_seen(&mut filter, &["a", "b"])?;
/// assert!(filter.has_str("a")?);
/// # Ok::<(), FilterError>(())
/// ```
pub trait MembershipFilter {
    /// Add a key
    fn put(&mut self, key: &[u8]) -> Result<(), FilterError>;

    /// Add a text key
    fn put_str(&mut self, key: &str) -> Result<(), FilterError> {
        self.put(key.as_bytes())
    }

    /// Test whether a key may have been added
    fn has(&self, key: &[u8]) -> Result<bool, FilterError>;

    /// Test a text key
    fn has_str(&self, key: &str) -> Result<bool, FilterError> {
        self.has(key.as_bytes())
    }

    /// Release the filter
    fn close(self) -> Result<(), FilterError>
    where
        Self: Sized;
}

impl<B: BitVector> MembershipFilter for BloomFilter<B> {
    fn put(&mut self, key: &[u8]) -> Result<(), FilterError> {
        BloomFilter::put(self, key)
    }

    fn has(&self, key: &[u8]) -> Result<bool, FilterError> {
        BloomFilter::has(self, key)
    }

    fn close(self) -> Result<(), FilterError> {
        BloomFilter::close(self)
    }
}
