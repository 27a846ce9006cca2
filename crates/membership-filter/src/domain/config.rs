//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use membership_filter::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .capacity_bits(1 << 20)
//!     .hash_count(5)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.hash_count, 5);
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::calculate_optimal_parameters;
use crate::error::FilterError;

/// Default bit capacity (64 Mi bits, 8 MiB of words)
pub const DEFAULT_CAPACITY_BITS: u64 = 64 << 20;

/// Default number of hash functions
pub const DEFAULT_HASH_COUNT: u32 = 5;

/// Default zstd level for persisted snapshots
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Shape of a Bloom filter: `n` bits probed by `k` hashes
///
/// Both values are fixed for the lifetime of a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Bit capacity (n)
    pub capacity_bits: u64,
    /// Hash count (k)
    pub hash_count: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity_bits: DEFAULT_CAPACITY_BITS,
            hash_count: DEFAULT_HASH_COUNT,
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(capacity_bits: u64, hash_count: u32) -> Result<Self, FilterError> {
        let config = Self {
            capacity_bits,
            hash_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject shapes that cannot hold a single key
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.capacity_bits == 0 {
            return Err(FilterError::InvalidParameters(
                "capacity_bits cannot be 0".to_string(),
            ));
        }

        if self.hash_count == 0 {
            return Err(FilterError::InvalidParameters(
                "hash_count cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Options for the file backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// zstd compression level (1-22)
    pub compression_level: i32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl PersistenceConfig {
    /// Check the compression level is one zstd accepts
    pub fn validate(&self) -> Result<(), FilterError> {
        if !(1..=22).contains(&self.compression_level) {
            return Err(FilterError::InvalidParameters(format!(
                "compression_level must be between 1 and 22, got {}",
                self.compression_level
            )));
        }
        Ok(())
    }

    /// Builder-style method to set the compression level
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }
}

/// Builder for [`FilterConfig`]
///
/// Either set the shape directly or size it from an expected load with
/// [`for_expected_elements`](Self::for_expected_elements). Explicit values
/// win over derived ones.
#[derive(Default)]
pub struct FilterConfigBuilder {
    capacity_bits: Option<u64>,
    hash_count: Option<u32>,
    expected_elements: Option<u64>,
    target_fpr: Option<f64>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bit capacity (n)
    pub fn capacity_bits(mut self, bits: u64) -> Self {
        self.capacity_bits = Some(bits);
        self
    }

    /// Set the hash count (k)
    pub fn hash_count(mut self, k: u32) -> Self {
        self.hash_count = Some(k);
        self
    }

    /// Size the filter for `elements` keys at `target_fpr`
    pub fn for_expected_elements(mut self, elements: u64, target_fpr: f64) -> Self {
        self.expected_elements = Some(elements);
        self.target_fpr = Some(target_fpr);
        self
    }

    /// Build the config, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let mut config = FilterConfig::default();

        if let (Some(elements), Some(fpr)) = (self.expected_elements, self.target_fpr) {
            if !(fpr > 0.0 && fpr < 1.0) {
                return Err(FilterError::InvalidParameters(format!(
                    "target_fpr must be in (0, 1), got {}",
                    fpr
                )));
            }
            let params = calculate_optimal_parameters(elements, fpr);
            config.capacity_bits = params.capacity_bits;
            config.hash_count = params.hash_count;
        }

        if let Some(bits) = self.capacity_bits {
            config.capacity_bits = bits;
        }
        if let Some(k) = self.hash_count {
            config.hash_count = k;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FilterConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.capacity_bits, 64 << 20);
        assert_eq!(config.hash_count, 5);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = FilterConfig::new(0, 5);
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_zero_hash_count_rejected() {
        let result = FilterConfig::new(1024, 0);
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = FilterConfigBuilder::new().hash_count(3).build().unwrap();

        assert_eq!(config.capacity_bits, DEFAULT_CAPACITY_BITS);
        assert_eq!(config.hash_count, 3);
    }

    #[test]
    fn test_builder_sizes_from_expected_load() {
        let config = FilterConfigBuilder::new()
            .for_expected_elements(100, 0.01)
            .build()
            .unwrap();

        assert!((900..=1000).contains(&config.capacity_bits));
        assert!((6..=8).contains(&config.hash_count));
    }

    #[test]
    fn test_explicit_values_override_derived() {
        let config = FilterConfigBuilder::new()
            .for_expected_elements(100, 0.01)
            .hash_count(2)
            .build()
            .unwrap();

        assert_eq!(config.hash_count, 2);
    }

    #[test]
    fn test_builder_rejects_invalid_fpr() {
        let result = FilterConfigBuilder::new()
            .for_expected_elements(100, 1.5)
            .build();

        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_persistence_level_bounds() {
        assert!(PersistenceConfig::default().validate().is_ok());
        assert!(PersistenceConfig::default()
            .with_compression_level(0)
            .validate()
            .is_err());
        assert!(PersistenceConfig::default()
            .with_compression_level(23)
            .validate()
            .is_err());
    }
}
