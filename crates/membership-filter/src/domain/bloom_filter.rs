//! Bloom filter engine
//!
//! `BloomFilter<B>` owns a [`BitVector`] and maps keys onto it through the
//! hash family. The engine is backend-agnostic: the memory, file and remote
//! backends only differ in where bits live.
//!
//! No false negatives: `put` only ever sets bits and nothing clears them, so
//! every key put through any handle keeps all k of its bits set.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::bit_set::BitSet;
use super::bit_vector::BitVector;
use super::config::FilterConfig;
use super::hash_functions::hash_positions;
use super::parameters::calculate_fpr;
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Probabilistic membership filter over a bit backend
pub struct BloomFilter<B: BitVector> {
    bits: B,
    config: FilterConfig,
    /// Puts issued through this handle
    puts: u64,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<B: BitVector> BloomFilter<B> {
    /// Wrap a backend sized for `config`
    pub fn with_backend(config: FilterConfig, bits: B) -> Result<Self, FilterError> {
        config.validate()?;
        if bits.capacity() != config.capacity_bits {
            return Err(FilterError::InvalidParameters(format!(
                "backend holds {} bits, config expects {}",
                bits.capacity(),
                config.capacity_bits
            )));
        }

        debug!(
            capacity_bits = config.capacity_bits,
            hash_count = config.hash_count,
            "Bloom filter created"
        );

        Ok(Self {
            bits,
            config,
            puts: 0,
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Report activity to `metrics`
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        metrics.record_filter_created(self.config.capacity_bits, self.config.hash_count);
        self.metrics = metrics;
        self
    }

    /// Add a key
    ///
    /// Sets the key's k bits. Repeating a put leaves the bits unchanged.
    pub fn put(&mut self, key: &[u8]) -> Result<(), FilterError> {
        let start = Instant::now();
        for index in self.positions(key) {
            self.bits.set(index)?;
        }
        self.puts += 1;
        self.metrics.record_put(start.elapsed());
        Ok(())
    }

    /// Add a text key by its UTF-8 bytes
    pub fn put_str(&mut self, key: &str) -> Result<(), FilterError> {
        self.put(key.as_bytes())
    }

    /// Test whether a key may have been added
    ///
    /// Returns:
    /// - `false` if the key was definitely never put
    /// - `true` if it probably was (false positives are possible)
    ///
    /// Stops at the first unset bit.
    pub fn has(&self, key: &[u8]) -> Result<bool, FilterError> {
        let start = Instant::now();
        let mut found = true;
        for index in self.positions(key) {
            if !self.bits.is_set(index)? {
                found = false;
                break;
            }
        }
        self.metrics.record_lookup(start.elapsed(), found);
        Ok(found)
    }

    /// Test a text key by its UTF-8 bytes
    pub fn has_str(&self, key: &str) -> Result<bool, FilterError> {
        self.has(key.as_bytes())
    }

    /// Release the filter, letting the backend persist or detach
    pub fn close(self) -> Result<(), FilterError> {
        let capacity = self.config.capacity_bits;
        self.bits.close()?;
        self.metrics.record_filter_closed(capacity);
        Ok(())
    }

    /// Bit capacity (n)
    pub fn capacity_bits(&self) -> u64 {
        self.config.capacity_bits
    }

    /// Hash count (k)
    pub fn hash_count(&self) -> u32 {
        self.config.hash_count
    }

    /// Shape this filter was built with
    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Number of puts issued through this handle
    ///
    /// For a shared remote filter this excludes other writers.
    pub fn puts_recorded(&self) -> u64 {
        self.puts
    }

    /// False positive rate predicted from this handle's puts
    pub fn estimated_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.config.capacity_bits, self.puts, self.config.hash_count)
    }

    /// Underlying bit backend
    pub fn backend(&self) -> &B {
        &self.bits
    }

    fn positions(&self, key: &[u8]) -> Vec<u64> {
        hash_positions(key, self.config.hash_count, self.config.capacity_bits)
    }
}

impl BloomFilter<BitSet> {
    /// Create a process-local filter of `capacity_bits` bits and `hash_count` hashes
    pub fn memory(capacity_bits: u64, hash_count: u32) -> Result<Self, FilterError> {
        Self::memory_from_config(FilterConfig::new(capacity_bits, hash_count)?)
    }

    /// Create a process-local filter from a validated config
    pub fn memory_from_config(config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        let bits = BitSet::new(config.capacity_bits)?;
        Self::with_backend(config, bits)
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> u64 {
        self.bits.count_ones()
    }
}
