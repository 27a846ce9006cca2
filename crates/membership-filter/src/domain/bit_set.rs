//! In-memory packed bit set
//!
//! Bits are packed LSB-first into 64-bit words: bit `i` lives in word
//! `i / 64` at offset `i % 64`. The file backend persists exactly this word
//! array, so the layout must not change.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use super::bit_vector::{check_bounds, BitVector};
use crate::error::FilterError;

/// Bits per storage word
pub const WORD_BITS: u64 = u64::BITS as u64;

/// Number of words needed to hold `capacity` bits
pub fn words_for(capacity: u64) -> u64 {
    capacity.div_ceil(WORD_BITS)
}

/// Process-local bit vector backed by packed words
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSet {
    bits: BitVec<u64, Lsb0>,
    capacity: u64,
}

/// Serializable form of a [`BitSet`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitSetSnapshot {
    /// Logical number of bits
    pub capacity_bits: u64,
    /// Packed words, `words_for(capacity_bits)` long
    pub words: Vec<u64>,
}

impl BitSet {
    /// Create an all-zero bit set of `capacity` bits
    pub fn new(capacity: u64) -> Result<Self, FilterError> {
        let len = addressable_len(capacity)?;
        Ok(Self {
            bits: BitVec::repeat(false, len),
            capacity,
        })
    }

    /// Rebuild a bit set from its packed words
    ///
    /// Returns `None` if the word count does not match `capacity`. Padding
    /// bits past `capacity` are cleared.
    pub fn from_words(capacity: u64, words: Vec<u64>) -> Option<Self> {
        let len = addressable_len(capacity).ok()?;
        if words.len() as u64 != words_for(capacity) {
            return None;
        }

        let mut bits = BitVec::<u64, Lsb0>::from_vec(words);
        bits.truncate(len);
        bits.set_uninitialized(false);
        Some(Self { bits, capacity })
    }

    /// Packed words, padding bits zero
    pub fn words(&self) -> &[u64] {
        self.bits.as_raw_slice()
    }

    /// Capture the words for persistence
    pub fn snapshot(&self) -> BitSetSnapshot {
        BitSetSnapshot {
            capacity_bits: self.capacity,
            words: self.words().to_vec(),
        }
    }

    /// Clear the bit at `index`
    ///
    /// Not used by the filter, which never removes elements.
    pub fn unset(&mut self, index: u64) -> Result<(), FilterError> {
        check_bounds(index, self.capacity)?;
        self.bits.set(index as usize, false);
        Ok(())
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> u64 {
        self.bits.count_ones() as u64
    }
}

impl BitVector for BitSet {
    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn set(&mut self, index: u64) -> Result<(), FilterError> {
        check_bounds(index, self.capacity)?;
        self.bits.set(index as usize, true);
        Ok(())
    }

    fn is_set(&self, index: u64) -> Result<bool, FilterError> {
        check_bounds(index, self.capacity)?;
        Ok(self.bits[index as usize])
    }

    fn close(self) -> Result<(), FilterError> {
        Ok(())
    }
}

fn addressable_len(capacity: u64) -> Result<usize, FilterError> {
    if capacity == 0 {
        return Err(FilterError::InvalidParameters(
            "capacity_bits cannot be 0".to_string(),
        ));
    }
    usize::try_from(capacity).map_err(|_| {
        FilterError::InvalidParameters(format!(
            "capacity_bits {} exceeds addressable memory",
            capacity
        ))
    })
}
