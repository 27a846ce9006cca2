//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - The Bloom filter engine
//! - The hash family
//! - The `BitVector` storage abstraction and its in-memory implementation
//! - Sizing and configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod bit_set;
pub mod bit_vector;
pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use bit_set::{BitSet, BitSetSnapshot, WORD_BITS};
pub use bit_vector::BitVector;
pub use bloom_filter::BloomFilter;
pub use config::{FilterConfig, FilterConfigBuilder, PersistenceConfig};
pub use hash_functions::{hash_data, hash_positions};
pub use parameters::{calculate_fpr, calculate_optimal_parameters, FilterParams};
