//! # Membership Filter
//!
//! Bloom filters that answer "has this key possibly been seen?" with no false
//! negatives and a tunable false-positive rate, over three interchangeable
//! bit backends.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `BloomFilter<B>`: the engine, generic over its bit backend
//!   - `BitVector`: bit-addressable storage abstraction
//!   - `BitSet`: packed in-memory bits
//!   - `FilterConfig` / `FilterConfigBuilder`: validated filter shape
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: Driving port (`put` / `has` / `close`)
//!   - `ListStore`: Driven port, the remote ordered-list commands
//!
//! - **Adapters Layer** (`adapters/`): Backends with external effects
//!   - `FileBitVector`: zstd-compressed snapshot on disk
//!   - `RemoteBitVector`: one remote list element per bit
//!   - `InMemoryListStore`, `RedisListStore` (feature `redis`)
//!
//! ## Hashing
//!
//! A key is hashed once with SHA-256; MurmurHash3 seeded with `0..k` over the
//! digest yields the k bit positions, each reduced modulo the capacity. The
//! scheme is identical for every backend, so state moved between them answers
//! the same way.
//!
//! ## Invariants
//!
//! - No false negatives: a key that was put is always reported present
//! - Capacity and hash count never change after construction
//! - Every bit index lies in `[0, capacity)`
//!
//! ## Usage Example
//!
//! ```
//! use membership_filter::{BloomFilter, FilterError};
//!
//! let mut filter = BloomFilter::memory(64 << 20, 5)?;
//! filter.put_str("r1")?;
//!
//! assert!(filter.has_str("r1")?);
//! assert!(!filter.has_str("never added")?);
//! filter.close()?;
//! # Ok::<(), FilterError>(())
//! ```
//!
//! ## Shared remote filters
//!
//! ```
//! use std::sync::Arc;
//! use membership_filter::{BloomFilter, InMemoryListStore};
//!
//! let store = Arc::new(InMemoryListStore::new());
//! let mut a = BloomFilter::remote(store.clone(), 2000, 5).unwrap();
//! let b = BloomFilter::remote(store, 2000, 5).unwrap();
//!
//! a.put_str("seen").unwrap();
//! assert!(b.has_str("seen").unwrap());
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;

// Re-exports for convenience
pub use adapters::{FileBitVector, InMemoryListStore, RemoteBitVector};
#[cfg(feature = "redis")]
pub use adapters::RedisListStore;
pub use domain::{
    BitSet, BitVector, BloomFilter, FilterConfig, FilterConfigBuilder, PersistenceConfig,
};
pub use error::{FilterError, StorageError, StoreError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{ListStore, MembershipFilter};

/// Filter kept in process memory
pub type MemoryBloomFilter = BloomFilter<BitSet>;

/// Filter persisted to a file on close
pub type FileBloomFilter = BloomFilter<FileBitVector>;

/// Filter whose bits live in a shared list store
pub type RemoteBloomFilter<S> = BloomFilter<RemoteBitVector<S>>;
