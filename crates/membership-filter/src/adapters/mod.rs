//! Adapters Layer (Driven Adapters)
//!
//! Bit backends that touch the outside world, plus `ListStore`
//! implementations for the remote backend.
//!
//! ## Adapters
//!
//! - `FileBitVector` - bits persisted to a compressed snapshot file
//! - `RemoteBitVector` - one remote list element per bit
//! - `InMemoryListStore` - process-local `ListStore`
//! - `RedisListStore` - `ListStore` over a connected Redis client (feature `redis`)

pub mod file;
pub mod list_store;
pub mod remote;

pub use file::FileBitVector;
pub use list_store::InMemoryListStore;
#[cfg(feature = "redis")]
pub use list_store::RedisListStore;
pub use remote::{remote_key, RemoteBitVector, BIT_SET, BIT_UNSET};
