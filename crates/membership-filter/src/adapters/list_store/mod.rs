//! List Store Adapters
//!
//! Implementations of the `ListStore` port.

mod memory;
#[cfg(feature = "redis")]
mod redis_store;

pub use memory::InMemoryListStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisListStore;
