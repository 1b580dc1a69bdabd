//! # Storage Module
//!
//! Key-value backing store abstraction used by every persisted store in the
//! domain layer. Each store serializes its entire state to JSON under a fixed,
//! store-specific key; the backing store only ever sees opaque strings.
//!
//! Two implementations are provided:
//!
//! - [`FileKeyValueStore`]: durable, one file per key under a base directory
//! - [`MemoryKeyValueStore`]: in-memory fake for test isolation

pub mod file_store;
pub mod memory;
pub mod traits;

pub use file_store::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
