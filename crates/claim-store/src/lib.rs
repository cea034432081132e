//! Claim persistence.
//!
//! The whole claim collection lives under a single string key as a JSON
//! array, rewritten on every change:
//!
//! ```json
//! [{"owner": "-4294967295", "bounds": {"minX": 0, "maxX": 10, "minZ": 0, "maxZ": 10}}]
//! ```
//!
//! [`ClaimRegistry`] keeps the decoded collection in memory and writes it
//! back through a [`KvStore`] whenever a claim is replaced. Two stores are
//! provided: [`LmdbStore`] for durable worlds and [`MemoryStore`] for tests
//! and throwaway sessions.
//!
//! # Usage
//!
//! ```ignore
//! use claim_store::{ClaimRegistry, LmdbStore, DEFAULT_CLAIMS_KEY};
//!
//! let store = LmdbStore::open("data/claims")?;
//! let mut registry = ClaimRegistry::load(Box::new(store), DEFAULT_CLAIMS_KEY)?;
//! registry.replace(claim)?;
//! ```

mod db;
mod error;
mod memory;
mod registry;

pub use db::LmdbStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use registry::{ClaimRegistry, DEFAULT_CLAIMS_KEY};

/// A string key-value store scoped to one world save.
///
/// Values written with [`KvStore::set`] must survive process restarts for
/// durable implementations.
pub trait KvStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
