//! Persisted-token store contract and an in-memory implementation.
//!
//! The client core only carries the configured [`CacheStorage`] through bootstrap; reads and
//! writes belong to the cache layer built on top of it.

// self
use crate::_prelude::*;

/// Error type produced by [`CacheStorage`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StorageError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Key/value storage backend for cached credentials, accounts, and metadata.
pub trait CacheStorage
where
	Self: Send + Sync,
{
	/// Fetches the value stored under `key`, if present.
	fn get_item(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

	/// Persists or replaces the value stored under `key`.
	fn set_item(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError>;

	/// Removes `key`, returning whether it existed.
	fn remove_item(&self, key: &str) -> Result<bool, StorageError>;

	/// Checks whether `key` is present.
	fn contains_key(&self, key: &str) -> Result<bool, StorageError>;

	/// Lists every stored key.
	fn keys(&self) -> Result<Vec<String>, StorageError>;

	/// Removes every entry.
	fn clear(&self) -> Result<(), StorageError>;
}

/// Thread-safe storage backend that keeps entries in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryCacheStorage(Arc<RwLock<BTreeMap<String, serde_json::Value>>>);
impl CacheStorage for MemoryCacheStorage {
	fn get_item(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
		Ok(self.0.read().get(key).cloned())
	}

	fn set_item(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
		self.0.write().insert(key.to_owned(), value);

		Ok(())
	}

	fn remove_item(&self, key: &str) -> Result<bool, StorageError> {
		Ok(self.0.write().remove(key).is_some())
	}

	fn contains_key(&self, key: &str) -> Result<bool, StorageError> {
		Ok(self.0.read().contains_key(key))
	}

	fn keys(&self) -> Result<Vec<String>, StorageError> {
		Ok(self.0.read().keys().cloned().collect())
	}

	fn clear(&self) -> Result<(), StorageError> {
		self.0.write().clear();

		Ok(())
	}
}
