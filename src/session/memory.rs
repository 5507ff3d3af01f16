//! Thread-safe in-memory [`SessionStore`] implementation.

// self
use crate::{
	_prelude::*,
	session::{SessionError, SessionStore},
};

/// Session backend that keeps values in-process; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemorySession(Arc<RwLock<HashMap<String, String>>>);
impl MemorySession {
	/// Removes every stored value.
	pub fn clear(&self) {
		self.0.write().clear();
	}

	/// Number of stored values.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Whether the session is empty.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl SessionStore for MemorySession {
	fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
		Ok(self.0.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
		self.0.write().insert(key.to_owned(), value);

		Ok(())
	}
}
