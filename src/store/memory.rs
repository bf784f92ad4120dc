//! In-memory model store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::{LoadFailure, Result};
use crate::store::ModelStore;

/// Keeps the artifact bytes in process memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryModelStore {
    bytes: Arc<Mutex<Option<Vec<u8>>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryModelStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with `bytes`.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        let store = Self::new();
        *store.bytes.lock() = Some(bytes);
        store
    }

    /// Current artifact bytes, if any.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes.lock().clone()
    }

    pub fn clear(&self) {
        *self.bytes.lock() = None;
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ModelStore for MemoryModelStore {
    fn read_bytes(&self) -> std::result::Result<Vec<u8>, LoadFailure> {
        self.bytes.lock().clone().ok_or(LoadFailure::Missing)
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        *self.bytes.lock() = Some(bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::artifact::tests::sample_model;

    #[test]
    fn test_memory_store() {
        let store = MemoryModelStore::new();
        assert!(matches!(store.load(), Err(LoadFailure::Missing)));

        let model = sample_model();
        store.save(&model).unwrap();
        assert_eq!(store.load().unwrap(), model);
        assert_eq!(store.writes(), 1);

        let shared = store.clone();
        shared.clear();
        assert!(store.bytes().is_none());
    }

    #[test]
    fn test_with_bytes() {
        let store = MemoryModelStore::with_bytes(b"SLCM".to_vec());

        assert!(matches!(store.load(), Err(LoadFailure::Corrupt(_))));
        assert_eq!(store.writes(), 0);
    }
}
