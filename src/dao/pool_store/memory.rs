use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::dao::{pool_store::PoolStore, storage::StorageResult};

/// In-memory pool store used by tests and as a stand-in backend when no
/// file path should be touched.
#[derive(Debug, Clone, Default)]
pub struct MemoryPoolStore {
    slot: Arc<Mutex<Option<Vec<String>>>>,
}

impl MemoryPoolStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `players`.
    pub fn seeded(players: Vec<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(players))),
        }
    }

    /// Peek at the stored pool without going through the trait.
    pub fn stored(&self) -> Option<Vec<String>> {
        self.slot.lock().expect("pool slot poisoned").clone()
    }
}

impl PoolStore for MemoryPoolStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<Option<Vec<String>>>> {
        let slot = self.slot.clone();
        Box::pin(async move { Ok(slot.lock().expect("pool slot poisoned").clone()) })
    }

    fn save(&self, players: Vec<String>) -> BoxFuture<'static, StorageResult<()>> {
        let slot = self.slot.clone();
        Box::pin(async move {
            *slot.lock().expect("pool slot poisoned") = Some(players);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
