/// JSON-file backed store.
pub mod file;
/// In-memory store for tests.
pub mod memory;

use futures::future::BoxFuture;

use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for the player pool.
///
/// `load` distinguishes "no usable data" (`Ok(None)`, covering both a
/// missing and a malformed document) from backend unavailability; callers
/// fall back to [`default_pool`] on `None`.
pub trait PoolStore: Send + Sync {
    /// Read the persisted pool, if any well-formed one exists.
    fn load(&self) -> BoxFuture<'static, StorageResult<Option<Vec<String>>>>;
    /// Replace the persisted pool with `players`.
    fn save(&self, players: Vec<String>) -> BoxFuture<'static, StorageResult<()>>;
    /// Verify the backend is reachable and writable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Roster used when the store holds no usable pool.
pub fn default_pool() -> Vec<String> {
    [
        "Alice", "Bob", "Charlie", "Dana", "Erik", "Fiona", "Grace", "Hugo",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
