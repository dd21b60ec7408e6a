use std::{io::ErrorKind, path::PathBuf, time::SystemTime};

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::fs;
use tracing::warn;

use crate::dao::{
    pool_store::PoolStore,
    storage::{StorageError, StorageResult},
};

/// On-disk representation of the persisted pool.
#[derive(Debug, Serialize, Deserialize)]
struct PoolDocument {
    /// RFC 3339 timestamp of the last save, for debugging only.
    saved_at: String,
    players: Vec<String>,
}

/// Pool store backed by a single JSON file.
///
/// The file plays the role of the browser's key-value store in the
/// original: a best-effort cache of the name list, not a durable database.
#[derive(Debug, Clone)]
pub struct FilePoolStore {
    path: PathBuf,
}

impl FilePoolStore {
    /// Create a store reading and writing `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PoolStore for FilePoolStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<Option<Vec<String>>>> {
        let path = self.path.clone();
        Box::pin(async move {
            let contents = match fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => {
                    return Err(StorageError::unavailable(
                        format!("reading pool file `{}`", path.display()),
                        err,
                    ));
                }
            };

            match serde_json::from_str::<PoolDocument>(&contents) {
                Ok(document) if !document.players.is_empty() => Ok(Some(document.players)),
                Ok(_) => Ok(None),
                Err(err) => {
                    // Malformed data is replaced with the default roster by
                    // the caller, never surfaced to the user.
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "pool file is malformed; treating as absent"
                    );
                    Ok(None)
                }
            }
        })
    }

    fn save(&self, players: Vec<String>) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        Box::pin(async move {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await.map_err(|err| {
                    StorageError::unavailable(
                        format!("creating pool directory `{}`", parent.display()),
                        err,
                    )
                })?;
            }

            let document = PoolDocument {
                saved_at: format_system_time(SystemTime::now()),
                players,
            };
            let contents = serde_json::to_string_pretty(&document).map_err(|err| {
                StorageError::unavailable("serializing pool document".into(), err)
            })?;

            fs::write(&path, contents).await.map_err(|err| {
                StorageError::unavailable(
                    format!("writing pool file `{}`", path.display()),
                    err,
                )
            })
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        Box::pin(async move {
            let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
                return Ok(());
            };
            fs::create_dir_all(parent).await.map_err(|err| {
                StorageError::unavailable(
                    format!("pool directory `{}` is not writable", parent.display()),
                    err,
                )
            })
        })
    }
}

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
