mod sse;
/// Timed-rotation engine and winner selection.
pub mod spin;
/// Pool, teams, and the combined wheel session.
pub mod wheel;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::pool_store::PoolStore, state::wheel::WheelSession};

pub use self::sse::SseHub;

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Capacity of the SSE broadcast channel. Spin frames arrive every ~16 ms,
/// so slow subscribers are allowed to lag a few frames behind before the
/// channel starts skipping.
const SSE_CAPACITY: usize = 128;

/// Central application state: the wheel session, the event hub, and the
/// persistence backend slot.
pub struct AppState {
    config: AppConfig,
    wheel: RwLock<WheelSession>,
    pool_store: RwLock<Option<Arc<dyn PoolStore>>>,
    events: SseHub,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a pool store is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        let wheel = WheelSession::new(config.default_team_count);
        Arc::new(Self {
            config,
            wheel: RwLock::new(wheel),
            pool_store: RwLock::new(None),
            events: SseHub::new(SSE_CAPACITY),
            degraded: degraded_tx,
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The wheel session lock guarding pool, teams, and spin engine.
    pub fn wheel(&self) -> &RwLock<WheelSession> {
        &self.wheel
    }

    /// Obtain a handle to the current pool store, if one is installed.
    pub async fn pool_store(&self) -> Option<Arc<dyn PoolStore>> {
        let guard = self.pool_store.read().await;
        guard.as_ref().cloned()
    }

    /// Install a pool store implementation and leave degraded mode.
    pub async fn install_pool_store(&self, store: Arc<dyn PoolStore>) {
        {
            let mut guard = self.pool_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current pool store and enter degraded mode.
    pub async fn clear_pool_store(&self) {
        {
            let mut guard = self.pool_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag (no persistence backend available).
    pub async fn is_degraded(&self) -> bool {
        let guard = self.pool_store.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn events(&self) -> &SseHub {
        &self.events
    }

    /// Update and broadcast the degraded flag when the value changes.
    async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}
