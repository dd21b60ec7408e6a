use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with a static health payload while logging storage issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.pool_store().await {
        Some(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "pool store health check failed");
            }
        }
        None => warn!("pool store unavailable (degraded mode)"),
    }

    if state.is_degraded().await {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        config::AppConfig, dao::pool_store::memory::MemoryPoolStore, state::AppState,
    };

    use super::*;

    #[tokio::test]
    async fn healthy_with_any_installed_store() {
        // The in-memory backend counts as healthy: deliberately disabling
        // file persistence is not a storage failure.
        let state = AppState::new(AppConfig::default());
        state
            .install_pool_store(Arc::new(MemoryPoolStore::new()))
            .await;
        assert_eq!(health_status(&state).await.status, "ok");
    }

    #[tokio::test]
    async fn degraded_without_a_store() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(health_status(&state).await.status, "degraded");
    }
}
