use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
///
/// "degraded" means no pool store is installed: the wheel keeps running in
/// memory, but the roster is no longer written anywhere.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// The backend and its pool store are fully operational.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// The backend is up but has lost its pool store.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
