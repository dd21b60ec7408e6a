/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Pool mutations, persistence, and startup loading.
pub mod pool_service;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Spin lifecycle: start requests, the animation driver, auto-continue.
pub mod spin_service;
/// Team count management and snapshots.
pub mod team_service;
