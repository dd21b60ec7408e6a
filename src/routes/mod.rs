use axum::Router;

use crate::state::SharedState;

/// Swagger UI and OpenAPI document routes.
pub mod docs;
/// Health check route.
pub mod health;
/// Player pool routes.
pub mod players;
/// Server-sent events route.
pub mod sse;
/// Team routes.
pub mod teams;
/// Wheel snapshot and spin routes.
pub mod wheel;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(players::router())
        .merge(teams::router())
        .merge(wheel::router())
        .merge(sse::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
