use axum::{Json, Router, extract::State, routing::get, routing::post};

use crate::{dto::wheel::WheelSnapshot, services::spin_service, state::SharedState};

/// Configure the wheel routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/wheel", get(wheel_snapshot))
        .route("/spin", post(spin))
}

#[utoipa::path(
    get,
    path = "/wheel",
    tag = "wheel",
    responses((status = 200, description = "Current wheel state", body = WheelSnapshot))
)]
/// Snapshot of the wheel: rotation, spinning flag, and slice order.
pub async fn wheel_snapshot(State(state): State<SharedState>) -> Json<WheelSnapshot> {
    let wheel = state.wheel().read().await;
    Json(WheelSnapshot::capture(&wheel, &state.config().palette))
}

#[utoipa::path(
    post,
    path = "/spin",
    tag = "wheel",
    responses((status = 200, description = "Wheel state after the request", body = WheelSnapshot))
)]
/// Request a spin; ignored while one is in flight or the pool is empty.
pub async fn spin(State(state): State<SharedState>) -> Json<WheelSnapshot> {
    Json(spin_service::request_spin(&state).await)
}
