use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use validator::Validate;

use crate::{
    dto::player::{AddPlayerRequest, PoolSnapshot},
    error::AppError,
    services::pool_service,
    state::SharedState,
};

/// Configure the player pool routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route(
            "/players",
            get(list_players).post(add_player).delete(clear_players),
        )
        .route("/players/shuffle", post(shuffle_players))
        .route("/players/{name}", delete(remove_player))
}

#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    responses((status = 200, description = "Current pool", body = PoolSnapshot))
)]
/// List the players still waiting for a team, in wheel order.
pub async fn list_players(State(state): State<SharedState>) -> Json<PoolSnapshot> {
    let wheel = state.wheel().read().await;
    Json(PoolSnapshot {
        players: wheel.pool().names(),
    })
}

#[utoipa::path(
    post,
    path = "/players",
    tag = "players",
    request_body = AddPlayerRequest,
    responses((status = 200, description = "Pool after the add", body = PoolSnapshot))
)]
/// Add a player to the pool; empty and duplicate names are ignored.
pub async fn add_player(
    State(state): State<SharedState>,
    Json(payload): Json<AddPlayerRequest>,
) -> Result<Json<PoolSnapshot>, AppError> {
    payload.validate()?;
    Ok(Json(pool_service::add_player(&state, payload).await))
}

#[utoipa::path(
    delete,
    path = "/players/{name}",
    tag = "players",
    params(("name" = String, Path, description = "Exact name of the player to remove")),
    responses((status = 200, description = "Pool after the removal", body = PoolSnapshot))
)]
/// Remove a player from the pool; absent names are ignored.
pub async fn remove_player(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Json<PoolSnapshot> {
    Json(pool_service::remove_player(&state, &name).await)
}

#[utoipa::path(
    post,
    path = "/players/shuffle",
    tag = "players",
    responses((status = 200, description = "Pool in its new order", body = PoolSnapshot))
)]
/// Shuffle the pool into a uniformly random order.
pub async fn shuffle_players(State(state): State<SharedState>) -> Json<PoolSnapshot> {
    Json(pool_service::shuffle_pool(&state).await)
}

#[utoipa::path(
    delete,
    path = "/players",
    tag = "players",
    responses((status = 204, description = "Pool and team assignments cleared"))
)]
/// Clear the pool and every team's member list.
pub async fn clear_players(State(state): State<SharedState>) -> StatusCode {
    pool_service::clear_pool(&state).await;
    StatusCode::NO_CONTENT
}
