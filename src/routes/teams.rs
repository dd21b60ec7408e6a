use axum::{Json, Router, extract::State, routing::get, routing::put};
use validator::Validate;

use crate::{
    dto::team::{SetTeamCountRequest, TeamsSnapshot},
    error::AppError,
    services::team_service,
    state::SharedState,
};

/// Configure the team routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/teams", get(list_teams))
        .route("/teams/count", put(set_team_count))
}

#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses((status = 200, description = "Current teams", body = TeamsSnapshot))
)]
/// List the teams and their assigned players.
pub async fn list_teams(State(state): State<SharedState>) -> Json<TeamsSnapshot> {
    Json(team_service::list_teams(&state).await)
}

#[utoipa::path(
    put,
    path = "/teams/count",
    tag = "teams",
    request_body = SetTeamCountRequest,
    responses((status = 200, description = "Recreated teams", body = TeamsSnapshot))
)]
/// Set the number of teams, recreating all of them empty.
pub async fn set_team_count(
    State(state): State<SharedState>,
    Json(payload): Json<SetTeamCountRequest>,
) -> Result<Json<TeamsSnapshot>, AppError> {
    payload.validate()?;
    Ok(Json(team_service::set_team_count(&state, payload).await))
}
