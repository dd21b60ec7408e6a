use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the wheel backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::players::list_players,
        crate::routes::players::add_player,
        crate::routes::players::remove_player,
        crate::routes::players::shuffle_players,
        crate::routes::players::clear_players,
        crate::routes::teams::list_teams,
        crate::routes::teams::set_team_count,
        crate::routes::wheel::wheel_snapshot,
        crate::routes::wheel::spin,
        crate::routes::sse::event_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::player::AddPlayerRequest,
            crate::dto::player::PoolSnapshot,
            crate::dto::team::SetTeamCountRequest,
            crate::dto::team::TeamSummary,
            crate::dto::team::TeamsSnapshot,
            crate::dto::wheel::WheelSnapshot,
            crate::dto::sse::WheelFrameEvent,
            crate::dto::sse::SpinStartedEvent,
            crate::dto::sse::PlayerAssignedEvent,
            crate::dto::sse::PoolChangedEvent,
            crate::dto::sse::TeamsChangedEvent,
            crate::dto::sse::RosterCompleteEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "players", description = "Player pool management"),
        (name = "teams", description = "Team configuration and rosters"),
        (name = "wheel", description = "Spin requests and wheel snapshots"),
        (name = "sse", description = "Server-sent events stream"),
    )
)]
pub struct ApiDoc;
