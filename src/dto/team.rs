use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::state::wheel::Team;

/// Payload used to change the number of teams.
///
/// Changing the count recreates every team empty and resets the
/// round-robin cursor.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetTeamCountRequest {
    /// Desired number of teams.
    #[validate(range(min = 1, max = 64))]
    pub count: u64,
}

/// A team and its assigned players.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamSummary {
    /// Stable identifier of the team.
    pub id: Uuid,
    /// Display name of the team.
    pub name: String,
    /// Players assigned so far, in assignment order.
    pub members: Vec<String>,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            members: team.members.clone(),
        }
    }
}

/// Snapshot of all teams in order.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamsSnapshot {
    /// Teams in creation order.
    pub teams: Vec<TeamSummary>,
}
