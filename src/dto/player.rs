use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::validation::validate_player_name;

/// Payload used to add a player to the pool.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddPlayerRequest {
    /// Name of the player to add. Whitespace is trimmed; an empty or
    /// duplicate name leaves the pool untouched.
    #[validate(custom(function = validate_player_name))]
    pub name: String,
}

/// Snapshot of the candidate pool in wheel order.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolSnapshot {
    /// Players still waiting for a team, in slice order.
    pub players: Vec<String>,
}
