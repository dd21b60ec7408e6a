use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::team::TeamSummary;

#[derive(Clone, Debug)]
/// Dispatched payload carried across the SSE channel.
pub struct ServerEvent {
    /// Optional SSE event name.
    pub event: Option<String>,
    /// Raw data field of the event.
    pub data: String,
}

impl ServerEvent {
    /// Build a plain event with an optional name and preformatted data.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Per-frame rotation update broadcast while a spin animates.
pub struct WheelFrameEvent {
    /// Current rotation of the wheel in degrees.
    pub angle_degrees: f64,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a spin begins.
pub struct SpinStartedEvent {
    /// Number of players on the wheel for this spin.
    pub players: usize,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a finished spin has been settled into an assignment.
pub struct PlayerAssignedEvent {
    /// The player read off the wheel.
    pub player: String,
    /// Identifier of the receiving team.
    pub team_id: Uuid,
    /// Index of the receiving team.
    pub team_index: usize,
    /// Players remaining in the pool afterwards.
    pub remaining: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast whenever the pool content changes outside of a settlement.
pub struct PoolChangedEvent {
    /// Players in wheel order.
    pub players: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the team set is recreated or cleared.
pub struct TeamsChangedEvent {
    /// Teams in order.
    pub teams: Vec<TeamSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the pool has been fully drained into teams.
pub struct RosterCompleteEvent {
    /// Final teams with every player assigned.
    pub teams: Vec<TeamSummary>,
}
