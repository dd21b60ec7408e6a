use serde::Serialize;
use utoipa::ToSchema;

use crate::state::wheel::WheelSession;

/// Snapshot of the wheel as the frontend should draw it.
#[derive(Debug, Serialize, ToSchema)]
pub struct WheelSnapshot {
    /// Current rotation of the wheel in degrees.
    pub angle_degrees: f64,
    /// Whether a spin animation is in flight.
    pub spinning: bool,
    /// Players in slice order; slice `i` belongs to `players[i]`.
    pub players: Vec<String>,
    /// Slice colors; entry `i % palette.len()` colors slice `i`.
    pub palette: Vec<String>,
}

impl WheelSnapshot {
    /// Capture the renderable state of `session` using the configured palette.
    pub fn capture(session: &WheelSession, palette: &[String]) -> Self {
        Self {
            angle_degrees: session.spin().angle_degrees(),
            spinning: session.spin().is_spinning(),
            players: session.pool().names(),
            palette: palette.to_vec(),
        }
    }
}
