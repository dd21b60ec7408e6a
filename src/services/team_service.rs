use tracing::info;

use crate::{
    dto::{
        sse::TeamsChangedEvent,
        team::{SetTeamCountRequest, TeamSummary, TeamsSnapshot},
    },
    services::sse_service,
    state::SharedState,
};

/// Snapshot of the current teams in order.
pub async fn list_teams(state: &SharedState) -> TeamsSnapshot {
    let wheel = state.wheel().read().await;
    TeamsSnapshot {
        teams: wheel.teams().teams().iter().map(TeamSummary::from).collect(),
    }
}

/// Recreate the team set with the requested count.
///
/// All teams come back empty and the round-robin cursor resets; a zero
/// count is ignored by the core guard (the DTO already rejects it at the
/// boundary).
pub async fn set_team_count(state: &SharedState, request: SetTeamCountRequest) -> TeamsSnapshot {
    let (changed, teams) = {
        let mut wheel = state.wheel().write().await;
        let changed = wheel.teams_mut().set_count(request.count as usize);
        (
            changed,
            wheel
                .teams()
                .teams()
                .iter()
                .map(TeamSummary::from)
                .collect::<Vec<_>>(),
        )
    };

    if changed {
        info!(count = teams.len(), "team set recreated");
        sse_service::broadcast_json(
            state.events(),
            "teams_changed",
            &TeamsChangedEvent {
                teams: teams.clone(),
            },
        );
    }

    TeamsSnapshot { teams }
}

#[cfg(test)]
mod tests {
    use crate::{config::AppConfig, state::AppState};

    use super::*;

    #[tokio::test]
    async fn set_count_recreates_and_resets() {
        let state = AppState::new(AppConfig::default());
        {
            let mut wheel = state.wheel().write().await;
            wheel.teams_mut().assign("Alice".into());
        }

        let snapshot = set_team_count(&state, SetTeamCountRequest { count: 3 }).await;
        assert_eq!(snapshot.teams.len(), 3);
        assert!(snapshot.teams.iter().all(|team| team.members.is_empty()));

        let wheel = state.wheel().read().await;
        assert_eq!(wheel.teams().cursor(), 0);
    }

    #[tokio::test]
    async fn default_team_count_comes_from_config() {
        let state = AppState::new(AppConfig::default());
        let snapshot = list_teams(&state).await;
        assert_eq!(snapshot.teams.len(), 2);
        assert_eq!(snapshot.teams[0].name, "Team 1");
        assert_eq!(snapshot.teams[1].name, "Team 2");
    }
}
