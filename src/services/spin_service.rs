use std::time::{Duration, Instant};

use tokio::time::{MissedTickBehavior, interval, sleep};
use tracing::info;

use crate::{
    dto::{
        sse::{PlayerAssignedEvent, RosterCompleteEvent, SpinStartedEvent, WheelFrameEvent},
        team::TeamSummary,
        wheel::WheelSnapshot,
    },
    services::{pool_service, sse_service},
    state::{SharedState, spin::SpinTick, wheel::Assignment},
};

/// How often the driver advances the animation. Progress is computed from
/// the wall clock, so this only bounds the frame rate, never the duration.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Request a spin.
///
/// A request while the pool is empty or a spin is already in flight is a
/// silent no-op; either way the caller gets the current wheel snapshot, so
/// hammering the spin button cannot corrupt state.
pub async fn request_spin(state: &SharedState) -> WheelSnapshot {
    let (started, snapshot) = {
        let mut wheel = state.wheel().write().await;
        let mut rng = rand::rng();
        let started = wheel.start_spin(Instant::now(), &state.config().spin, &mut rng);
        (
            started,
            WheelSnapshot::capture(&wheel, &state.config().palette),
        )
    };

    if started {
        info!(players = snapshot.players.len(), "spin started");
        sse_service::broadcast_json(
            state.events(),
            "spin_started",
            &SpinStartedEvent {
                players: snapshot.players.len(),
            },
        );
        tokio::spawn(drive(state.clone()));
    }

    snapshot
}

/// Animation driver: ticks the in-flight spin to completion, settles the
/// winner, and keeps re-spinning while players remain (when auto-continue
/// is enabled).
async fn drive(state: SharedState) {
    let tuning = state.config().spin.clone();

    loop {
        if animate_one_spin(&state).await.is_none() {
            break;
        }

        let pool_empty = state.wheel().read().await.pool().is_empty();
        if pool_empty {
            let teams = {
                let wheel = state.wheel().read().await;
                wheel
                    .teams()
                    .teams()
                    .iter()
                    .map(TeamSummary::from)
                    .collect::<Vec<_>>()
            };
            info!("pool drained; roster complete");
            sse_service::broadcast_json(
                state.events(),
                "roster_complete",
                &RosterCompleteEvent { teams },
            );
            break;
        }

        if !tuning.auto_continue {
            break;
        }

        sleep(tuning.continue_delay).await;

        let (started, players) = {
            let mut wheel = state.wheel().write().await;
            let mut rng = rand::rng();
            let started = wheel.start_spin(Instant::now(), &tuning, &mut rng);
            (started, wheel.pool().len())
        };
        if !started {
            break;
        }
        info!(players, "auto-continue spin started");
        sse_service::broadcast_json(state.events(), "spin_started", &SpinStartedEvent { players });
    }
}

/// Tick the current spin until it finishes, then settle the winner.
///
/// Returns `None` when no spin was in flight (the driver was raced by a
/// clear) so the caller stops looping.
async fn animate_one_spin(state: &SharedState) -> Option<Assignment> {
    let mut frames = interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        frames.tick().await;
        let now = Instant::now();

        let (tick, settled) = {
            let mut wheel = state.wheel().write().await;
            match wheel.tick(now) {
                SpinTick::Finished { angle_degrees } => {
                    let assignment = wheel.settle(angle_degrees);
                    let remaining = wheel.pool().names();
                    (SpinTick::Finished { angle_degrees }, Some((assignment, remaining)))
                }
                other => (other, None),
            }
        };

        match tick {
            SpinTick::Idle => return None,
            SpinTick::Animating { angle_degrees } => {
                sse_service::broadcast_json(
                    state.events(),
                    "wheel",
                    &WheelFrameEvent { angle_degrees },
                );
            }
            SpinTick::Finished { angle_degrees } => {
                sse_service::broadcast_json(
                    state.events(),
                    "wheel",
                    &WheelFrameEvent { angle_degrees },
                );

                let (assignment, remaining) = settled?;
                let assignment = assignment?;

                info!(
                    player = %assignment.player,
                    team = assignment.team_index,
                    remaining = remaining.len(),
                    "player assigned"
                );
                pool_service::persist_pool(state, remaining.clone()).await;
                sse_service::broadcast_json(
                    state.events(),
                    "player_assigned",
                    &PlayerAssignedEvent {
                        player: assignment.player.clone(),
                        team_id: assignment.team_id,
                        team_index: assignment.team_index,
                        remaining,
                    },
                );

                return Some(assignment);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::time::timeout;

    use crate::{
        config::{AppConfig, SpinTuning},
        dao::pool_store::memory::MemoryPoolStore,
        state::AppState,
    };

    use super::*;

    fn fast_config(auto_continue: bool) -> AppConfig {
        AppConfig {
            spin: SpinTuning {
                duration: Duration::from_millis(40),
                extra_turns: 1..=2,
                auto_continue,
                continue_delay: Duration::from_millis(10),
            },
            ..AppConfig::default()
        }
    }

    async fn seeded_state(config: AppConfig, players: &[&str]) -> SharedState {
        let state = AppState::new(config);
        state
            .install_pool_store(Arc::new(MemoryPoolStore::new()))
            .await;
        {
            let mut wheel = state.wheel().write().await;
            for player in players {
                wheel.pool_mut().add(player);
            }
        }
        state
    }

    #[tokio::test]
    async fn spin_drains_pool_with_auto_continue() {
        let state = seeded_state(fast_config(true), &["A", "B", "C", "D"]).await;

        let snapshot = request_spin(&state).await;
        assert!(snapshot.spinning);

        timeout(Duration::from_secs(5), async {
            loop {
                {
                    let wheel = state.wheel().read().await;
                    if wheel.pool().is_empty() && !wheel.spin().is_spinning() {
                        break;
                    }
                }
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("pool should drain");

        let wheel = state.wheel().read().await;
        let teams = wheel.teams().teams();
        assert_eq!(teams[0].members.len(), 2);
        assert_eq!(teams[1].members.len(), 2);
    }

    #[tokio::test]
    async fn without_auto_continue_only_one_player_is_assigned() {
        let state = seeded_state(fast_config(false), &["A", "B", "C"]).await;

        request_spin(&state).await;

        timeout(Duration::from_secs(5), async {
            loop {
                if !state.wheel().read().await.spin().is_spinning() {
                    break;
                }
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("spin should finish");
        // Give the driver a moment to decide against continuing.
        sleep(Duration::from_millis(50)).await;

        let wheel = state.wheel().read().await;
        assert_eq!(wheel.pool().len(), 2);
        assert!(!wheel.spin().is_spinning());
        let assigned: usize = wheel
            .teams()
            .teams()
            .iter()
            .map(|team| team.members.len())
            .sum();
        assert_eq!(assigned, 1);
    }

    #[tokio::test]
    async fn spin_request_with_empty_pool_is_a_no_op() {
        let state = seeded_state(fast_config(true), &[]).await;
        let snapshot = request_spin(&state).await;
        assert!(!snapshot.spinning);
        assert!(snapshot.players.is_empty());
    }

    #[tokio::test]
    async fn repeated_spin_requests_are_idempotent() {
        let state = seeded_state(fast_config(true), &["A", "B"]).await;

        let first = request_spin(&state).await;
        let second = request_spin(&state).await;
        assert!(first.spinning);
        assert!(second.spinning);
        assert_eq!(first.players, second.players);
    }
}
