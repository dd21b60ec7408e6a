use tracing::{info, warn};

use crate::{
    dao::pool_store,
    dto::{
        player::{AddPlayerRequest, PoolSnapshot},
        sse::{PoolChangedEvent, TeamsChangedEvent},
        team::TeamSummary,
    },
    error::ServiceError,
    services::sse_service,
    state::SharedState,
};

/// Populate the pool from the persistence collaborator at startup.
///
/// A missing or malformed document falls back to the default roster, which
/// is written back to the store so the next boot finds well-formed data.
pub async fn bootstrap_pool(state: &SharedState) -> Result<(), ServiceError> {
    let Some(store) = state.pool_store().await else {
        info!("no pool store installed; starting with an empty pool");
        return Ok(());
    };

    let loaded = match store.load().await {
        Ok(loaded) => loaded,
        Err(err) => {
            // A store that cannot even load is not worth keeping around.
            state.clear_pool_store().await;
            return Err(err.into());
        }
    };
    let (players, seeded) = match loaded {
        Some(players) => (players, false),
        None => (pool_store::default_pool(), true),
    };

    {
        let mut wheel = state.wheel().write().await;
        let pool = wheel.pool_mut();
        for player in &players {
            pool.add(player);
        }
    }

    if seeded {
        info!(count = players.len(), "seeded pool with default roster");
        store.save(players).await?;
    } else {
        info!(count = players.len(), "restored pool from store");
    }

    Ok(())
}

/// Add a player to the pool.
///
/// Empty and duplicate names leave the pool untouched; the caller still
/// receives the current snapshot, so the action is safely repeatable.
pub async fn add_player(state: &SharedState, request: AddPlayerRequest) -> PoolSnapshot {
    let (changed, players) = {
        let mut wheel = state.wheel().write().await;
        let changed = wheel.pool_mut().add(&request.name);
        (changed, wheel.pool().names())
    };

    if changed {
        info!(player = %request.name.trim(), count = players.len(), "player added to pool");
        persist_pool(state, players.clone()).await;
        sse_service::broadcast_json(
            state.events(),
            "pool_changed",
            &PoolChangedEvent {
                players: players.clone(),
            },
        );
    }

    PoolSnapshot { players }
}

/// Remove a player from the pool by exact name. Absent names are a no-op.
pub async fn remove_player(state: &SharedState, name: &str) -> PoolSnapshot {
    let (changed, players) = {
        let mut wheel = state.wheel().write().await;
        let changed = wheel.pool_mut().remove(name);
        (changed, wheel.pool().names())
    };

    if changed {
        info!(player = %name, count = players.len(), "player removed from pool");
        persist_pool(state, players.clone()).await;
        sse_service::broadcast_json(
            state.events(),
            "pool_changed",
            &PoolChangedEvent {
                players: players.clone(),
            },
        );
    }

    PoolSnapshot { players }
}

/// Shuffle the pool into a uniformly random order.
pub async fn shuffle_pool(state: &SharedState) -> PoolSnapshot {
    let players = {
        let mut wheel = state.wheel().write().await;
        let mut rng = rand::rng();
        wheel.pool_mut().shuffle(&mut rng);
        wheel.pool().names()
    };

    persist_pool(state, players.clone()).await;
    sse_service::broadcast_json(
        state.events(),
        "pool_changed",
        &PoolChangedEvent {
            players: players.clone(),
        },
    );

    PoolSnapshot { players }
}

/// Empty the pool and every team's member list in one action.
pub async fn clear_pool(state: &SharedState) {
    let teams = {
        let mut wheel = state.wheel().write().await;
        wheel.clear_all();
        wheel
            .teams()
            .teams()
            .iter()
            .map(TeamSummary::from)
            .collect::<Vec<_>>()
    };

    info!("pool and team assignments cleared");
    // An empty persisted list reads back as absent, so the next boot seeds
    // the default roster again, like the original after a wipe.
    persist_pool(state, Vec::new()).await;
    sse_service::broadcast_json(
        state.events(),
        "pool_changed",
        &PoolChangedEvent {
            players: Vec::new(),
        },
    );
    sse_service::broadcast_json(state.events(), "teams_changed", &TeamsChangedEvent { teams });
}

/// Write the pool back to the store, best-effort.
///
/// Persistence failures are logged and swallowed: the cached list is a
/// convenience, never a gameplay dependency.
pub(crate) async fn persist_pool(state: &SharedState, players: Vec<String>) {
    let Some(store) = state.pool_store().await else {
        return;
    };

    if let Err(err) = store.save(players).await {
        warn!(error = %err, "failed to persist pool");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{config::AppConfig, dao::pool_store::memory::MemoryPoolStore, state::AppState};

    use super::*;

    async fn state_with_store(store: MemoryPoolStore) -> SharedState {
        let state = AppState::new(AppConfig::default());
        state.install_pool_store(Arc::new(store)).await;
        state
    }

    fn add(name: &str) -> AddPlayerRequest {
        AddPlayerRequest { name: name.into() }
    }

    #[tokio::test]
    async fn bootstrap_seeds_default_roster_and_rewrites_store() {
        let store = MemoryPoolStore::new();
        let state = state_with_store(store.clone()).await;

        bootstrap_pool(&state).await.unwrap();

        let wheel = state.wheel().read().await;
        assert_eq!(wheel.pool().len(), 8);
        assert_eq!(store.stored(), Some(wheel.pool().names()));
    }

    #[tokio::test]
    async fn bootstrap_restores_persisted_roster() {
        let seeded = vec!["Zoe".to_string(), "Yann".to_string()];
        let state = state_with_store(MemoryPoolStore::seeded(seeded.clone())).await;

        bootstrap_pool(&state).await.unwrap();

        let wheel = state.wheel().read().await;
        assert_eq!(wheel.pool().names(), seeded);
    }

    #[tokio::test]
    async fn add_persists_only_on_change() {
        let store = MemoryPoolStore::new();
        let state = state_with_store(store.clone()).await;

        let snapshot = add_player(&state, add("Alice")).await;
        assert_eq!(snapshot.players, vec!["Alice"]);
        assert_eq!(store.stored(), Some(vec!["Alice".to_string()]));

        // Duplicate and empty adds leave both pool and store untouched.
        add_player(&state, add("Alice")).await;
        add_player(&state, add("   ")).await;
        let snapshot = add_player(&state, add("")).await;
        assert_eq!(snapshot.players, vec!["Alice"]);
        assert_eq!(store.stored(), Some(vec!["Alice".to_string()]));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemoryPoolStore::new();
        let state = state_with_store(store.clone()).await;
        add_player(&state, add("Alice")).await;
        add_player(&state, add("Bob")).await;

        let snapshot = remove_player(&state, "Alice").await;
        assert_eq!(snapshot.players, vec!["Bob"]);
        let snapshot = remove_player(&state, "Alice").await;
        assert_eq!(snapshot.players, vec!["Bob"]);
        assert_eq!(store.stored(), Some(vec!["Bob".to_string()]));
    }

    #[tokio::test]
    async fn clear_empties_pool_and_team_members() {
        let state = state_with_store(MemoryPoolStore::new()).await;
        add_player(&state, add("Alice")).await;
        {
            let mut wheel = state.wheel().write().await;
            wheel.teams_mut().assign("Bob".into());
        }

        clear_pool(&state).await;

        let wheel = state.wheel().read().await;
        assert!(wheel.pool().is_empty());
        assert!(
            wheel
                .teams()
                .teams()
                .iter()
                .all(|team| team.members.is_empty())
        );
    }

    #[tokio::test]
    async fn missing_store_is_not_fatal() {
        let state = AppState::new(AppConfig::default());
        bootstrap_pool(&state).await.unwrap();
        let snapshot = add_player(&state, add("Alice")).await;
        assert_eq!(snapshot.players, vec!["Alice"]);
    }
}
