use std::time::Instant;

use indexmap::IndexSet;
use rand::{Rng, seq::SliceRandom};
use uuid::Uuid;

use crate::{
    config::SpinTuning,
    state::spin::{SpinEngine, SpinTick, winning_index},
};

/// Ordered pool of not-yet-assigned player names.
///
/// Entries are unique (case-sensitive) and keep insertion order except
/// after an explicit shuffle.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    names: IndexSet<String>,
}

impl Pool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player, trimming surrounding whitespace first.
    ///
    /// Empty and duplicate names are silently ignored; the return value
    /// reports whether the pool changed.
    pub fn add(&mut self, raw: &str) -> bool {
        let name = raw.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    /// Remove a player by exact name, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.shift_remove(name)
    }

    /// Remove and return the player at `index`, shifting later entries down.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        self.names.shift_remove_index(index)
    }

    /// Rearrange the pool into a uniformly random permutation.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        let mut entries: Vec<String> = self.names.drain(..).collect();
        entries.shuffle(rng);
        self.names = entries.into_iter().collect();
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Number of players waiting for assignment.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no players remain.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Snapshot of the pool in its current order.
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

/// A team and the players assigned to it so far.
#[derive(Debug, Clone)]
pub struct Team {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Display name ("Team 1", "Team 2", ...).
    pub name: String,
    /// Players assigned to this team, in assignment order.
    pub members: Vec<String>,
}

/// Fixed-size set of teams receiving players in round-robin order.
#[derive(Debug, Clone)]
pub struct TeamSet {
    teams: Vec<Team>,
    cursor: usize,
}

impl TeamSet {
    /// Create `count` empty teams; a count below 1 is bumped to 1.
    pub fn new(count: usize) -> Self {
        Self {
            teams: make_teams(count.max(1)),
            cursor: 0,
        }
    }

    /// Recreate the set with `count` empty teams and reset the cursor.
    ///
    /// A count of zero is silently ignored so the `count >= 1` invariant
    /// holds regardless of how the caller was reached.
    pub fn set_count(&mut self, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        self.teams = make_teams(count);
        self.cursor = 0;
        true
    }

    /// Append `name` to the team at the round-robin cursor, then advance it.
    ///
    /// Returns the index of the receiving team, or `None` when no teams
    /// exist (a configuration error on the caller's side, not a failure).
    pub fn assign(&mut self, name: String) -> Option<usize> {
        if self.teams.is_empty() {
            return None;
        }
        let index = self.cursor;
        self.teams[index].members.push(name);
        self.cursor = (self.cursor + 1) % self.teams.len();
        Some(index)
    }

    /// Empty every team's member list without touching the cursor.
    pub fn clear_members(&mut self) {
        for team in &mut self.teams {
            team.members.clear();
        }
    }

    /// Number of teams.
    pub fn count(&self) -> usize {
        self.teams.len()
    }

    /// Index of the team that receives the next assignment.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Borrow the teams in order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }
}

fn make_teams(count: usize) -> Vec<Team> {
    (0..count)
        .map(|i| Team {
            id: Uuid::new_v4(),
            name: format!("Team {}", i + 1),
            members: Vec::new(),
        })
        .collect()
}

/// Result of settling a finished spin: who won and where they went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The selected player.
    pub player: String,
    /// Identifier of the receiving team.
    pub team_id: Uuid,
    /// Index of the receiving team.
    pub team_index: usize,
}

/// The whole randomizer: pool, teams, and the spin engine, owned together
/// so every mutation happens under one lock.
#[derive(Debug, Clone)]
pub struct WheelSession {
    pool: Pool,
    teams: TeamSet,
    spin: SpinEngine,
}

impl WheelSession {
    /// Create a session with an empty pool and `team_count` empty teams.
    pub fn new(team_count: usize) -> Self {
        Self {
            pool: Pool::new(),
            teams: TeamSet::new(team_count),
            spin: SpinEngine::new(),
        }
    }

    /// The candidate pool.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Mutable access to the candidate pool.
    pub fn pool_mut(&mut self) -> &mut Pool {
        &mut self.pool
    }

    /// The team set.
    pub fn teams(&self) -> &TeamSet {
        &self.teams
    }

    /// Mutable access to the team set.
    pub fn teams_mut(&mut self) -> &mut TeamSet {
        &mut self.teams
    }

    /// The spin engine.
    pub fn spin(&self) -> &SpinEngine {
        &self.spin
    }

    /// Request a spin at `now`.
    ///
    /// Rejected (returning `false`, with no state change) when the pool is
    /// empty or a spin is already in flight.
    pub fn start_spin(&mut self, now: Instant, tuning: &SpinTuning, rng: &mut impl Rng) -> bool {
        if self.pool.is_empty() {
            return false;
        }
        self.spin
            .start(now, tuning.duration, tuning.extra_turns.clone(), rng)
    }

    /// Advance the spin animation to `now`.
    pub fn tick(&mut self, now: Instant) -> SpinTick {
        self.spin.tick(now)
    }

    /// Read the winner off a finished spin, remove them from the pool, and
    /// hand them to the next round-robin team.
    pub fn settle(&mut self, final_angle_degrees: f64) -> Option<Assignment> {
        let index = winning_index(final_angle_degrees, self.pool.len())?;
        let player = self.pool.remove_at(index)?;
        let team_index = self.teams.assign(player.clone())?;
        Some(Assignment {
            player,
            team_id: self.teams.teams()[team_index].id,
            team_index,
        })
    }

    /// Empty the pool and every team's member list in one action.
    pub fn clear_all(&mut self) {
        self.pool.clear();
        self.teams.clear_members();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{BTreeSet, HashMap},
        time::{Duration, Instant},
    };

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn pool_of(names: &[&str]) -> Pool {
        let mut pool = Pool::new();
        for name in names {
            assert!(pool.add(name));
        }
        pool
    }

    fn tuning() -> SpinTuning {
        SpinTuning {
            duration: Duration::from_millis(3000),
            extra_turns: 1..=5,
            auto_continue: true,
            continue_delay: Duration::from_millis(1000),
        }
    }

    #[test]
    fn add_rejects_empty_and_duplicates() {
        let mut pool = Pool::new();
        assert!(!pool.add(""));
        assert!(!pool.add("  "));
        assert!(pool.add("Alice"));
        assert!(!pool.add("Alice"));
        assert!(!pool.add("  Alice "));
        assert_eq!(pool.names(), vec!["Alice".to_string()]);
    }

    #[test]
    fn add_is_case_sensitive() {
        let mut pool = Pool::new();
        assert!(pool.add("alice"));
        assert!(pool.add("Alice"));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut pool = pool_of(&["A", "B", "C", "D"]);
        assert!(pool.remove("B"));
        assert!(!pool.remove("B"));
        assert_eq!(pool.names(), vec!["A", "C", "D"]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let mut pool = pool_of(&names);
        pool.shuffle(&mut rng);

        assert_eq!(pool.len(), names.len());
        let before: BTreeSet<&str> = names.into_iter().collect();
        let after: BTreeSet<String> = pool.names().into_iter().collect();
        assert_eq!(before.len(), after.len());
        for name in before {
            assert!(after.contains(name));
        }
    }

    #[test]
    fn shuffle_orderings_are_roughly_uniform() {
        // 6 possible orderings of 3 players; over 6000 trials each should
        // land near 1000. A loose band keeps the test deterministic with a
        // fixed seed while still catching biased implementations.
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts: HashMap<Vec<String>, u32> = HashMap::new();

        for _ in 0..6_000 {
            let mut pool = pool_of(&["A", "B", "C"]);
            pool.shuffle(&mut rng);
            *counts.entry(pool.names()).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (ordering, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "ordering {ordering:?} appeared {count} times"
            );
        }
    }

    #[test]
    fn round_robin_cycles_through_teams() {
        let mut teams = TeamSet::new(3);
        let expected = [0, 1, 2, 0, 1, 2, 0];
        for (i, want) in expected.into_iter().enumerate() {
            assert_eq!(teams.assign(format!("p{i}")), Some(want));
        }
        assert_eq!(teams.teams()[0].members, vec!["p0", "p3", "p6"]);
        assert_eq!(teams.teams()[1].members, vec!["p1", "p4"]);
        assert_eq!(teams.teams()[2].members, vec!["p2", "p5"]);
    }

    #[test]
    fn set_count_recreates_teams_and_resets_cursor() {
        let mut teams = TeamSet::new(2);
        teams.assign("A".into());
        assert_eq!(teams.cursor(), 1);

        assert!(teams.set_count(4));
        assert_eq!(teams.count(), 4);
        assert_eq!(teams.cursor(), 0);
        assert!(teams.teams().iter().all(|team| team.members.is_empty()));
    }

    #[test]
    fn zero_team_count_is_ignored() {
        let mut teams = TeamSet::new(3);
        teams.assign("A".into());
        assert!(!teams.set_count(0));
        assert_eq!(teams.count(), 3);
        assert_eq!(teams.teams()[0].members, vec!["A"]);
    }

    #[test]
    fn clear_all_empties_pool_and_team_members() {
        let mut session = WheelSession::new(2);
        session.pool_mut().add("A");
        session.pool_mut().add("B");
        session.teams_mut().assign("C".into());

        session.clear_all();
        assert!(session.pool().is_empty());
        assert!(
            session
                .teams()
                .teams()
                .iter()
                .all(|team| team.members.is_empty())
        );
        assert_eq!(session.teams().count(), 2);
    }

    #[test]
    fn spin_rejected_for_empty_pool() {
        let mut session = WheelSession::new(2);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!session.start_spin(Instant::now(), &tuning(), &mut rng));
    }

    #[test]
    fn drains_pool_into_both_teams() {
        // Repeated spin/settle cycles move every player into exactly one
        // team, split evenly for an even pool.
        let mut session = WheelSession::new(2);
        for name in ["A", "B", "C", "D"] {
            session.pool_mut().add(name);
        }

        let mut rng = StdRng::seed_from_u64(1234);
        let tuning = tuning();
        let mut now = Instant::now();

        while !session.pool().is_empty() {
            assert!(session.start_spin(now, &tuning, &mut rng));
            now += tuning.duration;
            let SpinTick::Finished { angle_degrees } = session.tick(now) else {
                panic!("spin did not finish after full duration");
            };
            assert!(session.settle(angle_degrees).is_some());
            now += tuning.continue_delay;
        }

        let teams = session.teams().teams();
        let mut assigned: Vec<&str> = teams
            .iter()
            .flat_map(|team| team.members.iter().map(String::as_str))
            .collect();
        assigned.sort_unstable();
        assert_eq!(assigned, vec!["A", "B", "C", "D"]);
        assert_eq!(teams[0].members.len(), 2);
        assert_eq!(teams[1].members.len(), 2);
    }

    #[test]
    fn settle_on_empty_pool_is_a_no_op() {
        let mut session = WheelSession::new(2);
        assert_eq!(session.settle(123.0), None);
    }
}
