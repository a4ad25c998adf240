use std::collections::BTreeMap;

use tracing::{info, trace};

use crate::error::{MatchError, ScoreError};
use crate::match_runner::MatchRunner;
use crate::player::{Player, PlayerId};

/// Every unordered pair of `0..n` exactly once, in index order: `(i, j)` with `i < j`.
pub fn round_robin_pairs(n: usize) -> Vec<(usize, usize)> {
    let mut pending = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pending.push((i, j));
        }
    }
    pending
}

/// Accumulated score of every member of a population.
///
/// Seeded with a zero entry per player; only grows by merging, never gains or loses entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    scores: BTreeMap<PlayerId, u64>,
}

impl ScoreTable {
    pub fn seeded(players: &[Player]) -> Self {
        Self {
            scores: players.iter().map(|player| (player.id, 0)).collect(),
        }
    }

    /// Adds `delta` to the score of `id`.
    pub fn merge(&mut self, id: PlayerId, delta: u32) -> Result<(), ScoreError> {
        let score = self
            .scores
            .get_mut(&id)
            .ok_or(ScoreError::UnknownPlayer(id))?;
        *score += u64::from(delta);
        Ok(())
    }

    pub fn get(&self, id: PlayerId) -> Option<u64> {
        self.scores.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, u64)> + '_ {
        self.scores.iter().map(|(id, score)| (*id, *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Plays the matches of a round-robin and folds the results into a [`ScoreTable`].
pub struct TournamentScheduler {
    runner: MatchRunner,
    matches_played: usize,
}

impl TournamentScheduler {
    pub fn new(runner: MatchRunner) -> Self {
        TournamentScheduler {
            runner,
            matches_played: 0,
        }
    }

    /// Plays every pair of `players` once, in index order.
    pub fn run(
        &mut self,
        players: &mut [Player],
        scores: ScoreTable,
    ) -> Result<ScoreTable, MatchError> {
        let pairs = round_robin_pairs(players.len());
        info!(
            players = players.len(),
            matches = pairs.len(),
            "round-robin scheduled"
        );
        self.run_pairs(players, scores, pairs)
    }

    /// Plays the given pairs of indices into `players`, in the given order.
    ///
    /// # Panics
    /// If a pair repeats an index or points outside `players`.
    pub fn run_pairs(
        &mut self,
        players: &mut [Player],
        mut scores: ScoreTable,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<ScoreTable, MatchError> {
        for (i, j) in pairs {
            let (a, b) = pair_mut(players, i, j);
            trace!("next match: {a} VS {b}");
            let result = self.runner.melee(a, b)?;
            scores.merge(result.first.0, result.first.1)?;
            scores.merge(result.second.0, result.second.1)?;
            self.matches_played += 1;
        }
        Ok(scores)
    }

    /// Number of matches completed so far.
    pub fn matches_played(&self) -> usize {
        self.matches_played
    }
}

fn pair_mut(players: &mut [Player], i: usize, j: usize) -> (&mut Player, &mut Player) {
    assert_ne!(i, j, "should not be able to play against yourself");
    if i < j {
        let (left, right) = players.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
