//! One pairwise contest between two players.
//!
//! A match lasts a fixed number of rounds. Before the first round a [`RoleSource`] decides
//! whether the listed order is swapped. Each round player 1 decides from player 2's previous
//! decision, then player 2 decides from player 1's decision: the one just made in
//! [`InformationMode::Sequential`] (the classic rule), or the one of the previous round in
//! [`InformationMode::Simultaneous`].

use tracing::{debug, instrument, trace, warn};

use crate::error::MatchError;
use crate::player::{Player, PlayerId};
use crate::roles::RoleSource;
use crate::strategy::{score_round, Decision};
use crate::trace::{MatchObserver, RoundRecord};

/// Number of rounds of a match.
pub const ROUNDS: usize = 200;

/// What player 2 gets to see each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InformationMode {
    /// Player 2 sees player 1's decision of the same round.
    #[default]
    Sequential,
    /// Player 2 sees player 1's decision of the previous round, like player 1 does.
    Simultaneous,
}

/// Rules shared by every match of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    pub rounds: usize,
    pub information: InformationMode,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            rounds: ROUNDS,
            information: InformationMode::default(),
        }
    }
}

/// Match totals, keyed by the players as they were listed (before any swap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub first: (PlayerId, u32),
    pub second: (PlayerId, u32),
    /// Whether the second listed player moved first.
    pub swapped: bool,
}

impl MatchResult {
    pub fn score_of(&self, id: PlayerId) -> Option<u32> {
        if self.first.0 == id {
            Some(self.first.1)
        } else if self.second.0 == id {
            Some(self.second.1)
        } else {
            None
        }
    }
}

/// Plays matches with fixed settings, a role source and an observer.
pub struct MatchRunner {
    settings: MatchSettings,
    roles: Box<dyn RoleSource>,
    observer: Box<dyn MatchObserver>,
}

impl MatchRunner {
    pub fn new(
        settings: MatchSettings,
        roles: Box<dyn RoleSource>,
        observer: Box<dyn MatchObserver>,
    ) -> Self {
        Self {
            settings,
            roles,
            observer,
        }
    }

    pub fn settings(&self) -> MatchSettings {
        self.settings
    }

    fn should_swap(&mut self) -> bool {
        match self.roles.draw_swap() {
            Ok(swap) => swap,
            Err(e) => {
                warn!("{e}; keeping the listed order");
                false
            }
        }
    }

    /// Plays every round between `a` and `b` and returns their totals.
    ///
    /// # Errors
    /// [`MatchError::IllegalDecision`] if a strategy answers [`Decision::None`].
    #[instrument(skip_all, fields(a = %a, b = %b))]
    pub fn melee(&mut self, a: &mut Player, b: &mut Player) -> Result<MatchResult, MatchError> {
        let (id_a, id_b) = (a.id, b.id);
        let swapped = self.should_swap();
        let (p1, p2) = if swapped { (b, a) } else { (a, b) };
        debug!(swapped, player_1 = %p1, player_2 = %p2, "roles assigned");

        self.observer.on_match_start(p1, p2);

        let mut score = [0u32; 2];
        let mut p1_decision = Decision::None;
        let mut p2_decision = Decision::None;

        for round in 0..self.settings.rounds {
            let p1_prior = p1_decision;
            p1_decision = checked(p1.decide(p2_decision), p1, round)?;

            let seen_by_p2 = match self.settings.information {
                InformationMode::Sequential => p1_decision,
                InformationMode::Simultaneous => p1_prior,
            };
            p2_decision = p2.decide(seen_by_p2);

            // player 1's decision is a real move, so only player 2 can make this fail
            let outcome =
                score_round(p1_decision, p2_decision).ok_or_else(|| illegal(p2, round))?;
            score[0] += outcome.delta.0;
            score[1] += outcome.delta.1;
            trace!(round, %p1_decision, %p2_decision, delta = ?outcome.delta);

            self.observer.on_round(&RoundRecord {
                decisions: (p1_decision, p2_decision),
                shown: outcome.shown,
                delta: outcome.delta,
            });
        }

        self.observer.on_match_end((score[0], score[1]));
        debug!(player_1 = score[0], player_2 = score[1], "match finished");

        let (score_a, score_b) = if swapped {
            (score[1], score[0])
        } else {
            (score[0], score[1])
        };
        Ok(MatchResult {
            first: (id_a, score_a),
            second: (id_b, score_b),
            swapped,
        })
    }
}

fn checked(decision: Decision, player: &Player, round: usize) -> Result<Decision, MatchError> {
    if decision.is_move() {
        Ok(decision)
    } else {
        Err(illegal(player, round))
    }
}

fn illegal(player: &Player, round: usize) -> MatchError {
    MatchError::IllegalDecision {
        engine: player.engine_name().to_owned(),
        round,
    }
}
