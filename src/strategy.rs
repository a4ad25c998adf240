//! The contract every player must implement, and the payoff rules applied to their decisions.
//!
//! A player is anything implementing [`Strategy`]: two pieces of identity metadata plus a
//! `decide` function that only ever sees the opponent's most recent [`Decision`].

use std::fmt;

/// A move in the Prisoner's Dilemma.
///
/// [`Decision::None`] is a sentinel: it seeds the very first move of a match and is never a
/// legal answer from [`Strategy::decide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Cooperate with the opponent.
    Cooperate,
    /// Defect against the opponent.
    Defect,
    /// No prior decision (first round only).
    None,
}

impl Decision {
    /// True for `Cooperate` and `Defect`.
    pub fn is_move(self) -> bool {
        !matches!(self, Decision::None)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so that width/alignment flags of the caller are honored
        f.pad(match self {
            Decision::Cooperate => "COOPERATE",
            Decision::Defect => "DEFECT",
            Decision::None => "NONE",
        })
    }
}

/// What a player must implement to take part in a tournament.
///
/// One instance is created per loaded unit and reused for every match of the tournament, so
/// any private state it keeps survives from one match to the next.
pub trait Strategy {
    /// Name of the author of the strategy.
    fn developer_name(&self) -> &str;

    /// Name of the strategy itself, used in traces and in the final ranking.
    fn engine_name(&self) -> &str;

    /// Returns this round's decision given the opponent's previous one.
    ///
    /// `prior_opponent_decision` is [`Decision::None`] when the opponent has not played yet.
    /// Must return `Cooperate` or `Defect`.
    fn decide(&mut self, prior_opponent_decision: Decision) -> Decision;
}

/// The four entries of the payoff matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payoff {
    /// Both cooperate.
    Reward,
    /// Both defect.
    Punishment,
    /// Received by the defector when the other cooperates.
    Temptation,
    /// Owed to the cooperator when the other defects. Shown in traces, never scored.
    Sucker,
}

impl Payoff {
    /// Numeric value of this payoff.
    pub const fn value(self) -> u32 {
        match self {
            Payoff::Reward => 3,
            Payoff::Punishment => 1,
            Payoff::Temptation => 5,
            Payoff::Sucker => 0,
        }
    }
}

/// Outcome of one round: what is added to each score, and what a trace shows.
///
/// `shown` differs from `delta` on asymmetric rounds: the cooperator is shown
/// [`Payoff::Sucker`] but scores nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundScore {
    /// Added to (player 1, player 2).
    pub delta: (u32, u32),
    /// Displayed for (player 1, player 2).
    pub shown: (u32, u32),
}

/// Classifies a pair of decisions and scores it.
///
/// Returns `None` if either side did not produce a real move.
pub fn score_round(p1: Decision, p2: Decision) -> Option<RoundScore> {
    use Decision::{Cooperate, Defect};

    let (delta, shown) = match (p1, p2) {
        (Cooperate, Cooperate) => {
            let r = Payoff::Reward.value();
            ((r, r), (r, r))
        }
        (Defect, Defect) => {
            let p = Payoff::Punishment.value();
            ((p, p), (p, p))
        }
        (Defect, Cooperate) => {
            let t = Payoff::Temptation.value();
            ((t, 0), (t, Payoff::Sucker.value()))
        }
        (Cooperate, Defect) => {
            let t = Payoff::Temptation.value();
            ((0, t), (Payoff::Sucker.value(), t))
        }
        _ => return None,
    };
    Some(RoundScore { delta, shown })
}
