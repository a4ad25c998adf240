//! Classic strategies linked into the default registry.
//!
//! These are ordinary [`Strategy`] implementations; the engine knows nothing about them.
//! Stateful ones forget what they remember when they are asked to open a match
//! (`prior_opponent_decision == Decision::None`), which only happens when they move first.

use rand::Rng;

use crate::strategy::{score_round, Decision, Payoff, Strategy};

const DEVELOPER: &str = "classic";

/// Always cooperates.
#[derive(Debug, Default)]
pub struct AlwaysCooperate;

impl Strategy for AlwaysCooperate {
    fn developer_name(&self) -> &str {
        DEVELOPER
    }

    fn engine_name(&self) -> &str {
        "Always Cooperate"
    }

    fn decide(&mut self, _prior_opponent_decision: Decision) -> Decision {
        Decision::Cooperate
    }
}

/// Always defects.
#[derive(Debug, Default)]
pub struct AlwaysDefect;

impl Strategy for AlwaysDefect {
    fn developer_name(&self) -> &str {
        DEVELOPER
    }

    fn engine_name(&self) -> &str {
        "Always Defect"
    }

    fn decide(&mut self, _prior_opponent_decision: Decision) -> Decision {
        Decision::Defect
    }
}

/// Copies the opponent's last move, cooperates when there is none.
#[derive(Debug, Default)]
pub struct TitForTat;

impl Strategy for TitForTat {
    fn developer_name(&self) -> &str {
        DEVELOPER
    }

    fn engine_name(&self) -> &str {
        "Tit for Tat"
    }

    fn decide(&mut self, prior_opponent_decision: Decision) -> Decision {
        match prior_opponent_decision {
            Decision::Defect => Decision::Defect,
            Decision::Cooperate | Decision::None => Decision::Cooperate,
        }
    }
}

/// Tit for Tat that opens with a defection.
#[derive(Debug, Default)]
pub struct SuspiciousTitForTat;

impl Strategy for SuspiciousTitForTat {
    fn developer_name(&self) -> &str {
        DEVELOPER
    }

    fn engine_name(&self) -> &str {
        "Suspicious Tit for Tat"
    }

    fn decide(&mut self, prior_opponent_decision: Decision) -> Decision {
        match prior_opponent_decision {
            Decision::Cooperate => Decision::Cooperate,
            Decision::Defect | Decision::None => Decision::Defect,
        }
    }
}

/// Defects only after two consecutive defections.
///
/// Its memory is cleared only when it moves first. As player 2 it starts a match with the
/// last decision it saw in the previous match.
#[derive(Debug, Default)]
pub struct TitForTwoTats {
    last_seen: Option<Decision>,
}

impl Strategy for TitForTwoTats {
    fn developer_name(&self) -> &str {
        DEVELOPER
    }

    fn engine_name(&self) -> &str {
        "Tit for Two Tats"
    }

    fn decide(&mut self, prior_opponent_decision: Decision) -> Decision {
        if prior_opponent_decision == Decision::None {
            self.last_seen = None;
            return Decision::Cooperate;
        }
        let twice = self.last_seen == Some(Decision::Defect)
            && prior_opponent_decision == Decision::Defect;
        self.last_seen = Some(prior_opponent_decision);
        if twice {
            Decision::Defect
        } else {
            Decision::Cooperate
        }
    }
}

/// Cooperates until the opponent defects once, then always defects.
///
/// The grudge is dropped only when it moves first. As player 2 it keeps defecting from the
/// first round if its previous opponent ever defected, so its total depends on the schedule
/// and on the role draw.
#[derive(Debug, Default)]
pub struct GrimTrigger {
    triggered: bool,
}

impl Strategy for GrimTrigger {
    fn developer_name(&self) -> &str {
        DEVELOPER
    }

    fn engine_name(&self) -> &str {
        "Grim Trigger"
    }

    fn decide(&mut self, prior_opponent_decision: Decision) -> Decision {
        match prior_opponent_decision {
            Decision::None => self.triggered = false,
            Decision::Defect => self.triggered = true,
            Decision::Cooperate => {}
        }
        if self.triggered {
            Decision::Defect
        } else {
            Decision::Cooperate
        }
    }
}

/// Win-stay, lose-shift: repeats its move after a good outcome, switches otherwise.
///
/// Its last move is forgotten only when it moves first. As player 2 it judges the first
/// round against the move it ended the previous match with.
#[derive(Debug, Default)]
pub struct Pavlov {
    last_own: Option<Decision>,
}

impl Strategy for Pavlov {
    fn developer_name(&self) -> &str {
        DEVELOPER
    }

    fn engine_name(&self) -> &str {
        "Pavlov"
    }

    fn decide(&mut self, prior_opponent_decision: Decision) -> Decision {
        let next = match (self.last_own, prior_opponent_decision) {
            (_, Decision::None) | (None, _) => Decision::Cooperate,
            (Some(own), opponent) => {
                let good = score_round(own, opponent)
                    .is_some_and(|score| score.shown.0 >= Payoff::Reward.value());
                if good {
                    own
                } else if own == Decision::Cooperate {
                    Decision::Defect
                } else {
                    Decision::Cooperate
                }
            }
        };
        self.last_own = Some(next);
        next
    }
}

/// Flips a fair coin every round.
#[derive(Debug, Default)]
pub struct RandomPlayer;

impl Strategy for RandomPlayer {
    fn developer_name(&self) -> &str {
        DEVELOPER
    }

    fn engine_name(&self) -> &str {
        "Random"
    }

    fn decide(&mut self, _prior_opponent_decision: Decision) -> Decision {
        if rand::rng().random_bool(0.5) {
            Decision::Cooperate
        } else {
            Decision::Defect
        }
    }
}
