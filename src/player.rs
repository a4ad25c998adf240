use std::{fmt, hash::Hash};

use crate::strategy::{Decision, Strategy};

/// Identity of a loaded player.
///
/// Assigned by the loader in load order, starting at 1. Two players with the same names
/// still get different ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A strategy instance together with its identity and the unit it was built from.
pub struct Player {
    pub id: PlayerId,
    pub symbol: String,
    strategy: Box<dyn Strategy>,
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("engine", &self.engine_name())
            .field("developer", &self.developer_name())
            .field("symbol", &self.symbol)
            .finish()
    }
}

impl Player {
    pub fn new(id: PlayerId, symbol: String, strategy: Box<dyn Strategy>) -> Player {
        Player {
            id,
            symbol,
            strategy,
        }
    }

    /// Wraps a strategy that was not loaded from an archive.
    pub fn from_strategy(id: u32, strategy: impl Strategy + 'static) -> Player {
        let symbol = strategy.engine_name().to_owned();
        Player::new(PlayerId(id), symbol, Box::new(strategy))
    }

    pub fn developer_name(&self) -> &str {
        self.strategy.developer_name()
    }

    pub fn engine_name(&self) -> &str {
        self.strategy.engine_name()
    }

    pub fn decide(&mut self, prior_opponent_decision: Decision) -> Decision {
        self.strategy.decide(prior_opponent_decision)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.engine_name(), self.id)
    }
}
