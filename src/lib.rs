//! # IPD Melee
//!
//! An Iterated Prisoner's Dilemma tournament engine.
//!
//! It provides:
//! - The [`Strategy`](crate::strategy::Strategy) contract that every player implements
//! - Player discovery from archives naming units of a [`StrategyRegistry`](crate::registry::StrategyRegistry)
//! - Pairwise matches of 200 rounds with a random role assignment ([`MatchRunner`](crate::match_runner::MatchRunner))
//! - A round-robin scheduler accumulating scores in a [`ScoreTable`](crate::tournament_scheduler::ScoreTable)
//! - Built-in classic strategies, under `classic::*` in the default registry
//!
//! Each match pits two players against each other for a fixed number of rounds. In every
//! round each side cooperates or defects, and the payoff matrix turns the joint decision
//! into points:
//!
//! | player 1 | player 2 | player 1 gets | player 2 gets |
//! |----------|----------|---------------|---------------|
//! | C        | C        | 3             | 3             |
//! | D        | D        | 1             | 1             |
//! | D        | C        | 5             | 0             |
//! | C        | D        | 0             | 5             |
//!
//! # Documentation Overview
//!
//! - For the whole run (loading, playing, reporting), see the [`tournament`] module.
//! - For configuring the run, see [`Configuration`](crate::configuration::Configuration).
//! - For writing a player, see the [`Strategy`](crate::strategy::Strategy) trait and the
//!   [`registry`] module.
//!
//! # Usage Example
//!
//! ```no_run
//! use ipd_melee::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Configuration::new().with_seed(Some(42));
//!     let tournament = Tournament::new(config, StrategyRegistry::with_classic_players())?;
//!
//!     let result = tournament.run("players")?;
//!     print!("{}", result.leaderboard());
//!     Ok(())
//! }
//! ```
//!
//! # Example Player
//!
//! ```
//! use ipd_melee::prelude::*;
//!
//! #[derive(Default)]
//! struct Grudger {
//!     betrayed: bool,
//! }
//!
//! impl Strategy for Grudger {
//!     fn developer_name(&self) -> &str {
//!         "me"
//!     }
//!
//!     fn engine_name(&self) -> &str {
//!         "Grudger"
//!     }
//!
//!     fn decide(&mut self, prior_opponent_decision: Decision) -> Decision {
//!         self.betrayed |= prior_opponent_decision == Decision::Defect;
//!         if self.betrayed {
//!             Decision::Defect
//!         } else {
//!             Decision::Cooperate
//!         }
//!     }
//! }
//!
//! let registry = StrategyRegistry::with_classic_players()
//!     .with_strategy("me::grudger", || Ok(Box::new(Grudger::default())));
//! assert!(registry.resolve("me::grudger").is_some());
//! ```
//!
//! An archive listing `me/grudger.unit` will then load it.

pub use anyhow;
pub mod configuration;
pub mod error;
pub mod logger;
pub mod match_runner;
pub mod player;
pub mod player_loader;
pub mod players;
pub mod registry;
pub mod report;
pub mod roles;
pub mod strategy;
pub mod tournament;
pub mod tournament_scheduler;
pub mod trace;

/// Commonly used types and traits for quick access.
///
/// ```rust
/// use ipd_melee::prelude::*;
/// ```
pub mod prelude {
    pub use crate::configuration::Configuration;
    pub use crate::error::{LoadError, MatchError};
    pub use crate::player::{Player, PlayerId};
    pub use crate::registry::StrategyRegistry;
    pub use crate::report::Leaderboard;
    pub use crate::strategy::{Decision, Strategy};
    pub use crate::tournament::{Tournament, TournamentResult};
}
