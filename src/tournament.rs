//! Running a whole tournament.
//!
//! This module defines the [`Tournament`] type, which owns everything a run needs:
//!
//! - Collecting players from a directory of player archives (see [`player_loader`](crate::player_loader))
//! - Playing the round-robin (see [`TournamentScheduler`])
//! - Returning the final scores and a [`Leaderboard`]
//!
//! # Behavior & Configuration
//!
//! Behavior is controlled by a [`Configuration`] object:
//!
//! - When `verbose` is set, the loaded players and the trace of every match are printed on
//!   stdout.
//! - When `log` is set, a file logger is installed when the [`Tournament`] is created.
//! - When `skip_invalid_players` is set, archives and units that fail to load are skipped
//!   instead of aborting the run.
//! - `seed` and `simultaneous` change how matches are played (see
//!   [`MatchRunner`](crate::match_runner::MatchRunner)).
//!
//! A player archive is a small manifest naming units of the [`StrategyRegistry`]:
//!
//! ```text
//! archive: classics
//! entries:
//!   - classic/tit_for_tat.unit
//!   - classic/pavlov.unit
//! ```
//!
//! > ⚠️ This file is manually parsed. Only the two keys above and `#` comments are supported.

use std::path::Path;

use tracing::{info, instrument, trace};

use crate::configuration::Configuration;
use crate::logger::init_logger;
use crate::match_runner::MatchRunner;
use crate::player::Player;
use crate::player_loader::collect_players;
use crate::registry::StrategyRegistry;
use crate::report::{Leaderboard, LoadedPlayers};
use crate::tournament_scheduler::{ScoreTable, TournamentScheduler};
use crate::trace::{ConsoleTrace, MatchObserver, NullObserver};

/// Plays round-robin tournaments between the players found in archive directories.
pub struct Tournament {
    config: Configuration,
    registry: StrategyRegistry,
}

/// Everything left once the last match is played.
#[derive(Debug)]
pub struct TournamentResult {
    /// Population, in load order.
    pub players: Vec<Player>,
    pub scores: ScoreTable,
    pub matches_played: usize,
}

impl TournamentResult {
    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::new(&self.players, &self.scores)
    }
}

impl Tournament {
    /// Create a [`Tournament`] resolving archive units in `registry`.
    ///
    /// # Errors
    /// If `config` asks for a log file and the logger cannot be installed.
    #[instrument(skip_all)]
    pub fn new(config: Configuration, registry: StrategyRegistry) -> anyhow::Result<Tournament> {
        if config.log {
            init_logger()?;
        }

        trace!(?config, units = registry.len());

        Ok(Tournament { config, registry })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Collects the players of `directory` and plays every pair once.
    ///
    /// # Errors
    /// Returns an error if loading fails (see [`LoadError`](crate::error::LoadError)) or if a
    /// strategy breaks the rules during a match (see
    /// [`MatchError`](crate::error::MatchError)). No partial result is returned.
    pub fn run(&self, directory: impl AsRef<Path>) -> anyhow::Result<TournamentResult> {
        let verbose = self.config.verbose;

        // 1. get players from the archives of *directory*
        let mut players = collect_players(directory.as_ref(), &self.registry, &self.config)?;
        info!(?players);

        if verbose {
            println!("--- Loaded players ---");
            print!("{}", LoadedPlayers(&players));
            println!("--- Contest ---");
        }

        // 2. one entry per player before any match
        let scores = ScoreTable::seeded(&players);

        // 3. play
        let observer: Box<dyn MatchObserver> = if verbose {
            Box::new(ConsoleTrace::stdout())
        } else {
            Box::new(NullObserver)
        };
        let runner = MatchRunner::new(
            self.config.match_settings(),
            self.config.role_source(),
            observer,
        );
        let mut scheduler = TournamentScheduler::new(runner);
        let scores = scheduler.run(&mut players, scores)?;

        let matches_played = scheduler.matches_played();
        info!(matches_played, "tournament finished");

        Ok(TournamentResult {
            players,
            scores,
            matches_played,
        })
    }

    /// Same as [`Tournament::run`], on the configured players' directory.
    pub fn run_configured(&self) -> anyhow::Result<TournamentResult> {
        self.run(self.config.players_dir())
    }
}
