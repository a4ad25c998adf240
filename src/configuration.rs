//! Config for the tournament behaviors
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! All values are optional. Flags are case-insensitive: set the value to `"true"` to enable
//! a flag.
//!
//! - `IPD_VERBOSE` — Print loading progress, match traces and the ranking (default: `true`)
//! - `IPD_LOG` — Enable logging to a file (default: `false`)
//! - `IPD_SKIP_INVALID_PLAYERS` — Skip units that fail to load instead of aborting (default: `false`)
//! - `IPD_SIMULTANEOUS` — Player 2 reacts to player 1's previous move instead of the current one (default: `false`)
//! - `IPD_SEED` — Seed the role assignment for reproducible traces (default: unset, OS randomness)
//! - `IPD_PLAYERS_DIR` — Directory scanned for player archives (default: `players`)

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::match_runner::{InformationMode, MatchSettings, ROUNDS};
use crate::roles::{OsRandom, RoleSource, SeededRandom};

/// Default directory scanned for player archives.
pub const DEFAULT_PLAYERS_DIR: &str = "players";

/// Configuration for tournament behaviors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) skip_invalid_players: bool,
    pub(crate) simultaneous: bool,
    pub(crate) seed: Option<u64>,
    pub(crate) rounds: usize,
    pub(crate) players_dir: PathBuf,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Loading progress, every match trace and the ranking are printed to stdout.
    /// - Logging to file is disabled.
    /// - Any unit that fails to load aborts the run.
    /// - Player 2 sees player 1's decision of the same round.
    /// - Roles are drawn from the operating system's strong random source.
    /// - Matches last 200 rounds.
    /// - Archives are read from `players/`.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            skip_invalid_players: false,
            simultaneous: false,
            seed: None,
            rounds: ROUNDS,
            players_dir: PathBuf::from(DEFAULT_PLAYERS_DIR),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// The following environment variables are recognized:
    /// - `IPD_VERBOSE`: if set to `"true"`, enables verbose output (default: `true`)
    /// - `IPD_LOG`: if set to `"true"`, enables logging to file (default: `false`)
    /// - `IPD_SKIP_INVALID_PLAYERS`: if set to `"true"`, broken units are skipped (default: `false`)
    /// - `IPD_SIMULTANEOUS`: if set to `"true"`, enables the simultaneous information mode (default: `false`)
    /// - `IPD_SEED`: an unsigned integer seeding the role assignment (default: unset)
    /// - `IPD_PLAYERS_DIR`: the archive directory (default: `players`)
    ///
    /// Any other value (including unset) will result in using the default value for each field.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get_flag = |var: &str, default: bool| match lookup(var) {
            Some(val) => val.eq_ignore_ascii_case("true"),
            None => default,
        };

        let seed = lookup("IPD_SEED").and_then(|val| match val.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                warn!("ignoring IPD_SEED='{val}': {e}");
                None
            }
        });

        Self {
            verbose: get_flag("IPD_VERBOSE", true),
            log: get_flag("IPD_LOG", false),
            skip_invalid_players: get_flag("IPD_SKIP_INVALID_PLAYERS", false),
            simultaneous: get_flag("IPD_SIMULTANEOUS", false),
            seed,
            rounds: ROUNDS,
            players_dir: lookup("IPD_PLAYERS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAYERS_DIR)),
        }
    }

    /// Enable or disable verbose mode.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Skip (with a warning) units that fail to load instead of aborting the run.
    pub fn with_skip_invalid_players(mut self, value: bool) -> Self {
        self.skip_invalid_players = value;
        self
    }

    /// Let player 2 react to player 1's previous decision rather than the current one.
    ///
    /// Off by default: the classic behavior gives player 1's same-round decision to player 2.
    pub fn with_simultaneous(mut self, value: bool) -> Self {
        self.simultaneous = value;
        self
    }

    /// Seed role assignment so that two runs produce the same traces.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Number of rounds of every match.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Directory scanned for player archives.
    pub fn with_players_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.players_dir = dir.into();
        self
    }

    /// Directory scanned for player archives.
    pub fn players_dir(&self) -> &Path {
        &self.players_dir
    }

    /// Whether progress and traces are printed.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether logs go to a file.
    pub fn log(&self) -> bool {
        self.log
    }

    pub(crate) fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            rounds: self.rounds,
            information: if self.simultaneous {
                InformationMode::Simultaneous
            } else {
                InformationMode::Sequential
            },
        }
    }

    pub(crate) fn role_source(&self) -> Box<dyn RoleSource> {
        match self.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(OsRandom),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod configuration_tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::from_lookup(lookup(&[]));
        assert_eq!(config, Configuration::new());
        assert!(config.verbose);
        assert_eq!(config.players_dir(), Path::new("players"));
        assert_eq!(config.match_settings().rounds, 200);
        assert_eq!(
            config.match_settings().information,
            InformationMode::Sequential
        );
    }

    #[test]
    fn test_flags_are_case_insensitive() {
        let config = Configuration::from_lookup(lookup(&[
            ("IPD_VERBOSE", "FALSE"),
            ("IPD_SKIP_INVALID_PLAYERS", "True"),
            ("IPD_SIMULTANEOUS", "tRuE"),
            ("IPD_LOG", "yes"),
        ]));
        assert!(!config.verbose);
        assert!(config.skip_invalid_players);
        assert!(!config.log);
        assert_eq!(
            config.match_settings().information,
            InformationMode::Simultaneous
        );
    }

    #[test]
    fn test_seed_and_directory() {
        let config = Configuration::from_lookup(lookup(&[
            ("IPD_SEED", " 42 "),
            ("IPD_PLAYERS_DIR", "/tmp/arena"),
        ]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.players_dir(), Path::new("/tmp/arena"));

        let config = Configuration::from_lookup(lookup(&[("IPD_SEED", "forty-two")]));
        assert_eq!(config.seed, None);
    }
}
