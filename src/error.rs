//! Error types surfaced by loading, playing and scoring.
//!
//! Orchestration code works with `anyhow::Result`; these typed errors exist where a caller
//! may want to react to the kind of failure (e.g. skip a broken archive but not a missing
//! directory).

use std::path::PathBuf;

use thiserror::Error;

use crate::player::PlayerId;

/// Failures while discovering and instantiating players.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The plugin directory is missing or is not a directory.
    #[error("players' directory not found: '{}'", .0.display())]
    DirectoryNotFound(PathBuf),

    /// An archive could not be read or its manifest could not be parsed.
    #[error("malformed archive '{}': {reason}", .archive.display())]
    MalformedArchive {
        /// Path of the archive.
        archive: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// An archive names a unit that is not linked into the registry.
    #[error("unit '{symbol}' listed in '{}' is not registered", .archive.display())]
    UnresolvedUnit {
        /// Path of the archive.
        archive: PathBuf,
        /// Symbol that could not be resolved.
        symbol: String,
    },

    /// The unit's factory failed to build an instance.
    #[error("could not instantiate '{symbol}'")]
    Instantiation {
        /// Symbol of the failing unit.
        symbol: String,
        /// Error returned by the factory.
        #[source]
        source: anyhow::Error,
    },
}

/// The strong random source could not be read. Never fatal.
#[derive(Debug, Error)]
#[error("strong random source unavailable: {0}")]
pub struct RandomSourceUnavailable(pub String);

/// Failures while a match is being played.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A strategy answered with something other than cooperate or defect.
    #[error("'{engine}' returned an illegal decision in round {round}")]
    IllegalDecision {
        /// Engine name of the offending strategy.
        engine: String,
        /// Zero-based round index.
        round: usize,
    },

    /// The score table was asked to credit a player it does not know.
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Score table invariant violations.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The player is not a member of the population the table was seeded with.
    #[error("player {0} is not part of this tournament")]
    UnknownPlayer(PlayerId),
}
