//! Text reports printed around a tournament.

use std::fmt;

use crate::player::{Player, PlayerId};
use crate::tournament_scheduler::ScoreTable;

/// One line of the final ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub id: PlayerId,
    pub engine: String,
    pub score: u64,
}

/// Players sorted by descending score; ties keep load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    standings: Vec<Standing>,
}

impl Leaderboard {
    /// Players missing from `scores` are ranked with zero.
    pub fn new(players: &[Player], scores: &ScoreTable) -> Self {
        let mut standings: Vec<Standing> = players
            .iter()
            .map(|player| Standing {
                id: player.id,
                engine: player.engine_name().to_owned(),
                score: scores.get(player.id).unwrap_or_default(),
            })
            .collect();
        // stable sort: equal scores stay in load order
        standings.sort_by(|a, b| b.score.cmp(&a.score));
        Leaderboard { standings }
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}

impl fmt::Display for Leaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for standing in &self.standings {
            writeln!(f, " > {:5} {}", standing.score, standing.engine)?;
        }
        Ok(())
    }
}

/// `developer -> engine`, one line per loaded player.
pub struct LoadedPlayers<'a>(pub &'a [Player]);

impl fmt::Display for LoadedPlayers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for player in self.0 {
            writeln!(f, "{} -> {}", player.developer_name(), player.engine_name())?;
        }
        Ok(())
    }
}
