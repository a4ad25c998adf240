//! Match observers.
//!
//! The match runner reports what happens to a [`MatchObserver`]. [`ConsoleTrace`] renders the
//! classic text trace; [`NullObserver`] ignores everything.

use std::fmt::Write as _;
use std::io::{self, Write};

use tracing::warn;

use crate::player::Player;
use crate::strategy::Decision;

const BANNER_WIDTH: usize = 60;
const DECISION_WIDTH: usize = 24;

/// One played round, from the point of view of the (possibly swapped) match roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundRecord {
    /// Decisions of (player 1, player 2).
    pub decisions: (Decision, Decision),
    /// Payoffs displayed for (player 1, player 2).
    pub shown: (u32, u32),
    /// Payoffs actually scored for (player 1, player 2).
    pub delta: (u32, u32),
}

/// Receives the progress of a match. Every method defaults to doing nothing.
pub trait MatchObserver {
    /// Called once roles are assigned, before the first round.
    fn on_match_start(&mut self, _player_1: &Player, _player_2: &Player) {}

    /// Called after each round is scored.
    fn on_round(&mut self, _record: &RoundRecord) {}

    /// Called with the match totals of (player 1, player 2).
    fn on_match_end(&mut self, _totals: (u32, u32)) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl MatchObserver for NullObserver {}

/// Renders a text trace of each match and writes it when the match ends.
pub struct ConsoleTrace<W: Write> {
    out: W,
    buffer: String,
}

impl ConsoleTrace<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleTrace<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn centered(text: &str, width: usize) -> String {
    let pad = (width + text.chars().count()) / 2;
    format!("{text:>pad$}")
}

impl<W: Write> MatchObserver for ConsoleTrace<W> {
    fn on_match_start(&mut self, player_1: &Player, player_2: &Player) {
        let rule = "-".repeat(BANNER_WIDTH);
        self.buffer.clear();
        let _ = writeln!(self.buffer, "{rule}");
        let _ = writeln!(self.buffer, "{}", centered(player_1.engine_name(), BANNER_WIDTH));
        let _ = writeln!(self.buffer, "{}", centered("versus", BANNER_WIDTH));
        let _ = writeln!(self.buffer, "{}", centered(player_2.engine_name(), BANNER_WIDTH));
        let _ = writeln!(self.buffer, "{rule}");
    }

    fn on_round(&mut self, record: &RoundRecord) {
        let (d1, d2) = record.decisions;
        let (s1, s2) = record.shown;
        let _ = writeln!(
            self.buffer,
            "{d1:>width$} [{s1}] x [{s2}] {d2}",
            width = DECISION_WIDTH
        );
    }

    fn on_match_end(&mut self, totals: (u32, u32)) {
        let _ = write!(
            self.buffer,
            "{:>width$} --- {}",
            totals.0,
            totals.1,
            width = DECISION_WIDTH + 3
        );
        if let Err(e) = writeln!(self.out, "{}", self.buffer).and_then(|_| self.out.flush()) {
            warn!("could not write match trace: {e}");
        }
        self.buffer.clear();
    }
}

#[cfg(test)]
mod trace_tests {
    use super::*;
    use crate::players::{AlwaysCooperate, AlwaysDefect};

    #[test]
    fn test_console_trace_layout() {
        let p1 = Player::from_strategy(1, AlwaysDefect);
        let p2 = Player::from_strategy(2, AlwaysCooperate);
        let mut trace = ConsoleTrace::new(Vec::new());

        trace.on_match_start(&p1, &p2);
        trace.on_round(&RoundRecord {
            decisions: (Decision::Defect, Decision::Cooperate),
            shown: (5, 0),
            delta: (5, 0),
        });
        trace.on_match_end((5, 0));

        let text = String::from_utf8(trace.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "-".repeat(60));
        assert_eq!(lines[1].trim(), "Always Defect");
        assert_eq!(lines[2], format!("{:>33}", "versus"));
        assert_eq!(lines[3].trim(), "Always Cooperate");
        assert_eq!(lines[5], "                  DEFECT [5] x [0] COOPERATE");
        assert_eq!(lines[6], format!("{:>27} --- 0", 5));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_centering() {
        assert_eq!(centered("ab", 6), "  ab");
        assert_eq!(centered("", 4), "  ");
    }
}
