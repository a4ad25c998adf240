use std::fs;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use ipd_melee::prelude::*;
use ipd_melee::tournament_scheduler::ScoreTable;
use tempfile::TempDir;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};

/// Counts ERROR events.
#[derive(Clone, Default)]
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn tournament(registry: StrategyRegistry) -> Tournament {
    init_test_logger();
    let config = Configuration::new().with_verbose(false).with_seed(Some(7));
    Tournament::new(config, registry).unwrap()
}

fn arena(archives: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (file, content) in archives {
        fs::write(dir.path().join(file), content).unwrap();
    }
    dir
}

struct Silent;

impl Strategy for Silent {
    fn developer_name(&self) -> &str {
        "tests"
    }

    fn engine_name(&self) -> &str {
        "Silent"
    }

    fn decide(&mut self, _prior_opponent_decision: Decision) -> Decision {
        Decision::None
    }
}

#[test]
fn empty_directory_gives_empty_leaderboard() {
    let dir = arena(&[]);
    let result = tournament(StrategyRegistry::with_classic_players())
        .run(dir.path())
        .unwrap();

    assert!(result.players.is_empty());
    assert!(result.scores.is_empty());
    assert_eq!(result.matches_played, 0);
    assert!(result.leaderboard().is_empty());
}

#[test]
fn support_units_do_not_join_the_population() {
    let dir = arena(&[(
        "one.par",
        "archive: one\nentries:\n  - classic/pavlov.unit\n  - classic/history.unit\n",
    )]);
    let result = tournament(StrategyRegistry::with_classic_players())
        .run(dir.path())
        .unwrap();

    assert_eq!(result.players.len(), 1);
    assert_eq!(result.matches_played, 0);
    assert_eq!(result.scores.get(result.players[0].id), Some(0));
    assert_eq!(result.leaderboard().to_string(), " >     0 Pavlov\n");
}

#[test]
fn missing_directory_is_fatal() {
    let dir = arena(&[]);
    let err = tournament(StrategyRegistry::with_classic_players())
        .run(dir.path().join("gone"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::DirectoryNotFound(_))
    ));
}

#[test]
fn unresolved_unit_aborts_before_any_match() {
    let dir = arena(&[(
        "a.par",
        "archive: a\nentries:\n  - classic/tit_for_tat.unit\n  - classic/tit_for_three_tats.unit\n",
    )]);
    let err = tournament(StrategyRegistry::with_classic_players())
        .run(dir.path())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::UnresolvedUnit { .. })
    ));
}

#[test]
fn fatal_load_error_is_logged_once_by_the_caller() {
    let dir = arena(&[("a.par", "archive: a\nentries:\n  - classic/ghost.unit\n")]);
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    tracing::subscriber::with_default(subscriber, || {
        let config = Configuration::new().with_verbose(false);
        let tournament = Tournament::new(config, StrategyRegistry::with_classic_players()).unwrap();
        let err = tournament.run(dir.path()).unwrap_err();
        // what the melee binary does with a fatal error
        tracing::error!("{err:#}");
    });

    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
}

#[test]
fn skip_invalid_players_keeps_the_rest() {
    let dir = arena(&[
        ("a.par", "archive: a\nentries:\n  - classic/ghost.unit\n"),
        ("b.par", "archive b\n"),
        (
            "c.par",
            "archive: c\nentries:\n  - classic/always_defect.unit\n  - classic/always_cooperate.unit\n",
        ),
    ]);
    init_test_logger();
    let config = Configuration::new()
        .with_verbose(false)
        .with_skip_invalid_players(true);
    let result = Tournament::new(config, StrategyRegistry::with_classic_players())
        .unwrap()
        .run(dir.path())
        .unwrap();

    assert_eq!(result.players.len(), 2);
    assert_eq!(result.matches_played, 1);
    let board = result.leaderboard();
    assert_eq!(board.winner().unwrap().engine, "Always Defect");
    assert_eq!(board.winner().unwrap().score, 1000);
}

#[test]
fn identical_players_score_separately() {
    let dir = arena(&[(
        "crowd.par",
        "archive: crowd\nentries:\n  - classic/always_cooperate.unit\n  - classic/always_cooperate.unit\n  - classic/always_defect.unit\n",
    )]);
    let result = tournament(StrategyRegistry::with_classic_players())
        .run(dir.path())
        .unwrap();

    assert_eq!(result.matches_played, 3);
    let scores: Vec<_> = result.scores.iter().map(|(_, score)| score).collect();
    assert_eq!(scores, vec![600, 600, 2000]);
    assert_eq!(
        result.leaderboard().to_string(),
        " >  2000 Always Defect\n >   600 Always Cooperate\n >   600 Always Cooperate\n"
    );
}

#[test]
fn illegal_decision_stops_the_tournament() {
    let dir = arena(&[(
        "a.par",
        "archive: a\nentries:\n  - classic/tit_for_tat.unit\n  - tests/silent.unit\n",
    )]);
    let registry =
        StrategyRegistry::with_classic_players().with_strategy("tests::silent", || Ok(Box::new(Silent)));
    let err = tournament(registry).run(dir.path()).unwrap_err();

    let Some(MatchError::IllegalDecision { engine, .. }) = err.downcast_ref::<MatchError>() else {
        panic!("expected an illegal decision, got {err:#}");
    };
    assert_eq!(engine, "Silent");
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = arena(&[(
        "classics.par",
        "archive: classics\nentries:\n  - classic/tit_for_tat.unit\n  - classic/suspicious_tit_for_tat.unit\n  - classic/tit_for_two_tats.unit\n  - classic/grim_trigger.unit\n  - classic/pavlov.unit\n  - classic/always_defect.unit\n",
    )]);
    let run = || -> ScoreTable {
        tournament(StrategyRegistry::with_classic_players())
            .run(dir.path())
            .unwrap()
            .scores
    };
    assert_eq!(run(), run());
}

#[test]
fn shipped_archive_loads() {
    init_test_logger();
    let config = Configuration::new()
        .with_verbose(false)
        .with_players_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/players"));
    let result = Tournament::new(config, StrategyRegistry::with_classic_players())
        .unwrap()
        .run_configured()
        .unwrap();

    assert_eq!(result.players.len(), 8);
    assert_eq!(result.matches_played, 28);
    assert_eq!(result.scores.len(), 8);
}
