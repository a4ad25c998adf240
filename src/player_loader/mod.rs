use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};

use crate::{
    configuration::Configuration,
    error::LoadError,
    player::{Player, PlayerId},
    registry::{StrategyRegistry, Unit},
};

pub mod archive;

use archive::ARCHIVE_EXTENSION;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Builds the population from every player archive of `directory`.
///
/// Archives are visited in file-name order and their units in manifest order; each
/// conforming unit is instantiated once. Units that exist but are not strategies are
/// skipped. Any other failure aborts the whole load, unless
/// [`Configuration::with_skip_invalid_players`] is set, in which case the faulty archive
/// or unit is skipped with a warning.
#[instrument(skip(registry, config))]
pub fn collect_players(
    directory: impl AsRef<Path> + std::fmt::Debug,
    registry: &StrategyRegistry,
    config: &Configuration,
) -> Result<Vec<Player>, LoadError> {
    let verbose = config.verbose;
    let skip_invalid = config.skip_invalid_players;
    let directory = directory.as_ref();

    let archives = list_archives(directory)?;
    info!(archives=?archives);

    let longest_name = archives
        .iter()
        .filter_map(|path| path.file_name())
        .fold(0, |acu, name| acu.max(name.len()))
        + 3; // at least 3 dots

    if verbose && !archives.is_empty() {
        println!("Collecting players...");
    }

    let mut players = Vec::new();
    for path in archives {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if verbose {
            print!("Collecting {name:·<longest_name$} ");
            let _ = std::io::stdout().flush(); // try to flush stdout
        }

        let archive = match archive::read_archive(&path) {
            Ok(archive) => archive,
            Err(e) => {
                let err = LoadError::MalformedArchive {
                    archive: path.clone(),
                    reason: format!("{e:#}"),
                };
                if verbose {
                    println!("{RED}{e:#}{RESET}");
                }
                tolerate(err, skip_invalid)?;
                continue;
            }
        };
        debug!(archive = %archive.name, entries = archive.entries.len(), "manifest read");

        let mut skipped = 0;
        for symbol in archive.unit_symbols() {
            match instantiate(registry, &path, &symbol, players.len()) {
                Ok(Some(player)) => {
                    info!("loaded {player} from '{symbol}'");
                    players.push(player);
                }
                Ok(None) => debug!("'{symbol}' is not a player, skipped"),
                Err(err) => {
                    if verbose && !skip_invalid {
                        println!("{RED}{err}{RESET}");
                    }
                    tolerate(err, skip_invalid)?;
                    skipped += 1;
                }
            }
        }

        if verbose {
            if skipped > 0 {
                println!("{YELLOW}{skipped} unit(s) skipped{RESET}");
            } else {
                println!("{GREEN}Ok{RESET}");
            }
        }
    }

    Ok(players)
}

/// `Ok(None)` for a unit that exists but cannot play.
fn instantiate(
    registry: &StrategyRegistry,
    archive: &Path,
    symbol: &str,
    loaded: usize,
) -> Result<Option<Player>, LoadError> {
    let Some(unit) = registry.resolve(symbol) else {
        return Err(LoadError::UnresolvedUnit {
            archive: archive.to_path_buf(),
            symbol: symbol.to_string(),
        });
    };
    let Unit::Strategy(factory) = unit else {
        return Ok(None);
    };
    let strategy = factory().map_err(|source| LoadError::Instantiation {
        symbol: symbol.to_string(),
        source,
    })?;
    let id = PlayerId(loaded as u32 + 1);
    Ok(Some(Player::new(id, symbol.to_string(), strategy)))
}

/// Hands the error back to the caller, who reports it, or logs it and lets loading go on.
fn tolerate(err: LoadError, skip_invalid: bool) -> Result<(), LoadError> {
    if skip_invalid {
        warn!("skipping: {err}");
        Ok(())
    } else {
        debug!("player collection aborted");
        Err(err)
    }
}

/// Regular files with the archive extension, sorted by file name.
fn list_archives(directory: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !directory.is_dir() {
        return Err(LoadError::DirectoryNotFound(directory.to_path_buf()));
    }
    let entries = std::fs::read_dir(directory)
        .map_err(|_| LoadError::DirectoryNotFound(directory.to_path_buf()))?;

    let mut archives: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .is_some_and(|extension| extension == ARCHIVE_EXTENSION)
        })
        .collect();
    archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(archives)
}

#[cfg(test)]
mod player_loader_tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn quiet() -> Configuration {
        Configuration::new().with_verbose(false)
    }

    fn write(dir: &TempDir, file: &str, content: &str) {
        fs::write(dir.path().join(file), content).unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nowhere");
        let res = collect_players(&missing, &StrategyRegistry::with_classic_players(), &quiet());
        assert!(matches!(res, Err(LoadError::DirectoryNotFound(path)) if path == missing));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        write(&dir, "file.par", "archive: a\n");
        let path = dir.path().join("file.par");
        let res = collect_players(&path, &StrategyRegistry::with_classic_players(), &quiet());
        assert!(matches!(res, Err(LoadError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let players =
            collect_players(dir.path(), &StrategyRegistry::with_classic_players(), &quiet())
                .unwrap();
        assert!(players.is_empty());
    }

    #[test]
    fn test_archives_in_name_order() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "b.par",
            "archive: b\nentries:\n  - classic/always_defect.unit\n  - classic/pavlov.unit\n",
        );
        write(
            &dir,
            "a.par",
            "archive: a\nentries:\n  - classic/tit_for_tat.unit\n",
        );
        write(&dir, "notes.txt", "archive: ignored\n");
        fs::create_dir(dir.path().join("sub.par")).unwrap();

        let players =
            collect_players(dir.path(), &StrategyRegistry::with_classic_players(), &quiet())
                .unwrap();
        let symbols: Vec<_> = players.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(
            symbols,
            vec![
                "classic::tit_for_tat",
                "classic::always_defect",
                "classic::pavlov"
            ]
        );
        let ids: Vec<_> = players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlayerId(1), PlayerId(2), PlayerId(3)]);
    }

    #[test]
    fn test_support_units_are_not_players() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "mixed.par",
            "archive: mixed\nentries:\n  - classic/grim_trigger.unit\n  - classic/history.unit\n  - LICENSE\n",
        );
        let players =
            collect_players(dir.path(), &StrategyRegistry::with_classic_players(), &quiet())
                .unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].engine_name(), "Grim Trigger");
    }

    #[test]
    fn test_same_unit_twice_gives_two_players() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "twins.par",
            "archive: twins\nentries:\n  - classic/always_defect.unit\n  - classic/always_defect.unit\n",
        );
        let players =
            collect_players(dir.path(), &StrategyRegistry::with_classic_players(), &quiet())
                .unwrap();
        assert_eq!(players.len(), 2);
        assert_ne!(players[0], players[1]);
        assert_eq!(players[0].engine_name(), players[1].engine_name());
    }

    #[test]
    fn test_unresolved_unit_is_fatal_unless_skipped() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "a.par",
            "archive: a\nentries:\n  - classic/ghost.unit\n  - classic/tit_for_tat.unit\n",
        );
        let registry = StrategyRegistry::with_classic_players();

        let res = collect_players(dir.path(), &registry, &quiet());
        assert!(matches!(
            res,
            Err(LoadError::UnresolvedUnit { symbol, .. }) if symbol == "classic::ghost"
        ));

        let players = collect_players(
            dir.path(),
            &registry,
            &quiet().with_skip_invalid_players(true),
        )
        .unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, PlayerId(1));
    }

    #[test]
    fn test_malformed_archive() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.par", "entries:\n  - classic/pavlov.unit\n");
        write(&dir, "b.par", "archive: b\nentries:\n  - classic/pavlov.unit\n");
        let registry = StrategyRegistry::with_classic_players();

        let res = collect_players(dir.path(), &registry, &quiet());
        let Err(LoadError::MalformedArchive { archive, reason }) = res else {
            panic!("a.par should be rejected");
        };
        assert!(archive.ends_with("a.par"));
        assert!(reason.contains("Missing 'archive' key"));

        let players = collect_players(
            dir.path(),
            &registry,
            &quiet().with_skip_invalid_players(true),
        )
        .unwrap();
        assert_eq!(players.len(), 1);
    }

    #[test]
    fn test_factory_failure() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.par", "archive: a\nentries:\n  - broken.unit\n");
        let registry =
            StrategyRegistry::new().with_strategy("broken", || Err(anyhow::anyhow!("no constructor")));

        let res = collect_players(dir.path(), &registry, &quiet());
        let Err(LoadError::Instantiation { symbol, source }) = res else {
            panic!("broken factory should fail the load");
        };
        assert_eq!(symbol, "broken");
        assert_eq!(source.to_string(), "no constructor");
    }
}
