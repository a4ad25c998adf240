use std::process::ExitCode;

use ipd_melee::logger::init_console_logger;
use ipd_melee::prelude::*;
use tracing::error;

fn main() -> ExitCode {
    let mut config = Configuration::from_env();
    if let Some(dir) = std::env::args().nth(1) {
        config = config.with_players_dir(dir);
    }

    // otherwise `Tournament::new` installs the file logger
    let log_to_file = config.log();
    if !log_to_file {
        if let Err(e) = init_console_logger() {
            eprintln!("{e:#}");
        }
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            if log_to_file {
                eprintln!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: Configuration) -> anyhow::Result<()> {
    let verbose = config.verbose();
    let tournament = Tournament::new(config, StrategyRegistry::with_classic_players())?;
    let result = tournament.run_configured()?;

    if verbose {
        println!("--- Final Result ---");
    }
    print!("{}", result.leaderboard());
    Ok(())
}
