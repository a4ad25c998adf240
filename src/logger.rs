use std::fs::File;

use anyhow::Context;
use time::{format_description, OffsetDateTime, UtcOffset};
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::fmt::{time::OffsetTime, writer::BoxMakeWriter};
use tracing_subscriber::FmtSubscriber;

const LOG_FILE_FORMAT: &str = "[year]-[month]-[day]_[hour]:[minute]:[second]_melee.txt";
const EVENT_TIME_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

/// Sends every event of the run, down to TRACE, to `<date>_<time>_melee.txt` in the working
/// directory.
///
/// # Errors
/// If the file cannot be created or another global subscriber is already installed.
pub fn init_logger() -> anyhow::Result<()> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let file_name = log_file_name(OffsetDateTime::now_utc().to_offset(offset))?;
    let file = File::create(&file_name).with_context(|| format!("cannot create '{file_name}'"))?;
    let timer = OffsetTime::new(offset, format_description::parse(EVENT_TIME_FORMAT)?);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(BoxMakeWriter::new(file))
        .finish();

    set_global_default(subscriber).context(
        "could not set global default tracing subscriber. Disable IPD_LOG if the caller already sets one",
    )
}

/// Warnings and errors only, on stderr, for runs without a log file.
pub fn init_console_logger() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    set_global_default(subscriber).context("could not set global default tracing subscriber")
}

fn log_file_name(at: OffsetDateTime) -> anyhow::Result<String> {
    let format = format_description::parse(LOG_FILE_FORMAT)?;
    Ok(at.format(&format)?)
}
