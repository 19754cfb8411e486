//! Tracing setup for the `paycheck` binary.
//!
//! Logging is configured once, after the configuration file and flags are
//! resolved. Console output goes to stderr so the report on stdout can be
//! piped; the optional log file gets the same records without colour.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Local wall-clock time with milliseconds, e.g. `14:03:27.512`.
#[derive(Debug, Clone, Copy)]
struct LocalClock;

impl FormatTime for LocalClock {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Picks the filter directive: `RUST_LOG` when set and non-empty, otherwise
/// the configured level.
fn filter_directive(
    configured: &str,
    env: Option<String>,
) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => configured.to_string(),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Fails if the level is not a valid filter directive or the log file
/// cannot be opened. A subscriber installed earlier in the process is left
/// in place.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let directive = filter_directive(&config.level, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter =
        EnvFilter::try_new(&directive).with_context(|| format!("invalid log level '{directive}'"))?;

    let console = config.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_timer(LocalClock)
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
    });

    let file = match &config.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalClock)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    if tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .is_err()
    {
        tracing::debug!("subscriber already installed, keeping it");
    }
    Ok(())
}
