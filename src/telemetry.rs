use crate::error::Result;
use std::{fs::create_dir_all, path::PathBuf};
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_DIR: &str = ".logs";
const LOG_FILE: &str = "tweet-relay.log";

fn logfile() -> Result<RollingFileAppender> {
    let log_dir_path = PathBuf::from(LOG_DIR);
    create_dir_all(&log_dir_path)?;

    Ok(if cfg!(debug_assertions) {
        rolling::daily(log_dir_path, LOG_FILE)
    } else {
        rolling::never(log_dir_path, LOG_FILE)
    })
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber: stdout for operators, `.logs/` for history.
///
/// # Errors
///
/// Returns `Error::Io` if the log directory can't be created.
#[cfg(not(feature = "bunyan"))]
pub fn setup_logger() -> Result<()> {
    let logfile = logfile()?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(logfile))
        .init();

    Ok(())
}

/// Install the global subscriber with bunyan JSON output in the log file.
///
/// # Errors
///
/// Returns `Error::Io` if the log directory can't be created.
#[cfg(feature = "bunyan")]
pub fn setup_logger() -> Result<()> {
    use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};

    let formatter = BunyanFormattingLayer::new("tweet-relay".into(), logfile()?);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .with(JsonStorageLayer)
        .with(formatter)
        .init();

    Ok(())
}
