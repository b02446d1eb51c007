use std::path::Path;

use tracing::subscriber::DefaultGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TODO_LOG=debug`
pub const LOG_ENV: &str = "TODO_LOG";
const DEFAULT_FILTER: &str = "info";

/// Keeps the file subscriber installed as the thread default until dropped.
pub struct LogGuard {
    _default: DefaultGuard,
}

/// Start logging to a daily file in `logs_dir`.
///
/// Logging is best-effort: if the file cannot be opened, `None` is returned
/// and the app runs without a log.
pub fn init(logs_dir: &Path) -> Option<LogGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("todo")
        .filename_suffix("log")
        .build(logs_dir)
        .ok()?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(appender)
        .finish();

    Some(LogGuard {
        _default: tracing::subscriber::set_default(subscriber),
    })
}
