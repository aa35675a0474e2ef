//! Tracing setup: stdout plus one log file per desk launch.
//!
//! Launch logs live in the `logs` folder of the app root and are named
//! `riskdesk_<timestamp>.log`. Only the newest `max_files` survive a launch.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;
use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "riskdesk";
const FALLBACK_LEVEL: &str = "info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("No config directory available for desk logs")]
    NoLogRoot,
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to list launch logs in {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to prune launch log {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to timestamp launch log name: {0}")]
    FormatTime(time::error::Format),
    #[error("A global tracing subscriber is already installed: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
    #[error("Failed to create launch log {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The file this launch writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LaunchLog {
    dir: PathBuf,
    name: String,
}

impl LaunchLog {
    fn for_launch(dir: PathBuf, started: OffsetDateTime) -> Result<Self, LoggingError> {
        const NAME_FORMAT: &[FormatItem<'_>] =
            format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
        let stamp = started.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
        Ok(Self {
            dir,
            name: format!("{LOG_FILE_PREFIX}_{stamp}.log"),
        })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    fn create(&self) -> Result<(), LoggingError> {
        let path = self.path();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map(|_| ())
            .map_err(|source| LoggingError::CreateLogFile { path, source })
    }
}

/// Install the global subscriber. Later calls do nothing.
///
/// `RUST_LOG` overrides `settings.level`; an unparsable level falls back to
/// `info` and is reported once logging is up.
pub fn init(settings: &LoggingSettings) -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir().map_err(|error| match error {
        app_dirs::AppDirError::NoBaseDir => LoggingError::NoLogRoot,
        app_dirs::AppDirError::CreateDir { path, source } => {
            LoggingError::CreateDir { path, source }
        }
    })?;
    let launch = LaunchLog::for_launch(log_dir, now_local_or_utc())?;
    launch.create()?;
    prune_launch_logs(&launch, settings.max_files)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::never(&launch.dir, &launch.name));
    let (filter, rejected_level) = level_filter(&settings.level);
    let timer = local_timer();
    let subscriber = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Desk log at {}", launch.path().display());
    if let Some(level) = rejected_level {
        tracing::warn!("Ignoring log level {level:?}; using {FALLBACK_LEVEL}");
    }
    Ok(())
}

/// Delete the oldest `.log` files until at most `keep` remain. The current
/// launch's file is never removed.
fn prune_launch_logs(current: &LaunchLog, keep: usize) -> Result<(), LoggingError> {
    let dir = &current.dir;
    let active = current.path();
    let mut older: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)
        .map_err(|source| LoggingError::ReadDir {
            path: dir.clone(),
            source,
        })?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "log") && *path != active)
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();

    older.sort_by_key(|(modified, _)| *modified);
    let excess = (older.len() + 1).saturating_sub(keep.max(1));
    for (_, path) in older.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::RemoveFile { path, source })?;
    }
    Ok(())
}

fn local_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Filter from `RUST_LOG`, else the configured level. The second value is the
/// configured level when it had to be replaced.
fn level_filter(level: &str) -> (EnvFilter, Option<String>) {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return (filter, None);
    }
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(_) => (EnvFilter::new(FALLBACK_LEVEL), Some(level.to_string())),
    }
}
