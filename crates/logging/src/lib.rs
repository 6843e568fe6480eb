//! This crate provides logging initialization for the MCP file server.
//!
//! It supports two modes:
//! - ServerForeground mode: logs to STDERR and, when a log directory is given, to a rolling file.
//! - ServerBackground mode: logs JSON lines to a rolling file in the given log directory.
//!
//! The server logs are rolled over when they reach 5 MB. Rotated logs are
//! compressed. The maximum number of rotated logs is 20.

use anyhow::Result;
use file_rotate::{ContentLimit, FileRotate, compression::Compression, suffix::AppendCount};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt::writer::MakeWriterExt};

const LOG_FILE_NAME: &str = "fileserver.log";

pub enum LogMode {
    ServerForeground { log_dir: Option<PathBuf> },
    ServerBackground { log_dir: PathBuf },
}

/// Guard that keeps background logging workers alive.
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

pub fn init(mode: LogMode, verbose: bool) -> Result<Option<LoggingGuards>> {
    let filter = build_filter(verbose);

    match mode {
        LogMode::ServerForeground { log_dir: None } => {
            let (stderr_non_blocking, stderr_guard) = stderr_writer();

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(stderr_non_blocking)
                .with_ansi(false)
                .init();

            Ok(Some(LoggingGuards {
                _guards: vec![stderr_guard],
            }))
        }
        LogMode::ServerForeground {
            log_dir: Some(log_dir),
        } => {
            let (file_non_blocking, file_guard) =
                tracing_appender::non_blocking(rolling_file(&log_dir)?);
            let (stderr_non_blocking, stderr_guard) = stderr_writer();

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(
                    file_non_blocking
                        .with_max_level(tracing::Level::INFO)
                        .and(stderr_non_blocking),
                )
                .with_ansi(false)
                .init();

            Ok(Some(LoggingGuards {
                _guards: vec![file_guard, stderr_guard],
            }))
        }
        LogMode::ServerBackground { log_dir } => {
            let (non_blocking, guard) = tracing_appender::non_blocking(rolling_file(&log_dir)?);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking.with_max_level(tracing::Level::INFO))
                .with_ansi(false)
                .json()
                .init();

            Ok(Some(LoggingGuards {
                _guards: vec![guard],
            }))
        }
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

// Callers may not drain stderr, so buffered lines are capped and the overflow dropped.
fn stderr_writer() -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard) {
    NonBlockingBuilder::default()
        .lossy(true)
        .buffered_lines_limit(10_000)
        .finish(std::io::stderr())
}

fn rolling_file(log_dir: &Path) -> Result<FileRotate<AppendCount>> {
    std::fs::create_dir_all(log_dir)?;

    Ok(FileRotate::new(
        log_dir.join(LOG_FILE_NAME),
        AppendCount::new(20),
        ContentLimit::Bytes(5 * 1024 * 1024),
        Compression::OnRotate(1),
        None,
    ))
}
