use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Daily-rotated file. Used by the TUI, which owns the terminal.
    File(PathBuf),
}

/// Default directive for a verbosity level.
/// 0 = info, 1 = debug (hyper/reqwest internals at warn), 2+ = trace; quiet wins.
pub fn filter_directive(verbose_level: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose_level {
        0 => "info",
        1 => "debug,hyper=warn,reqwest=warn,rustls=warn",
        _ => "trace",
    }
}

pub fn init_logging(verbose_level: u8, quiet: bool, target: LogTarget) -> Result<()> {
    // RUST_LOG overrides everything except --quiet
    let filter = if quiet {
        EnvFilter::new(filter_directive(verbose_level, true))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose_level, false)))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stderr().is_terminal() && target == LogTarget::Stderr);

    let registry = Registry::default().with(filter);

    match target {
        LogTarget::File(path) => {
            let file_appender = rolling_appender(&path)?;
            if json {
                let layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(file_appender);
                registry.with(layer).try_init()?;
            } else {
                let layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(file_appender);
                registry.with(layer).try_init()?;
            }
        }
        LogTarget::Stderr => {
            if json {
                let layer =
                    fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr);
                registry.with(layer).try_init()?;
            } else {
                let layer = fmt::layer().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr);
                registry.with(layer).try_init()?;
            }
        }
    }

    Ok(())
}

/// `logs/popcorn.log` rotates to `logs/popcorn.2026-10-16` and so on
fn rolling_appender(path: &Path) -> Result<RollingFileAppender> {
    let log_dir = path.parent().ok_or_else(|| anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let prefix = log_prefix(path)?;
    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, prefix))
}

fn log_prefix(path: &Path) -> Result<&str> {
    let file_name =
        path.file_name().and_then(|n| n.to_str()).ok_or_else(|| anyhow!("Invalid log filename"))?;
    Ok(file_name.rsplit_once('.').map(|(stem, _)| stem).filter(|s| !s.is_empty()).unwrap_or(file_name))
}
