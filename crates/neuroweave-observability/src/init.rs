// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for Neuroweave
//!
//! Console logging is always available. With the `file-logging` feature,
//! [`init_logging`] additionally writes one rolling file per crate plus a
//! combined file into a timestamped run folder, with retention cleanup.

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LogOutput, LoggingConfig};

/// Build the console filter
///
/// `RUST_LOG` wins when set and no debug flag was given; otherwise the debug
/// flags raise their crates to `debug` on top of `config.level`.
pub fn build_env_filter(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<EnvFilter> {
    if !debug_flags.any_enabled() {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
    }
    let directives = debug_flags.to_filter_string_with_default(&config.level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

fn console_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let writer = match config.output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);
    match config.format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Initialize console-only logging
///
/// # Errors
/// Fails if the filter directives do not parse or a global subscriber is
/// already installed.
pub fn init_console_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(debug_flags, config)?;
    tracing_subscriber::registry()
        .with(console_layer(config).with_filter(filter))
        .try_init()
        .context("Failed to install the global tracing subscriber")
}

#[cfg(feature = "file-logging")]
pub use file::{init_logging, init_logging_default, LoggingGuard};

#[cfg(feature = "file-logging")]
mod file {
    use super::*;
    use chrono::{NaiveDateTime, Utc};
    use std::path::{Path, PathBuf};
    use tracing_appender::rolling;

    /// Keeps the non-blocking writers alive; logs are flushed on drop
    pub struct LoggingGuard {
        _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        /// Get the log directory path
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }
    }

    /// Initialize logging with file output and console output
    ///
    /// Creates a timestamped folder structure:
    /// ```text
    /// ./logs/
    ///   └── run_20250101_120000/
    ///       ├── neuroweave-engine.log
    ///       ├── neuroweave-plasticity.log
    ///       └── neuroweave.log (combined)
    /// ```
    ///
    /// # Arguments
    /// * `debug_flags` - Per-crate debug flags for filtering
    /// * `config` - Console format/level; `file_path` is the base directory (default: `./logs`)
    /// * `retention_days` - Keep logs for N days (default: 30)
    /// * `retention_runs` - Keep N most recent runs (default: 10)
    pub fn init_logging(
        debug_flags: &CrateDebugFlags,
        config: &LoggingConfig,
        retention_days: Option<u64>,
        retention_runs: Option<usize>,
    ) -> Result<LoggingGuard> {
        let base_log_dir = config
            .file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("./logs"));

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let run_folder = base_log_dir.join(format!("run_{}", timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        cleanup_old_logs(&base_log_dir, retention_days, retention_runs)?;

        let mut layers = Vec::new();
        let mut file_guards = Vec::new();

        layers.push(
            console_layer(config)
                .with_filter(build_env_filter(debug_flags, config)?)
                .boxed(),
        );

        // One file per crate
        for crate_name in crate::KNOWN_CRATES {
            let file_appender = rolling::daily(&run_folder, format!("{}.log", crate_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            file_guards.push(guard);

            let directives = format!(
                "{}=debug,{}=debug,off",
                crate_name,
                crate_name.replace('-', "_")
            );
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(EnvFilter::try_new(&directives)?)
                .boxed();
            layers.push(file_layer);
        }

        // Combined log file (all crates)
        let combined_appender = rolling::daily(&run_folder, "neuroweave.log");
        let (combined_non_blocking, combined_guard) =
            tracing_appender::non_blocking(combined_appender);
        file_guards.push(combined_guard);

        let combined_layer = tracing_subscriber::fmt::layer()
            .with_writer(combined_non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(build_env_filter(debug_flags, config)?)
            .boxed();
        layers.push(combined_layer);

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .context("Failed to install the global tracing subscriber")?;

        Ok(LoggingGuard {
            _file_guards: file_guards,
            log_dir: run_folder,
        })
    }

    /// Initialize file logging with default retention
    pub fn init_logging_default(
        debug_flags: &CrateDebugFlags,
        config: &LoggingConfig,
    ) -> Result<LoggingGuard> {
        init_logging(debug_flags, config, None, None)
    }

    /// Remove run folders older than `retention_days`, then all but the newest
    /// `retention_runs`
    pub(crate) fn cleanup_old_logs(
        base_log_dir: &Path,
        retention_days: Option<u64>,
        retention_runs: Option<usize>,
    ) -> Result<()> {
        if !base_log_dir.exists() {
            return Ok(());
        }

        let retention_days = retention_days.unwrap_or(30);
        let retention_runs = retention_runs.unwrap_or(10);
        let cutoff_date = Utc::now().naive_utc() - chrono::Duration::days(retention_days as i64);

        let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
        for entry in std::fs::read_dir(base_log_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let stamp = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix("run_"))
                .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y%m%d_%H%M%S").ok());
            if let Some(dt) = stamp {
                runs.push((path, dt));
            }
        }

        // Oldest first
        runs.sort_by_key(|(_, dt)| *dt);

        let (expired, recent): (Vec<_>, Vec<_>) =
            runs.into_iter().partition(|(_, dt)| *dt < cutoff_date);
        let surplus = recent.len().saturating_sub(retention_runs);

        for (path, _) in expired.iter().chain(recent.iter().take(surplus)) {
            if let Err(e) = std::fs::remove_dir_all(path) {
                eprintln!(
                    "Warning: Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                );
            }
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use tempfile::tempdir;

        #[test]
        fn test_cleanup_keeps_newest_runs() {
            let dir = tempdir().unwrap();
            let now = Utc::now().naive_utc();
            let mut names = Vec::new();
            for hours in 1..=4 {
                let stamp = (now - chrono::Duration::hours(hours)).format("%Y%m%d_%H%M%S");
                let name = format!("run_{}", stamp);
                std::fs::create_dir_all(dir.path().join(&name)).unwrap();
                names.push(name);
            }
            // Stale run and an unrelated folder
            std::fs::create_dir_all(dir.path().join("run_20000101_000000")).unwrap();
            std::fs::create_dir_all(dir.path().join("keep_me")).unwrap();

            cleanup_old_logs(dir.path(), Some(30), Some(2)).unwrap();

            assert!(dir.path().join(&names[0]).exists());
            assert!(dir.path().join(&names[1]).exists());
            assert!(!dir.path().join(&names[2]).exists());
            assert!(!dir.path().join(&names[3]).exists());
            assert!(!dir.path().join("run_20000101_000000").exists());
            assert!(dir.path().join("keep_me").exists());
        }
    }
}
