//! Run Logging
//!
//! A run writes to three sinks:
//!
//! - stdout, at the console level (`info` by default; `RUST_LOG` applies
//!   only when neither `--verbose` nor `--quiet` is given)
//! - `<run>.log`, a full debug transcript
//! - `<run>.errors.log`, warnings and errors only
//!
//! [`LogContext`] builds the subscriber explicitly. The binary installs it
//! once at start-up; library code only emits `tracing` events, so tests can
//! run components under their own subscriber.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::constants::logging;
use crate::types::{DepDocsError, Result, ResultExt};

/// Console verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "info",
            Self::Verbose => "debug",
        }
    }
}

/// Log sinks for one run
#[derive(Debug, Clone)]
pub struct LogContext {
    debug_log: PathBuf,
    error_log: PathBuf,
    verbosity: Verbosity,
}

impl LogContext {
    pub fn new(config: &LoggingConfig, verbosity: Verbosity) -> Self {
        Self {
            debug_log: config.debug_log_path(),
            error_log: config.error_log_path(),
            verbosity,
        }
    }

    pub fn debug_log(&self) -> &Path {
        &self.debug_log
    }

    pub fn error_log(&self) -> &Path {
        &self.error_log
    }

    /// Subscriber with the console and both file sinks; log files are truncated.
    pub fn subscriber(&self) -> Result<impl Subscriber + Send + Sync + 'static> {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        self.subscriber_with_console(std::io::stdout, env.as_deref())
    }

    fn subscriber_with_console<W>(
        &self,
        console: W,
        env: Option<&str>,
    ) -> Result<impl Subscriber + Send + Sync + 'static + use<W>>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let debug_file = create_log_file(&self.debug_log)?;
        let error_file = create_log_file(&self.error_log)?;

        Ok(tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(console)
                    .with_filter(console_filter(self.verbosity, env)?),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(debug_file))
                    .with_filter(LevelFilter::DEBUG),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(error_file))
                    .with_filter(LevelFilter::WARN),
            ))
    }

    /// Install as the process-wide subscriber
    pub fn install(&self) -> Result<()> {
        self.subscriber()?
            .try_init()
            .map_err(|e| DepDocsError::Config(format!("Logging already initialized: {}", e)))
    }
}

/// Console filter: an explicit verbosity flag beats `env` (the `RUST_LOG`
/// value), and file-only events are always hidden.
fn console_filter(verbosity: Verbosity, env: Option<&str>) -> Result<EnvFilter> {
    let filter = match (verbosity, env) {
        (Verbosity::Normal, Some(env)) => EnvFilter::try_new(env).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid {}: {}", EnvFilter::DEFAULT_ENV, e);
            EnvFilter::new(verbosity.directive())
        }),
        _ => EnvFilter::new(verbosity.directive()),
    };
    let file_only: Directive = format!("{}=off", logging::FILE_ONLY_TARGET)
        .parse()
        .map_err(|e| DepDocsError::Config(format!("Invalid log directive: {}", e)))?;
    Ok(filter.add_directive(file_only))
}

fn create_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).at_path(parent)?;
    }
    File::create(path).at_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logging_config(temp: &TempDir) -> LoggingConfig {
        LoggingConfig {
            dir: temp.path().join("logs"),
            run_name: "lineage".to_string(),
        }
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn test_file_sinks_split_by_level() {
        let temp = TempDir::new().unwrap();
        let ctx = LogContext::new(&logging_config(&temp), Verbosity::Quiet);

        tracing::subscriber::with_default(ctx.subscriber().unwrap(), || {
            tracing::debug!("debug detail");
            tracing::info!("progress line");
            tracing::warn!("sheet missing");
            tracing::error!("tool failed");
        });

        let full = fs::read_to_string(ctx.debug_log()).unwrap();
        let errors = fs::read_to_string(ctx.error_log()).unwrap();

        assert!(full.contains("debug detail"));
        assert!(full.contains("progress line"));
        assert!(full.contains("sheet missing"));
        assert!(!errors.contains("debug detail"));
        assert!(!errors.contains("progress line"));
        assert!(errors.contains("sheet missing"));
        assert!(errors.contains("tool failed"));
        assert!(ctx.error_log().ends_with("lineage.errors.log"));
    }

    #[test]
    fn test_file_only_events_skip_console() {
        let temp = TempDir::new().unwrap();
        let ctx = LogContext::new(&logging_config(&temp), Verbosity::Normal);
        let console = Capture::default();
        let sink = console.clone();
        let subscriber = ctx
            .subscriber_with_console(move || sink.clone(), None)
            .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("progress line");
            tracing::error!(target: logging::FILE_ONLY_TARGET, "Run failed: boom");
        });

        let shown = console.text();
        assert!(shown.contains("progress line"));
        assert!(!shown.contains("boom"));
        let errors = fs::read_to_string(ctx.error_log()).unwrap();
        assert!(errors.contains("Run failed: boom"));
    }

    #[test]
    fn test_flags_beat_rust_log() {
        let level = |v, env| console_filter(v, env).unwrap().max_level_hint();
        assert_eq!(level(Verbosity::Verbose, Some("warn")), Some(LevelFilter::DEBUG));
        assert_eq!(level(Verbosity::Quiet, Some("trace")), Some(LevelFilter::ERROR));
        assert_eq!(level(Verbosity::Normal, Some("warn")), Some(LevelFilter::WARN));
        assert_eq!(level(Verbosity::Normal, None), Some(LevelFilter::INFO));
    }
}
