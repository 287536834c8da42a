//! Logging configuration for lazyseq
//!
//! Query construction and execution emit `tracing` events. This module wires
//! them to a subscriber writing to stdout or stderr through a non-blocking
//! worker.

use crate::{Error, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to stderr, keeping stdout free for query results
    Stderr,
}

/// Log format style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format (default)
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Stderr,
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Info level on stderr
    pub fn info() -> Self {
        Self::default()
    }

    /// Debug level, shows query builds and cursor lifecycle
    pub fn debug() -> Self {
        Self::default().with_level("debug")
    }

    /// Trace level, additionally shows every visited element
    pub fn trace() -> Self {
        Self::default().with_level("trace")
    }

    /// Warn level
    pub fn warn() -> Self {
        Self::default().with_level("warn")
    }

    /// Set log output
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Installs the global subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level. The returned
    /// guard flushes pending events when dropped and must be kept alive.
    /// Fails with [`Error::Configuration`] if `RUST_LOG` or the configured
    /// level cannot be parsed, or a global subscriber is already installed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use lazyseq::logging::LogConfig;
    ///
    /// let _guard = LogConfig::debug().try_init()?;
    /// # Ok::<(), lazyseq::Error>(())
    /// ```
    pub fn try_init(self) -> Result<WorkerGuard> {
        let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let env_filter = resolve_filter(env_directives.as_deref(), &self.level)?;

        let (writer, guard) = match self.output {
            LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
            LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        };

        let registry = tracing_subscriber::registry().with(env_filter);
        let installed = match self.format {
            LogFormat::Pretty => registry
                .with(fmt::layer().with_writer(writer).pretty())
                .try_init(),
            LogFormat::Compact => registry
                .with(fmt::layer().with_writer(writer).compact())
                .try_init(),
        };
        installed.map_err(|e| Error::Configuration(format!("cannot install logger: {}", e)))?;

        Ok(guard)
    }
}

// Environment directives win over the configured level, and must parse.
fn resolve_filter(env_directives: Option<&str>, level: &str) -> Result<EnvFilter> {
    match env_directives {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| {
            Error::Configuration(format!(
                "invalid {} '{}': {}",
                EnvFilter::DEFAULT_ENV,
                directives,
                e
            ))
        }),
        None => level_filter(level),
    }
}

fn level_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| Error::Configuration(format!("invalid log level '{}': {}", level, e)))
}
