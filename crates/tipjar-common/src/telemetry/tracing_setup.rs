//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to the
//! whole tree. Output is plain text for people and JSON for log shippers.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Subscriber options.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Emit enter/exit events for instrumented spans
    pub span_events: bool,
    /// Annotate lines with file and line number
    pub locations: bool,
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Text,
            span_events: false,
            locations: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Chatty text output for local work.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            span_events: true,
            thread_names: true,
            ..Self::default()
        }
    }

    /// JSON lines for production log collection.
    #[must_use]
    pub fn production() -> Self {
        Self {
            format: LogFormat::Json,
            locations: false,
            ..Self::default()
        }
    }

    fn span_mode(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber with defaults.
///
/// Safe to call twice; the second call reports
/// [`TracingError::AlreadyInstalled`] instead of panicking.
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::default())
}

/// Install the global subscriber with explicit options.
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
    let base = tracing_subscriber::registry().with(filter);

    // .json() changes the layer's type, so the two encodings part ways here
    let outcome = match config.format {
        LogFormat::Json => base
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.locations)
                    .with_line_number(config.locations)
                    .with_thread_names(config.thread_names)
                    .with_span_events(config.span_mode()),
            )
            .try_init(),
        LogFormat::Text => base
            .with(
                fmt::layer()
                    .with_file(config.locations)
                    .with_line_number(config.locations)
                    .with_thread_names(config.thread_names)
                    .with_span_events(config.span_mode()),
            )
            .try_init(),
    };

    outcome.map_err(|_| TracingError::AlreadyInstalled)
}

/// Subscriber installation errors.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}
