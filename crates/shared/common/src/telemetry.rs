//! Tracing subscriber initialisation.

use std::str::FromStr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Minimum level of emitted log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    Debug,
    #[default]
    Information,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Information => "info",
            LogLevel::Warning => "warn",
            // tracing has no level above error
            LogLevel::Error | LogLevel::Fatal => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verbose" | "trace" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            "information" | "info" => Ok(LogLevel::Information),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" | "critical" => Ok(LogLevel::Fatal),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Initialize tracing subscriber.
///
/// `RUST_LOG` wins over `level` when set.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
