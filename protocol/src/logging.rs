//! # Structured Logging
//!
//! Optional `tracing` subscriber setup for binaries and tests that embed this
//! crate. The library itself only emits events; it never installs a
//! subscriber on its own.
//!
//! Events carry the seed version, the network and, for new accounts, the
//! public account number. Seeds, phrases and key bytes are never logged.

use std::str::FromStr;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output for local development.
    #[default]
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

impl LogFormat {
    /// Parse a format string. Accepts "json" or "pretty" (case-insensitive).
    /// Returns `Pretty` for any unrecognized value.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogFormat::from_str_lossy(s))
    }
}

/// Install a global subscriber writing to stderr.
///
/// `default_level` applies when `RUST_LOG` is unset, e.g. `"info"` or
/// `"bitmark_account=debug"`. Fails if a global subscriber is already set,
/// so calling it twice is harmless.
pub fn init_logging(default_level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()?,
    }

    tracing::info!(format = ?format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(LogFormat::from_str_lossy("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_lossy("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str_lossy("xml"), LogFormat::Pretty);
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
    }

    #[test]
    fn test_second_init_fails_cleanly() {
        let first = init_logging("warn", LogFormat::Pretty);
        let second = init_logging("warn", LogFormat::Json);
        // Another test in this binary may have won the race, but at most one
        // call can succeed.
        assert!(!(first.is_ok() && second.is_ok()));
        assert!(second.is_err());
    }
}
