//! Logging setup
//!
//! Library code only emits `tracing` events; the binary installs a subscriber
//! here. `RUST_LOG` directives are honoured on top of the configured level.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors that can occur when installing the subscriber
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A filter directive could not be parsed
    #[error("Invalid log directive: {0}")]
    InvalidDirective(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber was already installed
    #[error("Failed to initialize logger: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Maximum level emitted unless `RUST_LOG` says otherwise
    pub level: Level,
    /// Whether to include timestamps
    pub with_timestamps: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_timestamps: false,
        }
    }
}

/// Builds the filter: configured level, `RUST_LOG`, and quiet HTTP internals
fn build_filter(level: Level) -> Result<EnvFilter, LoggerError> {
    Ok(EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?))
}

/// Installs the global subscriber, writing to stderr
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    let filter = build_filter(config.level)?;
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    if config.with_timestamps {
        tracing_subscriber::registry().with(filter).with(layer).try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.without_time())
            .try_init()?;
    }

    tracing::debug!(level = %config.level, "logger initialized");
    Ok(())
}
