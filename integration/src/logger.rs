/// Unified logger for centralized logging configuration

use bookmark_import_core::errors::{Result, SystemError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Include target module paths
    pub include_targets: bool,

    /// Include thread IDs
    pub include_thread_ids: bool,

    /// Colored output
    pub with_ansi: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_targets: true,
            include_thread_ids: false,
            with_ansi: true,
        }
    }
}

impl LoggerConfig {
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// `RUST_LOG` wins over the configured level when set
    fn filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| {
                SystemError::Configuration {
                    details: format!("invalid log level '{}': {}", self.level, e),
                }
                .into()
            })
    }
}

/// Unified logger
pub struct UnifiedLogger;

impl UnifiedLogger {
    /// Initialize the global logger. Output goes to stderr.
    pub fn init(config: LoggerConfig) -> Result<()> {
        let filter = config.filter()?;

        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_targets)
            .with_thread_ids(config.include_thread_ids)
            .with_ansi(config.with_ansi);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(console_layer);

        tracing::subscriber::set_global_default(subscriber).map_err(|e| SystemError::Configuration {
            details: e.to_string(),
        })?;

        tracing::info!("Logging initialized with level: {}", config.level);

        Ok(())
    }

    /// Initialize with default configuration
    pub fn init_default() -> Result<()> {
        Self::init(LoggerConfig::default())
    }
}
