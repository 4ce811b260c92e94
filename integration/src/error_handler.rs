/// Failure tracking for bookmark imports

use bookmark_import_core::errors::{BookmarkImportError, ImportError, ParseError, SystemError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, warn};

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// The service itself is misconfigured or broken
    Critical,
    /// The file could not be imported
    Error,
    /// The file was rejected by a pre-check
    Warning,
}

/// Error entry for tracking
#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub error: String,
    pub severity: ErrorSeverity,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Usually the file name of the failed import
    pub context: String,
}

/// Records failed imports and logs them by severity
pub struct ImportErrorHandler {
    recent_errors: Arc<RwLock<Vec<ErrorEntry>>>,
    max_errors: usize,
}

impl ImportErrorHandler {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Keep at most `max_errors` entries
    pub fn with_capacity(max_errors: usize) -> Self {
        Self {
            recent_errors: Arc::new(RwLock::new(Vec::new())),
            max_errors,
        }
    }

    /// Handle an error with automatic logging
    pub async fn handle_error(&self, error: &BookmarkImportError, context: &str) {
        let severity = Self::classify_error(error);

        match severity {
            ErrorSeverity::Critical => error!("CRITICAL ERROR in {}: {}", context, error),
            ErrorSeverity::Error => error!("Import of {} failed: {}", context, error),
            ErrorSeverity::Warning => warn!("Import of {} rejected: {}", context, error),
        }

        let entry = ErrorEntry {
            error: error.to_string(),
            severity,
            timestamp: chrono::Utc::now(),
            context: context.to_string(),
        };

        self.add_error_entry(entry).await;
    }

    /// Classify error severity
    pub fn classify_error(error: &BookmarkImportError) -> ErrorSeverity {
        match error {
            BookmarkImportError::Parse { source } => match source {
                ParseError::MissingUrlColumn { .. } => ErrorSeverity::Error,
            },
            BookmarkImportError::Import { source } => match source {
                ImportError::UnsupportedExtension { .. } => ErrorSeverity::Warning,
                ImportError::FileTooLarge { .. } => ErrorSeverity::Warning,
            },
            BookmarkImportError::System { source } => match source {
                SystemError::IO { .. } => ErrorSeverity::Error,
                SystemError::Configuration { .. }
                | SystemError::Serialization { .. }
                | SystemError::Unknown { .. } => ErrorSeverity::Critical,
            },
        }
    }

    async fn add_error_entry(&self, entry: ErrorEntry) {
        if self.max_errors == 0 {
            return;
        }

        let mut errors = self.recent_errors.write().await;
        errors.push(entry);

        if errors.len() > self.max_errors {
            let excess = errors.len() - self.max_errors;
            errors.drain(0..excess);
        }
    }

    /// Get recent errors, oldest first
    pub async fn get_recent_errors(&self) -> Vec<ErrorEntry> {
        self.recent_errors.read().await.clone()
    }

    /// Get error statistics
    pub async fn get_error_stats(&self) -> ErrorStatistics {
        let errors = self.recent_errors.read().await;
        let mut stats = ErrorStatistics {
            total: errors.len(),
            ..ErrorStatistics::default()
        };

        for error in errors.iter() {
            match error.severity {
                ErrorSeverity::Critical => stats.critical += 1,
                ErrorSeverity::Error => stats.errors += 1,
                ErrorSeverity::Warning => stats.warnings += 1,
            }
        }

        stats
    }

    /// Clear error history
    pub async fn clear_errors(&self) {
        self.recent_errors.write().await.clear();
    }
}

impl Default for ImportErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorStatistics {
    pub total: usize,
    pub critical: usize,
    pub errors: usize,
    pub warnings: usize,
}
