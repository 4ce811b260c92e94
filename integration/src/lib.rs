/// Integration module for bookmark-import
///
/// Ties detection and parsing to the file system, the logger, and the
/// failure tracker, and exposes the result as serializable reports.

use bookmark_import_core::errors::{BookmarkImportError, ImportError, Result, SystemError};
use bookmark_import_core::types::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub mod error_handler;
pub mod logger;

pub use error_handler::{ErrorEntry, ErrorSeverity, ErrorStatistics, ImportErrorHandler};
pub use logger::{LoggerConfig, UnifiedLogger};

/// Import configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// File extensions accepted for import, without the dot
    pub accepted_extensions: Vec<String>,

    /// Largest accepted file in bytes
    pub max_file_size_bytes: u64,

    /// Log level
    pub log_level: String,

    /// Number of failures kept by the error handler
    pub max_recent_failures: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: vec!["html".to_string(), "htm".to_string(), "csv".to_string()],
            max_file_size_bytes: 50 * 1024 * 1024,
            log_level: "info".to_string(),
            max_recent_failures: 100,
        }
    }
}

impl ImportConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Whether the extension of `filename` is accepted (case-insensitive)
    pub fn accepts(&self, filename: &str) -> bool {
        match extension_of(filename) {
            Some(ext) => self
                .accepted_extensions
                .iter()
                .any(|accepted| accepted.trim_start_matches('.').eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig::with_level(self.log_level.clone())
    }
}

fn extension_of(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}

/// Outcome of importing one file
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImportReport {
    pub filename: String,
    pub format: ImportFormat,
    pub format_name: String,
    pub confidence: Confidence,
    pub result: ParseResult,
}

impl ImportReport {
    fn new(filename: &str, detection: DetectionResult, result: ParseResult) -> Self {
        Self {
            filename: filename.to_string(),
            format: detection.format,
            format_name: detection.format.display_name().to_string(),
            confidence: detection.confidence,
            result,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Imports bookmark exports from memory or disk
#[derive(Clone)]
pub struct ImportService {
    config: Arc<ImportConfig>,
    error_handler: Arc<ImportErrorHandler>,
}

impl ImportService {
    pub fn new(config: ImportConfig) -> Self {
        let error_handler = Arc::new(ImportErrorHandler::with_capacity(config.max_recent_failures));
        Self {
            config: Arc::new(config),
            error_handler,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn error_handler(&self) -> &ImportErrorHandler {
        &self.error_handler
    }

    /// Extension and size checks run before any content is parsed
    pub fn check_file(&self, filename: &str, size_bytes: u64) -> Result<()> {
        if !self.config.accepts(filename) {
            return Err(ImportError::UnsupportedExtension {
                filename: filename.to_string(),
            }
            .into());
        }

        if size_bytes > self.config.max_file_size_bytes {
            return Err(ImportError::FileTooLarge {
                size_bytes,
                limit_bytes: self.config.max_file_size_bytes,
            }
            .into());
        }

        Ok(())
    }

    /// Import an export that is already in memory
    pub async fn import_content(&self, content: &str, filename: &str) -> Result<ImportReport> {
        let service = self.clone();
        let owned_content = content.to_string();
        let owned_filename = filename.to_string();

        let outcome = tokio::task::spawn_blocking(move || {
            service
                .check_file(&owned_filename, owned_content.len() as u64)
                .and_then(|_| bookmark_parser::import(&owned_content, &owned_filename))
        })
        .await
        .unwrap_or_else(|e| Err(join_error(e)));

        self.finish(filename, outcome).await
    }

    /// Read and import a single file
    pub async fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportReport> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = self.read_and_parse(path, &filename).await;
        self.finish(&filename, outcome).await
    }

    /// Import several files concurrently; results keep the order of `paths`
    pub async fn import_files(&self, paths: &[PathBuf]) -> Vec<Result<ImportReport>> {
        let handles: Vec<_> = paths
            .iter()
            .cloned()
            .map(|path| {
                let service = self.clone();
                tokio::spawn(async move { service.import_file(path).await })
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for handle in handles {
            reports.push(handle.await.unwrap_or_else(|e| Err(join_error(e))));
        }
        reports
    }

    async fn read_and_parse(
        &self,
        path: &Path,
        filename: &str,
    ) -> Result<bookmark_parser::ImportOutcome> {
        if !self.config.accepts(filename) {
            return Err(ImportError::UnsupportedExtension {
                filename: filename.to_string(),
            }
            .into());
        }

        let metadata = tokio::fs::metadata(path).await?;
        self.check_file(filename, metadata.len())?;

        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        let filename = filename.to_string();
        tokio::task::spawn_blocking(move || {
            let content = String::from_utf8_lossy(&bytes);
            bookmark_parser::import(&content, &filename)
        })
        .await
        .map_err(join_error)?
    }

    async fn finish(
        &self,
        filename: &str,
        outcome: Result<bookmark_parser::ImportOutcome>,
    ) -> Result<ImportReport> {
        match outcome {
            Ok(outcome) => {
                let report = ImportReport::new(filename, outcome.detection, outcome.result);
                info!(
                    "Imported {} as {} ({} confidence): {} bookmarks, {} folders, {} skipped",
                    filename,
                    report.format_name,
                    report.confidence,
                    report.result.stats.total_bookmarks,
                    report.result.stats.total_folders,
                    report.result.stats.skipped_urls
                );
                Ok(report)
            }
            Err(e) => {
                self.error_handler.handle_error(&e, filename).await;
                Err(e)
            }
        }
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

fn join_error(e: tokio::task::JoinError) -> BookmarkImportError {
    SystemError::Unknown {
        details: format!("import task failed: {}", e),
    }
    .into()
}
