use thiserror::Error;

/// Parsing related errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV header has no URL column: {header}")]
    MissingUrlColumn { header: String },
}

/// Import pre-check related errors
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported file extension: {filename}")]
    UnsupportedExtension { filename: String },

    #[error("File too large: {size_bytes} bytes > {limit_bytes} bytes")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },
}

/// General system errors
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Configuration error: {details}")]
    Configuration { details: String },

    #[error("IO error: {source}")]
    IO {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Unknown error: {details}")]
    Unknown { details: String },
}

/// Main error type for bookmark imports
#[derive(Debug, Error)]
pub enum BookmarkImportError {
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("Import error: {source}")]
    Import {
        #[from]
        source: ImportError,
    },

    #[error("System error: {source}")]
    System {
        #[from]
        source: SystemError,
    },
}

impl From<std::io::Error> for BookmarkImportError {
    fn from(source: std::io::Error) -> Self {
        BookmarkImportError::System {
            source: SystemError::IO { source },
        }
    }
}

impl From<serde_json::Error> for BookmarkImportError {
    fn from(source: serde_json::Error) -> Self {
        BookmarkImportError::System {
            source: SystemError::Serialization { source },
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BookmarkImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_column_message() {
        let err: BookmarkImportError = ParseError::MissingUrlColumn {
            header: "title,folder".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Parse error: CSV header has no URL column: title,folder"
        );
    }

    #[test]
    fn test_io_error_wraps_as_system() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BookmarkImportError = io.into();
        assert!(matches!(
            err,
            BookmarkImportError::System {
                source: SystemError::IO { .. }
            }
        ));
    }

    #[test]
    fn test_file_too_large_message() {
        let err = ImportError::FileTooLarge {
            size_bytes: 200,
            limit_bytes: 100,
        };
        assert_eq!(err.to_string(), "File too large: 200 bytes > 100 bytes");
    }
}
