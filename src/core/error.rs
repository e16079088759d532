//! Typed error handling for the booking store
//!
//! Store operations themselves answer with `bool`/`Option` (a failed add is an
//! expected outcome, not an exception). The types here describe *why*
//! something failed, for callers that ask: the validator, the storage
//! backends, the import channel and configuration loading.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: a record failed one or more validation rules
//! - [`StorageError`]: a key-value backend or file channel failed
//! - [`ImportError`]: an import payload could not be read or understood
//! - [`ConfigError`]: configuration could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! match store.import_from(&source).await {
//!     Ok(report) if report.is_clean() => println!("all records imported"),
//!     Ok(report) => println!("{} records rejected", report.rejected.len()),
//!     Err(ImportError::Format { message }) => eprintln!("bad file: {message}"),
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The umbrella error type of the crate
#[derive(Debug, Error)]
pub enum BookingError {
    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Import errors
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BookingError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::Validation(_) => "VALIDATION_ERROR",
            BookingError::Storage(e) => e.error_code(),
            BookingError::Import(e) => e.error_code(),
            BookingError::Config(_) => "CONFIG_ERROR",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

/// Errors related to record validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

impl ValidationError {
    /// Names of every field that failed
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
        }
    }
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends and file channels
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be opened or is not reachable
    #[error("Storage backend '{backend}' is unavailable: {message}")]
    Unavailable { backend: String, message: String },

    /// A read, write or delete failed
    #[error("{backend} {operation} failed for key '{key}': {message}")]
    OperationFailed {
        backend: String,
        operation: String,
        key: String,
        message: String,
    },

    /// The stored blob could not be encoded or decoded
    #[error("Failed to (de)serialize stored data: {message}")]
    Serialization { message: String },

    /// File system error while exporting or importing
    #[error("IO error on '{path}': {message}")]
    Io { path: String, message: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
            StorageError::OperationFailed { .. } => "STORAGE_OPERATION_FAILED",
            StorageError::Serialization { .. } => "STORAGE_SERIALIZATION_ERROR",
            StorageError::Io { .. } => "STORAGE_IO_ERROR",
        }
    }

    pub(crate) fn operation(
        backend: &str,
        operation: &str,
        key: &str,
        message: impl ToString,
    ) -> Self {
        StorageError::OperationFailed {
            backend: backend.to_string(),
            operation: operation.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Import Errors
// =============================================================================

/// Errors that abort an import before any record is written
#[derive(Debug, Error)]
pub enum ImportError {
    /// The payload is not JSON, or lacks a `records` array
    #[error("Invalid import file format: {message}")]
    Format { message: String },

    /// The source could not be read
    #[error("Failed to read import source: {0}")]
    Read(#[from] StorageError),

    /// The read did not complete within the configured bound
    #[error("Import source was not read within {seconds}s")]
    Timeout { seconds: u64 },
}

impl ImportError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ImportError::Format { .. } => "IMPORT_FORMAT_ERROR",
            ImportError::Read(_) => "IMPORT_READ_ERROR",
            ImportError::Timeout { .. } => "IMPORT_TIMEOUT",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file could not be read
    #[error("IO error reading '{path}': {message}")]
    IoError { path: String, message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_deref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}
