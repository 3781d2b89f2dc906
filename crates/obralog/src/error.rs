//! Error types for obralog.
//!
//! This module defines all error types used throughout the obralog crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for obralog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database backing the record slots.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database operation failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// A stored slot does not contain a valid serialized record array.
    ///
    /// The caller decides whether to treat the slot as empty or to halt.
    #[error("corrupt data in slot '{key}': {source}")]
    CorruptData {
        /// The slot key that failed to decode.
        key: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A referenced record identifier does not exist in its collection.
    #[error("no record with id '{id}' in '{collection}'")]
    NotFound {
        /// The collection that was searched.
        collection: String,
        /// The identifier that was not found.
        id: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Device Errors ===
    /// Access to a device capability (camera, location) was refused.
    #[error("permission denied for {permission}. {instructions}")]
    PermissionDenied {
        /// Name of the refused capability.
        permission: String,
        /// Instructions for granting access.
        instructions: String,
    },

    /// A device provider failed during a one-shot acquisition.
    #[error("device '{name}' failed: {message}")]
    Device {
        /// Name of the provider.
        name: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed outside of slot decoding.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Validation Errors ===
    /// A record failed creation-time validation.
    #[error("invalid record: {message}")]
    InvalidRecord {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for obralog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for a collection and identifier.
    #[must_use]
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Create a corrupt-data error for a slot key.
    #[must_use]
    pub fn corrupt_data(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CorruptData {
            key: key.into(),
            source,
        }
    }

    /// Create a permission-denied error with instructions.
    #[must_use]
    pub fn permission_denied(
        permission: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self::PermissionDenied {
            permission: permission.into(),
            instructions: instructions.into(),
        }
    }

    /// Create a device provider error.
    #[must_use]
    pub fn device(name: &'static str, message: impl Into<String>) -> Self {
        Self::Device {
            name,
            message: message.into(),
        }
    }

    /// Create a record validation error.
    #[must_use]
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Check if this error means a referenced record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a permission issue.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if this error means a stored slot could not be decoded.
    #[must_use]
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, Self::CorruptData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("obras", "42");
        assert_eq!(err.to_string(), "no record with id '42' in 'obras'");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::not_found("obras", "1").is_not_found());
        assert!(!Error::invalid_record("x").is_not_found());
    }

    #[test]
    fn test_error_is_permission_denied() {
        let err = Error::permission_denied("camera", "Enable the camera in the device settings");
        assert!(err.is_permission_denied());
        assert!(!Error::not_found("obras", "1").is_permission_denied());
    }

    #[test]
    fn test_permission_denied_display() {
        let err = Error::permission_denied(
            "location",
            "Set device.location_enabled = true in the configuration",
        );
        let msg = err.to_string();
        assert!(msg.contains("location"));
        assert!(msg.contains("location_enabled"));
    }

    #[test]
    fn test_corrupt_data_display() {
        let json_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let err = Error::corrupt_data("obras", json_err);
        assert!(err.is_corrupt_data());
        assert!(err.to_string().contains("obras"));
    }

    #[test]
    fn test_device_error_display() {
        let err = Error::device("camera", "source image missing");
        let msg = err.to_string();
        assert!(msg.contains("camera"));
        assert!(msg.contains("source image missing"));
    }

    #[test]
    fn test_invalid_record_display() {
        let err = Error::invalid_record("nome must not be empty");
        assert!(err.to_string().contains("nome must not be empty"));
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::ConfigValidation {
            message: "location_timeout_ms must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("location_timeout_ms"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_directory_create_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
