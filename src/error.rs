//! Error types for Solidafy Merge
//!
//! Only configuration-time operations (loading, normalizing and building
//! cache policies) return `Result<T, Error>`. Merge functions never fail:
//! data-quality problems found while merging are logged, not raised.

use thiserror::Error;

/// The main error type for Solidafy Merge
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid path for '{field}': {message}")]
    InvalidPath { field: String, message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Query field '{field}' is registered more than once")]
    DuplicateField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Lookup Errors
    // ============================================================================
    #[error("No field policy registered for query field '{field}'")]
    FieldNotFound { field: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate field error
    pub fn duplicate_field(field: impl Into<String>) -> Self {
        Self::DuplicateField {
            field: field.into(),
        }
    }

    /// Create a field-not-found error
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
        }
    }

    /// Check if this error was caused by bad configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::InvalidPath { .. }
                | Error::InvalidConfigValue { .. }
                | Error::DuplicateField { .. }
                | Error::YamlParse(_)
        )
    }
}

/// Result type alias for Solidafy Merge
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_path("items_path", "path cannot be empty");
        assert_eq!(
            err.to_string(),
            "Invalid path for 'items_path': path cannot be empty"
        );

        let err = Error::duplicate_field("things");
        assert_eq!(
            err.to_string(),
            "Query field 'things' is registered more than once"
        );
    }

    #[test]
    fn test_is_config_error() {
        assert!(Error::config("x").is_config_error());
        assert!(Error::invalid_path("items_path", "empty").is_config_error());
        assert!(Error::invalid_value("identity_fields", "true").is_config_error());
        assert!(Error::duplicate_field("things").is_config_error());

        assert!(!Error::field_not_found("things").is_config_error());
        assert!(!Error::FileNotFound {
            path: "policies.yaml".to_string()
        }
        .is_config_error());
    }
}
