//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type LitforgeResult<T> = Result<T, LitforgeError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the Litforge system
#[derive(Error, Debug)]
pub enum LitforgeError {
    #[error("Missing required parameter: {parameter}")]
    MissingParameter {
        parameter: String,
        context: ErrorContext,
    },

    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LitforgeError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            LitforgeError::MissingParameter { context, .. } => Some(context),
            LitforgeError::InvalidInput { context, .. } => Some(context),
            LitforgeError::Config { context, .. } => Some(context),
            LitforgeError::Export { context, .. } => Some(context),
            LitforgeError::Validation { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Name of the missing parameter, if this is a missing-parameter error
    pub fn missing_parameter(&self) -> Option<&str> {
        match self {
            LitforgeError::MissingParameter { parameter, .. } => Some(parameter),
            _ => None,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            LitforgeError::Config { .. } | LitforgeError::Validation { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Configuration or validation error"
                );
            }
            LitforgeError::MissingParameter { .. } | LitforgeError::InvalidInput { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Report input rejected"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! missing_parameter_error {
    ($parameter:expr, $component:expr) => {
        $crate::LitforgeError::MissingParameter {
            parameter: $parameter.to_string(),
            context: $crate::ErrorContext::new($component)
                .with_operation("generate_full_report")
                .with_suggestion("Supply every section parameter in the params file"),
        }
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::LitforgeError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'litforge config --init' to create default config"),
        }
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::LitforgeError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_macro() {
        let error = missing_parameter_error!("summary", "report_assembler");

        assert_eq!(error.missing_parameter(), Some("summary"));
        assert_eq!(error.to_string(), "Missing required parameter: summary");

        let context = error.context().unwrap();
        assert_eq!(context.component, "report_assembler");
        assert_eq!(context.operation.as_deref(), Some("generate_full_report"));
        assert!(!context.error_id.is_empty());
    }

    #[test]
    fn test_io_error_has_no_context() {
        let error: LitforgeError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(error.context().is_none());
        assert!(error.missing_parameter().is_none());
    }
}
