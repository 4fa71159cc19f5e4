use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BuildCheckError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Rule {rule} failed: {message}")]
    RuleEvaluation { rule: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BuildCheckError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn rule_evaluation(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleEvaluation {
            rule: rule.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::RuleEvaluation { .. } => "RULE_EVALUATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

pub type BuildCheckResult<T> = Result<T, BuildCheckError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<BuildCheckError> for ErrorResponse {
    fn from(error: BuildCheckError) -> Self {
        let details = match &error {
            BuildCheckError::Validation { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            BuildCheckError::RuleEvaluation { rule, .. } => {
                Some(serde_json::json!({ "rule": rule }))
            }
            _ => None,
        };

        Self {
            error: error.error_code().to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

// Conversion from common error types
impl From<sqlx::Error> for BuildCheckError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::not_found("row"),
            other => Self::database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for BuildCheckError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

impl From<config::ConfigError> for BuildCheckError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
