//! Error types for optval library

use thiserror::Error;

/// Result type alias for optval operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for optval library
///
/// Every failed validation surfaces as exactly one of these. The variants in
/// the first group describe a configuration that broke its template, the
/// second group describes a template that could not be built or decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration Violations
    // -------------------------------------------------------------------------
    #[error("Value of '{key}' was expected to be of type '{expected}'.")]
    TypeMismatch { key: String, expected: String },

    #[error("A value for '{key}' is required.")]
    MissingRequired { key: String },

    #[error("Value of '{key}' cannot be {limit} or less.")]
    BelowMinValue { key: String, limit: f64 },

    #[error("Value of '{key}' cannot be {limit} or more.")]
    AboveMaxValue { key: String, limit: f64 },

    #[error("Length of '{key}' cannot be {limit} or less.")]
    BelowMinLength { key: String, limit: usize },

    #[error("Length of '{key}' cannot be {limit} or more.")]
    AboveMaxLength { key: String, limit: usize },

    #[error("Value '{value}' is not a valid option for '{key}'. Valid options are: {accepted}.")]
    NotAccepted {
        key: String,
        value: String,
        accepted: String,
    },

    #[error("Value '{value}' is not allowed for '{key}'.")]
    Rejected { key: String, value: String },

    #[error("Value of '{key}' does not match expected format.")]
    FormatMismatch { key: String },

    #[error("Value of '{key}' is not a valid file path.")]
    InvalidFilePath { key: String },

    #[error("Value of '{key}' is not a valid folder path.")]
    InvalidFolderPath { key: String },

    #[error("Element {index} of '{key}' was expected to be of type '{expected}'.")]
    InvalidListElement {
        key: String,
        index: usize,
        expected: String,
    },

    // -------------------------------------------------------------------------
    // Template Errors
    // -------------------------------------------------------------------------
    #[error("Template option 'type' cannot be undefined for '{key}'.")]
    MissingTemplateType { key: String },

    #[error("Invalid template entry for '{key}': {reason}")]
    InvalidTemplate { key: String, reason: String },

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Failed to parse {format} document: {reason}")]
    Parse { format: String, reason: String },
}

impl Error {
    /// Key the error refers to, if any
    ///
    /// For nested templates this is the innermost key, not a dotted path.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::TypeMismatch { key, .. }
            | Error::MissingRequired { key }
            | Error::BelowMinValue { key, .. }
            | Error::AboveMaxValue { key, .. }
            | Error::BelowMinLength { key, .. }
            | Error::AboveMaxLength { key, .. }
            | Error::NotAccepted { key, .. }
            | Error::Rejected { key, .. }
            | Error::FormatMismatch { key }
            | Error::InvalidFilePath { key }
            | Error::InvalidFolderPath { key }
            | Error::InvalidListElement { key, .. }
            | Error::MissingTemplateType { key }
            | Error::InvalidTemplate { key, .. } => Some(key),
            Error::InvalidPattern { .. } | Error::Parse { .. } => None,
        }
    }

    /// Check if this error was caused by the configuration breaking its template
    #[must_use]
    pub fn is_violation(&self) -> bool {
        !self.is_template_error() && !matches!(self, Error::Parse { .. })
    }

    /// Check if this error was caused by a malformed template
    #[must_use]
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            Error::MissingTemplateType { .. }
                | Error::InvalidTemplate { .. }
                | Error::InvalidPattern { .. }
        )
    }

    pub(crate) fn invalid_template(key: &str, reason: impl Into<String>) -> Self {
        Error::InvalidTemplate {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(format: &str, err: impl std::fmt::Display) -> Self {
        Error::Parse {
            format: format.to_string(),
            reason: err.to_string(),
        }
    }
}
