//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Families
//!
//! - **Analysis**: the mood analysis call failed (transport, timeout, HTTP
//!   status, or a response the model shaped wrongly). Recovered by the
//!   ingestor, never surfaced as a failed write.
//! - **DuplicateEntry**: the calendar date already has an entry.
//! - **Validation**: the inbound request is unusable.
//! - **Storage / Database / Io**: the write or read itself failed.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Analysis Error
// =============================================================================

/// What went wrong during a single analysis call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisErrorKind {
    /// Connection, DNS, TLS or body read failure
    Transport,
    /// The call exceeded the configured timeout
    Timeout,
    /// The provider answered with a non-success HTTP status
    Status,
    /// The model answered, but not with the expected JSON object
    ResponseShape,
}

impl std::fmt::Display for AnalysisErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => write!(f, "TRANSPORT"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Status => write!(f, "STATUS"),
            Self::ResponseShape => write!(f, "RESPONSE_SHAPE"),
        }
    }
}

/// Analysis failure with kind and provider context
#[derive(Debug, Clone)]
pub struct AnalysisError {
    pub kind: AnalysisErrorKind,
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
    /// HTTP status, when the provider returned one
    pub status: Option<u16>,
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.kind, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for AnalysisError {}

impl AnalysisError {
    pub fn new(kind: AnalysisErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider: None,
            status: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorKind::Transport, message)
    }

    pub fn timeout(duration: Duration) -> Self {
        Self::new(
            AnalysisErrorKind::Timeout,
            format!("no response within {:?}", duration),
        )
    }

    pub fn response_shape(message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorKind::ResponseShape, message)
    }

    /// Add provider context to existing error
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn is_response_shape(&self) -> bool {
        self.kind == AnalysisErrorKind::ResponseShape
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps provider-level failures onto analysis error kinds
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify a non-success HTTP response from a provider
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> AnalysisError {
        let summary = match status {
            429 => "rate limited",
            401 | 403 => "authentication rejected",
            400 => "bad request",
            404 => "model or endpoint not found",
            500..=599 => "provider server error",
            _ => "unexpected status",
        };

        let mut err = AnalysisError::new(
            AnalysisErrorKind::Status,
            format!("{} ({}): {}", summary, status, message),
        )
        .provider(provider);
        err.status = Some(status);
        err
    }

    /// Classify a reqwest failure
    pub fn classify_transport(err: &reqwest::Error, provider: &str) -> AnalysisError {
        if err.is_timeout() {
            AnalysisError::new(AnalysisErrorKind::Timeout, err.to_string()).provider(provider)
        } else if err.is_decode() {
            AnalysisError::response_shape(format!("undecodable provider body: {}", err))
                .provider(provider)
        } else {
            AnalysisError::transport(err.to_string()).provider(provider)
        }
    }

    /// Fold any application error raised on the analysis path into an AnalysisError
    pub fn classify_journal_error(err: JournalError, provider: &str) -> AnalysisError {
        match err {
            JournalError::Analysis(e) if e.provider.is_some() => e,
            JournalError::Analysis(e) => e.provider(provider),
            JournalError::Timeout { duration, .. } => {
                AnalysisError::timeout(duration).provider(provider)
            }
            JournalError::Json(e) => AnalysisError::response_shape(e.to_string()).provider(provider),
            other => AnalysisError::transport(other.to_string()).provider(provider),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field or component that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)
        } else {
            write!(f, "Validation failed: {}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing or blank
    MissingField,
    /// Invalid format
    Format,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum JournalError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Analysis Errors
    // -------------------------------------------------------------------------
    #[error("Analysis error: {0}")]
    Analysis(AnalysisError),

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("An entry for {date} already exists")]
    DuplicateEntry { date: NaiveDate },

    #[error("{0}")]
    Validation(ValidationError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Not initialized: run 'moodecho init' first")]
    NotInitialized,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<AnalysisError> for JournalError {
    fn from(err: AnalysisError) -> Self {
        JournalError::Analysis(err)
    }
}

impl From<ValidationError> for JournalError {
    fn from(err: ValidationError) -> Self {
        JournalError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;

impl JournalError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a validation error for a named field
    pub fn validation(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation(ValidationError::new(kind, message).with_field(field))
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| JournalError::Storage(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| JournalError::Storage(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================
