//! Error handling for skills_profile.
//!
//! This module provides:
//! - [`SkpError`]: The main error enum for all skp operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestion and context

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::forms::FormKind;

pub use codes::ErrorCode;

/// Main error type for skills_profile operations.
#[derive(Error, Debug)]
pub enum SkpError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Invalid {kind} draft: {message}")]
    ValidationFailed { kind: FormKind, message: String },

    #[error("Select at least one form to submit")]
    NothingSelected,

    #[error("Unknown section type: {0}")]
    UnknownSection(String),

    #[error("Invalid request data: {0}")]
    InvalidRequestData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Decision not recorded: {0}")]
    DecisionNotRecorded(String),

    #[error("Submitted {succeeded} form(s), {failed} failed")]
    SubmissionIncomplete { succeeded: usize, failed: usize },

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl SkpError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Transport(_) => ErrorCode::NetworkUnreachable,
            Self::Backend { .. } => ErrorCode::BackendRejected,
            Self::Unauthenticated(_) => ErrorCode::NetworkAuthFailed,
            Self::MalformedResponse(_) => ErrorCode::BackendMalformed,
            Self::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            Self::NothingSelected => ErrorCode::QueueNothingSelected,
            Self::UnknownSection(_) => ErrorCode::ReviewUnknownSection,
            Self::InvalidRequestData(_) => ErrorCode::ReviewInvalidRequestData,
            Self::NotFound(_) => ErrorCode::QueueEntryNotFound,
            Self::DecisionNotRecorded(_) => ErrorCode::BackendRejected,
            Self::SubmissionIncomplete { .. } => ErrorCode::QueuePartialSubmission,
            Self::Runtime(_) => ErrorCode::InternalError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::Backend { status, body } => {
                Some(serde_json::json!({ "status": status, "body": body }))
            }
            Self::ValidationFailed { kind, .. } => Some(serde_json::json!({ "kind": kind })),
            Self::UnknownSection(section) => Some(serde_json::json!({ "section_type": section })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            Self::NotFound(id) => Some(serde_json::json!({ "id": id })),
            Self::SubmissionIncomplete { succeeded, failed } => {
                Some(serde_json::json!({ "succeeded": succeeded, "failed": failed }))
            }
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_skp_error(self)
    }
}

impl From<reqwest::Error> for SkpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "VALIDATION_FAILED")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 801)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether retrying the same user action can succeed
    pub recoverable: bool,

    /// Error category (e.g., "queue", "config", "network")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from an SkpError.
    #[must_use]
    pub fn from_skp_error(err: &SkpError) -> Self {
        let mut structured = Self::new(err.code(), err.to_string());
        structured.context = err.context();
        structured
    }
}

pub type Result<T> = std::result::Result<T, SkpError>;
