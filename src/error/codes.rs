//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Pending queue errors
//! - 2xx: Review errors
//! - 3xx: Config errors
//! - 5xx: Network errors
//! - 6xx: Backend errors
//! - 8xx: Validation errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for machine output.
///
/// Each variant maps to a numeric code (e.g., `QueueEntryNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Pending queue errors (1xx)
    // ========================================
    /// E101: No pending form with the given id
    QueueEntryNotFound,
    /// E102: Submit was requested with an empty selection
    QueueNothingSelected,
    /// E103: Some selected forms failed to submit and remain queued
    QueuePartialSubmission,

    // ========================================
    // Review errors (2xx)
    // ========================================
    /// E201: Section type is not one of skill/project/asset/certification/eminence
    ReviewUnknownSection,
    /// E202: request_data is not a JSON object carrying an id
    ReviewInvalidRequestData,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,
    /// E302: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Network errors (5xx)
    // ========================================
    /// E501: Cannot reach the backend
    NetworkUnreachable,
    /// E502: Backend rejected the session
    NetworkAuthFailed,

    // ========================================
    // Backend errors (6xx)
    // ========================================
    /// E601: Backend answered with a non-2xx status
    BackendRejected,
    /// E602: Backend body could not be parsed
    BackendMalformed,
    /// E603: Local serialization/deserialization failed
    SerializationError,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: Draft is missing required fields
    ValidationFailed,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Unexpected internal error
    InternalError,
    /// E902: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `QueueEntryNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::QueueEntryNotFound => 101,
            Self::QueueNothingSelected => 102,
            Self::QueuePartialSubmission => 103,

            Self::ReviewUnknownSection => 201,
            Self::ReviewInvalidRequestData => 202,

            Self::ConfigInvalid => 301,
            Self::ConfigMissingRequired => 302,

            Self::NetworkUnreachable => 501,
            Self::NetworkAuthFailed => 502,

            Self::BackendRejected => 601,
            Self::BackendMalformed => 602,
            Self::SerializationError => 603,

            Self::ValidationFailed => 801,

            Self::InternalError => 901,
            Self::IoError => 902,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::QueueEntryNotFound => "Run `list` in the session to see the ids of queued forms",
            Self::QueueNothingSelected => "Select at least one form with `select <id>` before submitting",
            Self::QueuePartialSubmission => "Failed forms are still queued. Fix the reported problem and submit again",

            Self::ReviewUnknownSection => "Use one of: skill, project, asset, certification, eminence",
            Self::ReviewInvalidRequestData => "Pass request data as a JSON object with an `id` field, e.g. '{\"id\": 42}'",

            Self::ConfigInvalid => "Run `skp config show` to see current values. Check TOML syntax in config file",
            Self::ConfigMissingRequired => "Set the value in config.toml or through the matching SKP_* environment variable",

            Self::NetworkUnreachable => "Check your network connection and `backend.base_url`",
            Self::NetworkAuthFailed => "Your session expired. Copy a fresh session cookie into `backend.session_cookie`",

            Self::BackendRejected => "Inspect the backend message in the error context and correct the draft",
            Self::BackendMalformed => "The backend answered with unexpected data. Verify `backend.base_url` points at the API",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",

            Self::ValidationFailed => "Fill in the required fields named in the message and add the draft again",

            Self::InternalError => "An unexpected error occurred. Please report this issue with full error output",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::QueueEntryNotFound
            | Self::QueueNothingSelected
            | Self::QueuePartialSubmission
            | Self::ReviewUnknownSection
            | Self::ReviewInvalidRequestData
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::NetworkUnreachable
            | Self::NetworkAuthFailed
            | Self::BackendRejected
            | Self::BackendMalformed
            | Self::ValidationFailed
            | Self::IoError => true,

            Self::SerializationError | Self::InternalError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "queue",
            2 => "review",
            3 => "config",
            5 => "network",
            6 => "backend",
            8 => "validation",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::QueueEntryNotFound,
            Self::QueueNothingSelected,
            Self::QueuePartialSubmission,
            Self::ReviewUnknownSection,
            Self::ReviewInvalidRequestData,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::NetworkUnreachable,
            Self::NetworkAuthFailed,
            Self::BackendRejected,
            Self::BackendMalformed,
            Self::SerializationError,
            Self::ValidationFailed,
            Self::InternalError,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
