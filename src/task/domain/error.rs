//! Error types for task domain validation and parsing.

use super::TaskId;
use std::fmt;
use thiserror::Error;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Form field name.
    pub field: &'static str,
    /// Message suitable for display next to the field.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation for `field`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// One or more submitted form fields are invalid.
    #[error("invalid task submission: {}", join_violations(.0))]
    InvalidSubmission(Vec<FieldViolation>),

    /// An edit was submitted without a reason.
    #[error("please provide a reason for the changes")]
    EmptyChangeReason,

    /// Received plus remaining amount does not fit the amount type.
    #[error("total amount overflows")]
    AmountOverflow,

    /// Coordinates are out of range or not finite.
    #[error("invalid location ({latitude}, {longitude})")]
    InvalidLocation {
        /// Rejected latitude.
        latitude: String,
        /// Rejected longitude.
        longitude: String,
    },

    /// An uploaded image has no content.
    #[error("image '{0}' is empty")]
    EmptyImage(String),

    /// The task has already been submitted.
    #[error("task {0} is already submitted")]
    AlreadySubmitted(TaskId),
}

impl TaskDomainError {
    /// Returns the field violations for an invalid submission.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::InvalidSubmission(violations) => violations,
            _ => &[],
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing submission statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown submission status: {0}")]
pub struct ParseSubmissionStatusError(pub String);

/// Error returned while parsing tracked field names from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tracked field: {0}")]
pub struct ParseTrackedFieldError(pub String);
