use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Warning,
    Error,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Success => write!(f, "success"),
            OutcomeStatus::Warning => write!(f, "warning"),
            OutcomeStatus::Error => write!(f, "error"),
        }
    }
}

/// Result of an administrative operation (enroll, remove, rebuild) as handed
/// to an outer request layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self { status: OutcomeStatus::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { status: OutcomeStatus::Warning, message: message.into() }
    }

    /// Turns a use case result into an outcome. Rejections become warning or
    /// error outcomes; environment failures stay errors for the caller.
    pub fn from_result(result: Result<String, DomainError>) -> Result<Self, DomainError> {
        match result {
            Ok(message) => Ok(Outcome::success(message)),
            Err(e) if e.is_rejection() => Ok(Outcome { status: e.status(), message: e.to_string() }),
            Err(e) => Err(e),
        }
    }
}
