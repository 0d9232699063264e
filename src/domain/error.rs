use crate::domain::values::outcome::OutcomeStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image could not be decoded: {0}")]
    ImageDecode(String),

    #[error("No face detected in the photo")]
    NoFaceDetected,

    #[error("Employee {0} already exists")]
    DuplicateEmployee(String),

    #[error("Employee {0} not found")]
    EmployeeNotFound(String),

    #[error("No employees enrolled to compare against")]
    StoreNotInitialized,

    #[error("Face too small ({ratio:.3} of image, minimum {min:.3}); possibly an ID badge")]
    FaceTooSmall { ratio: f64, min: f64 },

    #[error("No confident match (best similarity {best:.4}, threshold {threshold:.4})")]
    NoConfidentMatch { best: f32, threshold: f32 },

    #[error("Corrupt artifact: {0}")]
    CorruptArtifact(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Face detector error: {0}")]
    Detector(String),
}

impl DomainError {
    /// Well-formed requests that found nothing acceptable. Everything else is
    /// an environment failure the caller must surface.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            DomainError::CorruptArtifact(_) | DomainError::Persistence(_) | DomainError::Detector(_)
        )
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            DomainError::DuplicateEmployee(_) | DomainError::EmployeeNotFound(_) => OutcomeStatus::Warning,
            _ => OutcomeStatus::Error,
        }
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_separated_from_failures() {
        assert!(DomainError::NoFaceDetected.is_rejection());
        assert!(DomainError::FaceTooSmall { ratio: 0.03, min: 0.05 }.is_rejection());
        assert!(!DomainError::Persistence("disk full".into()).is_rejection());
        assert!(!DomainError::Detector("timeout".into()).is_rejection());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(DomainError::DuplicateEmployee("E1".into()).status(), OutcomeStatus::Warning);
        assert_eq!(DomainError::EmployeeNotFound("E1".into()).status(), OutcomeStatus::Warning);
        assert_eq!(DomainError::NoFaceDetected.status(), OutcomeStatus::Error);
    }
}
