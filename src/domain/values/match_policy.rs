use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f32 = 0.45;
pub const DEFAULT_MIN_FACE_AREA_RATIO: f64 = 0.05;

/// Acceptance rules applied by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Minimum cosine similarity for a match. Equality is accepted.
    pub threshold: f32,
    /// Minimum face area as a fraction of the whole image. Smaller faces are
    /// usually a photographed badge rather than the person at the camera.
    pub min_face_area_ratio: f64,
}

impl MatchPolicy {
    pub fn new(threshold: f32, min_face_area_ratio: f64) -> Result<Self, DomainError> {
        if !(-1.0..=1.0).contains(&threshold) {
            return Err(DomainError::InvalidInput(format!(
                "Threshold must be between -1.0 and 1.0, got {threshold}"
            )));
        }
        if !(0.0..=1.0).contains(&min_face_area_ratio) {
            return Err(DomainError::InvalidInput(format!(
                "Minimum face area ratio must be between 0.0 and 1.0, got {min_face_area_ratio}"
            )));
        }
        Ok(Self { threshold, min_face_area_ratio })
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_face_area_ratio: DEFAULT_MIN_FACE_AREA_RATIO,
        }
    }
}
