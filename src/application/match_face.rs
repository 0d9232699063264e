use crate::application::face_store::FaceStore;
use crate::domain::entities::detected_face::largest_face;
use crate::domain::entities::face_match::FaceMatch;
use crate::domain::error::DomainError;
use crate::domain::ports::face_detector::FaceDetector;
use crate::domain::values::match_policy::MatchPolicy;
use crate::infrastructure::photos::codec::decode_image;
use std::sync::Arc;

/// Identifies the person in a query image.
///
/// Each step either passes the image on or rejects it with its own error:
/// empty store, undecodable image, no face, face too small, no confident
/// match.
pub struct MatchUseCase {
    store: Arc<FaceStore>,
    detector: Arc<dyn FaceDetector>,
    policy: MatchPolicy,
}

impl MatchUseCase {
    pub fn new(store: Arc<FaceStore>, detector: Arc<dyn FaceDetector>, policy: MatchPolicy) -> Self {
        Self { store, detector, policy }
    }

    pub async fn execute(&self, image_bytes: &[u8]) -> Result<FaceMatch, DomainError> {
        let table = self.store.read().await;
        if table.is_empty() {
            return Err(DomainError::StoreNotInitialized);
        }

        let image = decode_image(image_bytes)?;
        let faces = self.detector.detect(&image).await?;
        let face = largest_face(&faces).ok_or(DomainError::NoFaceDetected)?;

        let ratio = face.bbox.area_ratio(image.width(), image.height());
        if ratio < self.policy.min_face_area_ratio {
            return Err(DomainError::FaceTooSmall { ratio, min: self.policy.min_face_area_ratio });
        }

        let (idx, similarity) = table
            .best_match(&face.embedding)
            .ok_or(DomainError::StoreNotInitialized)?;
        tracing::debug!(faces = faces.len(), ratio, best_index = idx, similarity, "match scored");

        if similarity < self.policy.threshold {
            return Err(DomainError::NoConfidentMatch { best: similarity, threshold: self.policy.threshold });
        }

        let entry = table.get(idx).ok_or(DomainError::StoreNotInitialized)?;
        Ok(FaceMatch {
            bbox: face.bbox.to_pixels(),
            employee_id: entry.record.employee_id.to_string(),
            name: entry.record.name.clone(),
            similarity,
        })
    }
}
