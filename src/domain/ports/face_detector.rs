use crate::domain::entities::detected_face::DetectedFace;
use crate::domain::error::DomainError;
use image::DynamicImage;

/// Face detection and embedding model. An empty result means "no face".
#[async_trait::async_trait]
pub trait FaceDetector: Send + Sync {
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<DetectedFace>, DomainError>;

    /// Detector name for logging
    fn name(&self) -> &str;
}
