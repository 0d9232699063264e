use crate::domain::entities::detected_face::DetectedFace;
use crate::domain::error::DomainError;
use crate::domain::ports::face_detector::FaceDetector;
use image::DynamicImage;

pub struct NoopDetector;

#[async_trait::async_trait]
impl FaceDetector for NoopDetector {
    async fn detect(&self, _image: &DynamicImage) -> Result<Vec<DetectedFace>, DomainError> {
        // No model configured: every photo is faceless
        Ok(vec![])
    }

    fn name(&self) -> &str {
        "noop"
    }
}
