use crate::domain::entities::detected_face::DetectedFace;
use crate::domain::error::DomainError;
use crate::domain::ports::face_detector::FaceDetector;
use image::DynamicImage;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Admits one `detect` call at a time. Model runtimes hold mutable state and
/// are not assumed to be reentrant.
pub struct SerializedDetector {
    inner: Arc<dyn FaceDetector>,
    gate: Mutex<()>,
}

impl SerializedDetector {
    pub fn new(inner: Arc<dyn FaceDetector>) -> Self {
        Self { inner, gate: Mutex::new(()) }
    }
}

#[async_trait::async_trait]
impl FaceDetector for SerializedDetector {
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<DetectedFace>, DomainError> {
        let _turn = self.gate.lock().await;
        self.inner.detect(image).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
