use crate::domain::entities::detected_face::DetectedFace;
use crate::domain::error::DomainError;
use crate::domain::ports::face_detector::FaceDetector;
use crate::domain::values::bounding_box::BoundingBox;
use crate::domain::values::embedding::Embedding;
use crate::infrastructure::photos::codec::encode_png;
use base64::Engine;
use image::DynamicImage;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Calls a face analysis model served over HTTP.
pub struct RemoteDetector {
    client: Client,
    url: String,
}

#[derive(Serialize)]
struct DetectRequest {
    image_base64: String,
}

#[derive(Deserialize)]
struct DetectResponse {
    faces: Vec<RemoteFace>,
}

#[derive(Deserialize)]
struct RemoteFace {
    bbox: [f32; 4],
    embedding: Vec<f32>,
}

impl RemoteDetector {
    pub fn new(url: String) -> Self {
        Self { client: Client::new(), url }
    }

    fn into_faces(response: DetectResponse) -> Result<Vec<DetectedFace>, DomainError> {
        response
            .faces
            .into_iter()
            .map(|f| {
                let [x1, y1, x2, y2] = f.bbox;
                let embedding = Embedding::new(f.embedding)
                    .map_err(|e| DomainError::Detector(format!("Bad embedding from detector: {e}")))?;
                Ok(DetectedFace::new(BoundingBox::new(x1, y1, x2, y2), embedding))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl FaceDetector for RemoteDetector {
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<DetectedFace>, DomainError> {
        let png = encode_png(image)?;
        let resp = self
            .client
            .post(&self.url)
            .json(&DetectRequest {
                image_base64: base64::engine::general_purpose::STANDARD.encode(png),
            })
            .send()
            .await
            .map_err(|e| DomainError::Detector(format!("Detector request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Detector(format!("Detector {status}: {body}")));
        }

        let result: DetectResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Detector(format!("Parse error: {e}")))?;
        Self::into_faces(result)
    }

    fn name(&self) -> &str {
        "remote"
    }
}
