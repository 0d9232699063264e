//! Shared test helpers.
#![allow(dead_code)]

use faceid::config::{DetectorKind, FaceIdConfig};
use faceid::domain::entities::detected_face::DetectedFace;
use faceid::domain::error::DomainError;
use faceid::domain::ports::face_detector::FaceDetector;
use faceid::domain::values::bounding_box::BoundingBox;
use faceid::domain::values::embedding::{Embedding, EMBEDDING_DIM};
use faceid::domain::values::match_policy::MatchPolicy;
use faceid::FaceId;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Detector that answers from a table keyed by image size. Photos survive
/// JPEG re-encoding with their size intact, so a rebuild sees the same faces
/// as the original enrollment.
#[derive(Default)]
pub struct ScriptedDetector {
    faces: HashMap<(u32, u32), Vec<DetectedFace>>,
    calls: AtomicUsize,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, width: u32, height: u32, faces: Vec<DetectedFace>) -> Self {
        self.faces.insert((width, height), faces);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FaceDetector for ScriptedDetector {
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<DetectedFace>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.faces.get(&(image.width(), image.height())).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Detector that is always down.
pub struct FailingDetector;

#[async_trait::async_trait]
impl FaceDetector for FailingDetector {
    async fn detect(&self, _image: &DynamicImage) -> Result<Vec<DetectedFace>, DomainError> {
        Err(DomainError::Detector("model server unreachable".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Scripted detector that goes down after its first `healthy_calls` calls.
pub struct FlakyDetector {
    inner: ScriptedDetector,
    healthy_calls: usize,
}

impl FlakyDetector {
    pub fn new(inner: ScriptedDetector, healthy_calls: usize) -> Self {
        Self { inner, healthy_calls }
    }
}

#[async_trait::async_trait]
impl FaceDetector for FlakyDetector {
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<DetectedFace>, DomainError> {
        if self.inner.calls() >= self.healthy_calls {
            return Err(DomainError::Detector("model server went away".into()));
        }
        self.inner.detect(image).await
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

pub fn basis(i: usize) -> Embedding {
    let mut v = vec![0.0; EMBEDDING_DIM];
    v[i] = 1.0;
    Embedding::new(v).unwrap()
}

/// Unit vector whose cosine with `basis(i)` is `cos`.
pub fn toward(i: usize, j: usize, cos: f32) -> Embedding {
    let mut v = vec![0.0; EMBEDDING_DIM];
    v[i] = cos;
    v[j] = (1.0 - cos * cos).sqrt();
    Embedding::new(v).unwrap()
}

pub fn face(x1: f32, y1: f32, x2: f32, y2: f32, embedding: Embedding) -> DetectedFace {
    DetectedFace::new(BoundingBox::new(x1, y1, x2, y2), embedding)
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([120, 90, 60])))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

pub fn config(dir: &TempDir) -> FaceIdConfig {
    FaceIdConfig {
        db_path: db_path(dir),
        photo_dir: photo_dir(dir),
        policy: MatchPolicy::default(),
        detector: DetectorKind::Noop,
    }
}

pub fn db_path(dir: &TempDir) -> String {
    dir.path().join("faceid.db").to_string_lossy().into_owned()
}

pub fn photo_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("employees")
}

pub fn setup(detector: Arc<dyn FaceDetector>) -> (FaceId, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let engine = FaceId::with_detector(config(&dir), detector).unwrap();
    (engine, dir)
}

/// Alice: 200x200 photo, one face covering 36% of the image.
pub const ALICE: (u32, u32) = (200, 200);
/// Bob: 210x200 photo, one face covering a third of the image.
pub const BOB: (u32, u32) = (210, 200);

pub fn staff_detector() -> ScriptedDetector {
    ScriptedDetector::new()
        .with(ALICE.0, ALICE.1, vec![face(40.0, 40.0, 160.0, 160.0, basis(0))])
        .with(BOB.0, BOB.1, vec![face(30.0, 20.0, 150.0, 140.0, basis(1))])
}
