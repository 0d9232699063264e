pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::enroll::EnrollUseCase;
use crate::application::face_store::{FaceStore, StoreStats};
use crate::application::match_face::MatchUseCase;
use crate::application::rebuild::RebuildUseCase;
use crate::application::remove::RemoveUseCase;
use crate::config::{DetectorKind, FaceIdConfig};
use crate::domain::entities::employee::EmployeeRecord;
use crate::domain::entities::face_match::FaceMatch;
use crate::domain::error::DomainError;
use crate::domain::ports::face_detector::FaceDetector;
use crate::domain::ports::face_repository::FaceRepository;
use crate::domain::values::employee_id::EmployeeId;
use crate::domain::values::outcome::Outcome;
use crate::infrastructure::detectors::noop::NoopDetector;
use crate::infrastructure::detectors::remote::RemoteDetector;
use crate::infrastructure::detectors::serialized::SerializedDetector;
use crate::infrastructure::photos::photo_dir::PhotoDirectory;
use crate::infrastructure::sqlite::face_repo::SqliteFaceRepo;
use std::sync::Arc;

pub struct FaceId {
    store: Arc<FaceStore>,
    enroll_uc: EnrollUseCase,
    remove_uc: RemoveUseCase,
    rebuild_uc: Arc<RebuildUseCase>,
    match_uc: MatchUseCase,
}

impl FaceId {
    pub fn new(config: FaceIdConfig) -> Result<Self, DomainError> {
        let detector: Arc<dyn FaceDetector> = match &config.detector {
            DetectorKind::Remote { url } => Arc::new(RemoteDetector::new(url.clone())),
            DetectorKind::Noop => Arc::new(NoopDetector),
        };

        Self::with_detector(config, detector)
    }

    /// Builds the engine around an already initialized detector. The detector
    /// is shared by every operation and called one request at a time.
    pub fn with_detector(config: FaceIdConfig, detector: Arc<dyn FaceDetector>) -> Result<Self, DomainError> {
        let repo: Arc<dyn FaceRepository> = Arc::new(SqliteFaceRepo::open(&config.db_path)?);
        let store = Arc::new(FaceStore::load(repo)?);
        let detector: Arc<dyn FaceDetector> = Arc::new(SerializedDetector::new(detector));
        let photos = PhotoDirectory::new(config.photo_dir.clone());

        tracing::info!(
            detector = detector.name(),
            photo_dir = %photos.root().display(),
            threshold = config.policy.threshold,
            min_face_area_ratio = config.policy.min_face_area_ratio,
            "face engine ready"
        );

        let rebuild_uc = Arc::new(RebuildUseCase::new(store.clone(), photos.clone(), detector.clone()));

        Ok(Self {
            enroll_uc: EnrollUseCase::new(store.clone(), photos.clone(), detector.clone(), rebuild_uc.clone()),
            remove_uc: RemoveUseCase::new(store.clone(), photos, rebuild_uc.clone()),
            match_uc: MatchUseCase::new(store.clone(), detector, config.policy),
            rebuild_uc,
            store,
        })
    }

    pub async fn enroll(&self, name: &str, employee_id: &str, photo: &[u8]) -> Result<Outcome, DomainError> {
        Outcome::from_result(self.enroll_uc.execute(name, employee_id, photo).await)
    }

    pub async fn remove(&self, employee_id: &str) -> Result<Outcome, DomainError> {
        Outcome::from_result(self.remove_uc.execute(employee_id).await)
    }

    pub async fn rebuild(&self) -> Result<Outcome, DomainError> {
        let report = self.rebuild_uc.execute().await?;
        if report.is_rebuilt() {
            Ok(Outcome::success(report.to_string()))
        } else {
            Ok(Outcome::warning(report.to_string()))
        }
    }

    pub async fn match_face(&self, image: &[u8]) -> Result<FaceMatch, DomainError> {
        self.match_uc.execute(image).await
    }

    pub async fn find_by_id(&self, employee_id: &str) -> Result<Option<usize>, DomainError> {
        let id = EmployeeId::new(employee_id)?;
        Ok(self.store.find_by_id(&id).await)
    }

    pub async fn list(&self) -> Vec<EmployeeRecord> {
        self.store.list().await
    }

    pub async fn stats(&self) -> StoreStats {
        self.store.stats().await
    }

    pub fn health(&self) -> Outcome {
        Outcome::success("ok")
    }
}
