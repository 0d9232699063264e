use crate::application::face_store::FaceStore;
use crate::application::rebuild::RebuildUseCase;
use crate::domain::entities::detected_face::largest_face;
use crate::domain::entities::employee::{EmployeeRecord, EnrolledFace};
use crate::domain::error::DomainError;
use crate::domain::ports::face_detector::FaceDetector;
use crate::domain::values::employee_id::EmployeeId;
use crate::infrastructure::photos::codec::decode_image;
use crate::infrastructure::photos::photo_dir::PhotoDirectory;
use std::sync::Arc;

pub struct EnrollUseCase {
    store: Arc<FaceStore>,
    photos: PhotoDirectory,
    detector: Arc<dyn FaceDetector>,
    rebuild: Arc<RebuildUseCase>,
}

impl EnrollUseCase {
    pub fn new(
        store: Arc<FaceStore>,
        photos: PhotoDirectory,
        detector: Arc<dyn FaceDetector>,
        rebuild: Arc<RebuildUseCase>,
    ) -> Self {
        Self { store, photos, detector, rebuild }
    }

    /// Stores the photo, enrolls its largest face and then rebuilds the table
    /// from the photo directory. Returns a summary of both steps. Once the
    /// enrollment is committed a failing rebuild only shows up in the summary.
    ///
    /// The photo is written before the duplicate check, so re-enrolling an
    /// existing id replaces its photo even though the store is unchanged.
    pub async fn execute(&self, name: &str, employee_id: &str, photo: &[u8]) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Employee name must not be empty".into()));
        }
        let id = EmployeeId::new(employee_id)?;
        let image = decode_image(photo)?;

        let mut table = self.store.lock_for_update().await;

        let photo_filename = self.photos.store(&id, &image)?;

        if table.find_by_id(&id).is_some() {
            return Err(DomainError::DuplicateEmployee(id.to_string()));
        }

        // Embed what is on disk so the vector matches what a rebuild computes
        let stored = decode_image(&self.photos.read(&id)?)?;
        let faces = self.detector.detect(&stored).await?;
        let face = largest_face(&faces).ok_or(DomainError::NoFaceDetected)?;

        let mut next = table.clone();
        next.push(EnrolledFace::new(
            EmployeeRecord::new(id.clone(), name.to_string(), photo_filename),
            face.embedding.clone(),
        ));
        self.store.commit(&mut table, next)?;
        tracing::info!(employee_id = %id, faces = faces.len(), "employee enrolled");

        let report = self.rebuild.follow_up(&mut table).await;
        Ok(format!("Employee added ({name}, {id}). {report}"))
    }
}
