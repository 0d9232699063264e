use crate::application::face_store::FaceStore;
use crate::application::rebuild::RebuildUseCase;
use crate::domain::error::DomainError;
use crate::domain::values::employee_id::EmployeeId;
use crate::infrastructure::photos::photo_dir::PhotoDirectory;
use std::sync::Arc;

pub struct RemoveUseCase {
    store: Arc<FaceStore>,
    photos: PhotoDirectory,
    rebuild: Arc<RebuildUseCase>,
}

impl RemoveUseCase {
    pub fn new(store: Arc<FaceStore>, photos: PhotoDirectory, rebuild: Arc<RebuildUseCase>) -> Self {
        Self { store, photos, rebuild }
    }

    /// Deletes every record and the photo for `employee_id`, then rebuilds.
    /// Once the removal is committed a failing rebuild only shows up in the
    /// returned summary.
    pub async fn execute(&self, employee_id: &str) -> Result<String, DomainError> {
        let id = EmployeeId::new(employee_id)?;
        let mut table = self.store.lock_for_update().await;

        if !self.store.is_initialized()? {
            return Err(DomainError::StoreNotInitialized);
        }

        let mut next = table.clone();
        let removed = next.remove_all(&id);
        if removed == 0 {
            return Err(DomainError::EmployeeNotFound(id.to_string()));
        }

        let photo_deleted = self.photos.remove(&id)?;
        self.store.commit(&mut table, next)?;
        tracing::info!(employee_id = %id, removed, photo_deleted, "employee removed");

        let report = self.rebuild.follow_up(&mut table).await;
        Ok(format!("Employee {id} removed. {report}"))
    }
}
