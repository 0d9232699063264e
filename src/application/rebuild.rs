use crate::application::face_store::FaceStore;
use crate::domain::entities::detected_face::largest_face;
use crate::domain::entities::employee::{EmployeeRecord, EnrolledFace};
use crate::domain::entities::face_table::FaceTable;
use crate::domain::error::DomainError;
use crate::domain::ports::face_detector::FaceDetector;
use crate::domain::values::embedding::Embedding;
use crate::domain::values::employee_id::EmployeeId;
use crate::infrastructure::photos::codec::decode_image;
use crate::infrastructure::photos::photo_dir::PhotoDirectory;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RebuildReport {
    Rebuilt { employees: usize, skipped: Vec<String> },
    NoPhotoDirectory,
    NoPhotos,
    NoValidEmbeddings { skipped: Vec<String> },
}

impl RebuildReport {
    pub fn is_rebuilt(&self) -> bool {
        matches!(self, RebuildReport::Rebuilt { .. })
    }
}

impl fmt::Display for RebuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildReport::Rebuilt { employees, skipped } if skipped.is_empty() => {
                write!(f, "Embeddings rebuilt ({employees} employees).")
            }
            RebuildReport::Rebuilt { employees, skipped } => write!(
                f,
                "Embeddings rebuilt ({employees} employees, skipped {}).",
                skipped.join(", ")
            ),
            RebuildReport::NoPhotoDirectory => write!(f, "No employee photo directory."),
            RebuildReport::NoPhotos => write!(f, "No photos to rebuild from."),
            RebuildReport::NoValidEmbeddings { .. } => write!(f, "No valid embedding was generated."),
        }
    }
}

/// Recomputes the whole face table from the photo directory.
pub struct RebuildUseCase {
    store: Arc<FaceStore>,
    photos: PhotoDirectory,
    detector: Arc<dyn FaceDetector>,
}

impl RebuildUseCase {
    pub fn new(store: Arc<FaceStore>, photos: PhotoDirectory, detector: Arc<dyn FaceDetector>) -> Self {
        Self { store, photos, detector }
    }

    pub async fn execute(&self) -> Result<RebuildReport, DomainError> {
        let mut table = self.store.lock_for_update().await;
        self.rebuild_locked(&mut table).await
    }

    /// Rebuild for callers already holding the store's write lock. `current`
    /// supplies the names to carry over and is replaced only when at least
    /// one photo produced an embedding.
    pub async fn rebuild_locked(&self, current: &mut FaceTable) -> Result<RebuildReport, DomainError> {
        if !self.photos.exists() {
            return Ok(RebuildReport::NoPhotoDirectory);
        }
        let files = self.photos.list()?;
        if files.is_empty() {
            return Ok(RebuildReport::NoPhotos);
        }

        let known_names: HashMap<&EmployeeId, &str> = current
            .records()
            .map(|r| (&r.employee_id, r.name.as_str()))
            .collect();

        let mut entries = Vec::new();
        let mut skipped = Vec::new();
        let mut seen = HashSet::new();
        for path in &files {
            let filename = file_name(path);
            let Some(id) = photo_id(path) else {
                skipped.push(filename);
                continue;
            };
            // Stems differing only in extension case name the same employee
            if !seen.insert(id.clone()) {
                tracing::warn!(path = %path.display(), employee_id = %id, "skipping second photo for the same employee");
                skipped.push(filename);
                continue;
            }
            match self.embed_photo(path, &id).await? {
                Some(face) => {
                    let name = known_names
                        .get(&id)
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| id.to_string());
                    entries.push(EnrolledFace::new(EmployeeRecord::new(id, name, filename), face));
                }
                None => skipped.push(filename),
            }
        }

        if entries.is_empty() {
            tracing::warn!(photos = files.len(), "rebuild produced no embeddings, store left untouched");
            return Ok(RebuildReport::NoValidEmbeddings { skipped });
        }

        let employees = entries.len();
        self.store.commit(current, FaceTable::new(entries))?;
        tracing::info!(employees, skipped = skipped.len(), "face store rebuilt from photos");
        Ok(RebuildReport::Rebuilt { employees, skipped })
    }

    /// Rebuild run after an already committed enrollment or removal. Its
    /// failure does not undo that change, so it is reported as text.
    pub async fn follow_up(&self, current: &mut FaceTable) -> String {
        match self.rebuild_locked(current).await {
            Ok(report) => report.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "follow-up rebuild failed, store keeps the committed change");
                format!("Rebuild failed: {e}.")
            }
        }
    }

    /// Embedding of the largest face in one photo, or `None` when the photo
    /// cannot be used. Detector failures are not swallowed.
    async fn embed_photo(&self, path: &Path, id: &EmployeeId) -> Result<Option<Embedding>, DomainError> {
        let image = match std::fs::read(path)
            .map_err(DomainError::from)
            .and_then(|bytes| decode_image(&bytes))
        {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable photo");
                return Ok(None);
            }
        };

        let faces = self.detector.detect(&image).await?;
        match largest_face(&faces) {
            Some(face) => Ok(Some(face.embedding.clone())),
            None => {
                tracing::warn!(employee_id = %id, "no face detected, photo dropped from store");
                Ok(None)
            }
        }
    }
}

fn photo_id(path: &Path) -> Option<EmployeeId> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    match EmployeeId::new(stem) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping photo with unusable name");
            None
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
