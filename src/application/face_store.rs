use crate::domain::entities::employee::EmployeeRecord;
use crate::domain::entities::face_table::FaceTable;
use crate::domain::error::DomainError;
use crate::domain::ports::face_repository::FaceRepository;
use crate::domain::values::embedding::EMBEDDING_DIM;
use crate::domain::values::employee_id::EmployeeId;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub employees: usize,
    pub embeddings: usize,
    pub dimension: usize,
}

/// Process-wide face table and its durable copy.
///
/// Mutations hold the write lock for their whole run and go through
/// [`FaceStore::commit`], which persists the new table before it replaces the
/// in-memory one. Readers take the read lock, so they never observe a table
/// that is not on disk.
pub struct FaceStore {
    repo: Arc<dyn FaceRepository>,
    table: RwLock<FaceTable>,
}

impl FaceStore {
    /// Missing artifacts are created empty. Corrupt artifacts are logged and
    /// reset to empty; the reset is persisted before returning.
    pub fn load(repo: Arc<dyn FaceRepository>) -> Result<Self, DomainError> {
        if !repo.is_initialized()? {
            tracing::warn!("store artifacts missing, creating an empty store");
            repo.initialize()?;
            repo.write(&FaceTable::default())?;
        }

        let table = match repo.read() {
            Ok(table) => table,
            Err(DomainError::CorruptArtifact(reason)) => {
                tracing::warn!(%reason, "store artifacts corrupt, resetting to empty");
                let empty = FaceTable::default();
                repo.write(&empty)?;
                empty
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            employees = table.len(),
            embeddings = table.entries().len(),
            "face store loaded"
        );

        Ok(Self { repo, table: RwLock::new(table) })
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, FaceTable> {
        self.table.read().await
    }

    /// Exclusive access for a mutation. Pair with [`FaceStore::commit`].
    pub async fn lock_for_update(&self) -> RwLockWriteGuard<'_, FaceTable> {
        self.table.write().await
    }

    /// Persists `next` and, only once that succeeded, installs it in place of
    /// `current`. On error `current` is left as it was.
    pub fn commit(&self, current: &mut FaceTable, next: FaceTable) -> Result<(), DomainError> {
        self.repo.write(&next)?;
        *current = next;
        Ok(())
    }

    pub fn is_initialized(&self) -> Result<bool, DomainError> {
        self.repo.is_initialized()
    }

    pub async fn find_by_id(&self, id: &EmployeeId) -> Option<usize> {
        self.table.read().await.find_by_id(id)
    }

    pub async fn list(&self) -> Vec<EmployeeRecord> {
        self.table.read().await.records().cloned().collect()
    }

    pub async fn stats(&self) -> StoreStats {
        let table = self.table.read().await;
        StoreStats {
            employees: table.records().count(),
            embeddings: table.entries().len(),
            dimension: EMBEDDING_DIM,
        }
    }
}
