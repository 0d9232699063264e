use crate::domain::entities::face_table::FaceTable;
use crate::domain::error::DomainError;

/// Durable home of the record list and the embedding matrix.
///
/// Implementations must write both artifacts as one unit: after `write`
/// returns, a reader sees either the old pair or the new pair, never a mix.
pub trait FaceRepository: Send + Sync {
    /// Whether both artifacts exist.
    fn is_initialized(&self) -> Result<bool, DomainError>;

    /// Creates empty artifacts where they are missing.
    fn initialize(&self) -> Result<(), DomainError>;

    /// Reads and validates both artifacts. Shape problems are reported as
    /// [`DomainError::CorruptArtifact`].
    fn read(&self) -> Result<FaceTable, DomainError>;

    /// Replaces both artifacts with `table`.
    fn write(&self, table: &FaceTable) -> Result<(), DomainError>;
}
