use crate::domain::entities::employee::{EmployeeRecord, EnrolledFace};
use crate::domain::entities::face_table::FaceTable;
use crate::domain::error::DomainError;
use crate::domain::ports::face_repository::FaceRepository;
use crate::domain::values::embedding::{Embedding, EMBEDDING_DIM};
use crate::domain::values::employee_id::EmployeeId;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::{params, Connection, ErrorCode};
use std::path::Path;
use std::sync::Mutex;

const MEMORY_PATH: &str = ":memory:";

pub struct SqliteFaceRepo {
    conn: Mutex<Connection>,
}

impl SqliteFaceRepo {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    /// Opens the database at `path`. A file SQLite does not recognise as a
    /// database is deleted and recreated empty, as are tables with a foreign
    /// column layout.
    pub fn open(path: &str) -> Result<Self, DomainError> {
        match Self::open_and_migrate(path) {
            Ok(conn) => Ok(Self::new(conn)),
            Err(e) if path != MEMORY_PATH && e.sqlite_error_code() == Some(ErrorCode::NotADatabase) => {
                tracing::warn!(path, error = %e, "store database is unreadable, recreating it empty");
                for suffix in ["", "-wal", "-shm"] {
                    let file = format!("{path}{suffix}");
                    if Path::new(&file).exists() {
                        std::fs::remove_file(&file)?;
                    }
                }
                let conn = Self::open_and_migrate(path)?;
                Ok(Self::new(conn))
            }
            Err(e) => Err(DomainError::Persistence(format!("DB error: {e}"))),
        }
    }

    fn open_and_migrate(path: &str) -> rusqlite::Result<Connection> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        run_migrations(&conn)?;
        Ok(conn)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(|e| DomainError::Persistence(e.to_string()))
    }
}

/// The queries are fixed, so failing to prepare one means the tables do not
/// have the layout this store writes.
fn schema_error(e: rusqlite::Error) -> DomainError {
    DomainError::CorruptArtifact(format!("unexpected table layout: {e}"))
}

fn read_error(e: rusqlite::Error) -> DomainError {
    match e {
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            DomainError::CorruptArtifact(format!("undecodable row: {e}"))
        }
        other => DomainError::Persistence(format!("Failed to read store: {other}")),
    }
}

impl FaceRepository for SqliteFaceRepo {
    fn is_initialized(&self) -> Result<bool, DomainError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('employees', 'embeddings')",
            [],
            |r| r.get(0),
        )?;
        Ok(count == 2)
    }

    fn initialize(&self) -> Result<(), DomainError> {
        let conn = self.lock()?;
        run_migrations(&conn).map_err(|e| DomainError::Persistence(format!("Migration failed: {e}")))
    }

    fn read(&self) -> Result<FaceTable, DomainError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare("SELECT position, employee_id, name, photo_filename FROM employees ORDER BY position")
            .map_err(schema_error)?;
        let records: Vec<(i64, String, String, String)> = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
            .map_err(read_error)?
            .collect::<Result<_, _>>()
            .map_err(read_error)?;

        let mut stmt = conn
            .prepare("SELECT position, dimension, vector FROM embeddings ORDER BY position")
            .map_err(schema_error)?;
        let vectors: Vec<(i64, i64, Vec<u8>)> = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
            .map_err(read_error)?
            .collect::<Result<_, _>>()
            .map_err(read_error)?;

        if records.len() != vectors.len() {
            return Err(DomainError::CorruptArtifact(format!(
                "{} employees but {} embeddings",
                records.len(),
                vectors.len()
            )));
        }

        let mut entries = Vec::with_capacity(records.len());
        for (i, ((rec_pos, id, name, photo), (vec_pos, dimension, blob))) in
            records.into_iter().zip(vectors).enumerate()
        {
            if rec_pos != i as i64 || vec_pos != i as i64 {
                return Err(DomainError::CorruptArtifact(format!(
                    "row {i} misaligned (employee position {rec_pos}, embedding position {vec_pos})"
                )));
            }
            if dimension != EMBEDDING_DIM as i64 {
                return Err(DomainError::CorruptArtifact(format!(
                    "row {i} has dimension {dimension}, expected {EMBEDDING_DIM}"
                )));
            }
            let employee_id = EmployeeId::new(id)
                .map_err(|e| DomainError::CorruptArtifact(format!("row {i}: {e}")))?;
            let embedding = Embedding::from_le_bytes(&blob)?;
            entries.push(EnrolledFace::new(EmployeeRecord::new(employee_id, name, photo), embedding));
        }

        Ok(FaceTable::new(entries))
    }

    fn write(&self, table: &FaceTable) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM employees", [])?;
        tx.execute("DELETE FROM embeddings", [])?;
        {
            let mut insert_employee = tx.prepare(
                "INSERT INTO employees (position, employee_id, name, photo_filename) VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut insert_embedding =
                tx.prepare("INSERT INTO embeddings (position, dimension, vector) VALUES (?1, ?2, ?3)")?;
            for (i, entry) in table.entries().iter().enumerate() {
                insert_employee.execute(params![
                    i as i64,
                    entry.record.employee_id.as_str(),
                    entry.record.name,
                    entry.record.photo_filename,
                ])?;
                insert_embedding.execute(params![
                    i as i64,
                    EMBEDDING_DIM as i64,
                    entry.embedding.to_le_bytes(),
                ])?;
            }
        }
        tx.commit()
            .map_err(|e| DomainError::Persistence(format!("Failed to commit store: {e}")))
    }
}
