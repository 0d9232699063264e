use crate::domain::values::embedding::Embedding;
use crate::domain::values::employee_id::EmployeeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: EmployeeId,
    pub name: String,
    pub photo_filename: String,
}

impl EmployeeRecord {
    pub fn new(employee_id: EmployeeId, name: String, photo_filename: String) -> Self {
        Self { employee_id, name, photo_filename }
    }
}

/// An employee together with the embedding of their enrolled face. Keeping
/// both in one value is what ties record `i` to vector `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrolledFace {
    pub record: EmployeeRecord,
    pub embedding: Embedding,
}

impl EnrolledFace {
    pub fn new(record: EmployeeRecord, embedding: Embedding) -> Self {
        Self { record, embedding }
    }
}
