use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// Width of every face embedding produced by the detector.
pub const EMBEDDING_DIM: usize = 512;

/// A fixed-width face embedding. The detector hands these out L2-normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Result<Self, DomainError> {
        if values.len() != EMBEDDING_DIM {
            return Err(DomainError::InvalidInput(format!(
                "Embedding must have {EMBEDDING_DIM} dimensions, got {}",
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DomainError::InvalidInput("Embedding contains non-finite values".into()));
        }
        Ok(Embedding(values))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Cosine similarity in `-1.0..=1.0`. Zero-norm vectors score 0.
    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (x, y) in self.0.iter().zip(other.0.iter()) {
            let x = *x as f64;
            let y = *y as f64;
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 { 0.0 } else { (dot / denom) as f32 }
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, DomainError> {
        if bytes.len() != EMBEDDING_DIM * 4 {
            return Err(DomainError::CorruptArtifact(format!(
                "vector blob is {} bytes, expected {}",
                bytes.len(),
                EMBEDDING_DIM * 4
            )));
        }
        let values: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::CorruptArtifact(format!(
                "vector blob holds a non-finite value at index {pos}"
            )));
        }
        Ok(Embedding(values))
    }
}
