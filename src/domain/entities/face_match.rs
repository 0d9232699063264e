use serde::Serialize;

/// A successful identification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceMatch {
    /// Query face box as `[x1, y1, x2, y2]` pixels.
    pub bbox: [i32; 4],
    pub employee_id: String,
    pub name: String,
    /// Raw cosine similarity of the query face against the matched employee.
    pub similarity: f32,
}
