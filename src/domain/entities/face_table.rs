use crate::domain::entities::employee::{EmployeeRecord, EnrolledFace};
use crate::domain::values::embedding::Embedding;
use crate::domain::values::employee_id::EmployeeId;

/// Ordered set of enrolled faces. Position `i` is row `i` of both persisted
/// artifacts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceTable {
    entries: Vec<EnrolledFace>,
}

impl FaceTable {
    pub fn new(entries: Vec<EnrolledFace>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EnrolledFace] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&EnrolledFace> {
        self.entries.get(index)
    }

    pub fn records(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    pub fn find_by_id(&self, id: &EmployeeId) -> Option<usize> {
        self.entries.iter().position(|e| &e.record.employee_id == id)
    }

    pub fn push(&mut self, face: EnrolledFace) {
        self.entries.push(face);
    }

    /// Removes every entry for `id`, highest index first. Returns how many
    /// were removed.
    pub fn remove_all(&mut self, id: &EmployeeId) -> usize {
        let indices: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| &e.record.employee_id == id)
            .map(|(i, _)| i)
            .collect();
        for idx in indices.iter().rev() {
            self.entries.remove(*idx);
        }
        indices.len()
    }

    /// Index and similarity of the closest stored embedding. Ties keep the
    /// earliest index and non-finite scores never win.
    pub fn best_match(&self, query: &Embedding) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            let sim = entry.embedding.cosine_similarity(query);
            if !sim.is_finite() {
                continue;
            }
            match best {
                Some((_, best_sim)) if sim <= best_sim => {}
                _ => best = Some((i, sim)),
            }
        }
        best
    }
}
