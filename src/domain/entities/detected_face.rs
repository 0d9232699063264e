use crate::domain::values::bounding_box::BoundingBox;
use crate::domain::values::embedding::Embedding;

/// One face found by the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedFace {
    pub bbox: BoundingBox,
    pub embedding: Embedding,
}

impl DetectedFace {
    pub fn new(bbox: BoundingBox, embedding: Embedding) -> Self {
        Self { bbox, embedding }
    }
}

/// The face with the largest bounding-box area. Only a strictly larger area
/// replaces the current pick, so ties go to the first face.
pub fn largest_face(faces: &[DetectedFace]) -> Option<&DetectedFace> {
    let mut iter = faces.iter();
    let mut best = iter.next()?;
    for face in iter {
        if face.bbox.area() > best.bbox.area() {
            best = face;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::embedding::EMBEDDING_DIM;

    fn face(x2: f32, y2: f32, hot: usize) -> DetectedFace {
        let mut v = vec![0.0; EMBEDDING_DIM];
        v[hot] = 1.0;
        DetectedFace::new(BoundingBox::new(0.0, 0.0, x2, y2), Embedding::new(v).unwrap())
    }

    #[test]
    fn test_picks_largest_area() {
        let faces = vec![face(10.0, 10.0, 0), face(30.0, 20.0, 1), face(20.0, 20.0, 2)];
        assert_eq!(largest_face(&faces).unwrap().embedding.as_slice()[1], 1.0);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let faces = vec![face(10.0, 40.0, 0), face(20.0, 20.0, 1), face(40.0, 10.0, 2)];
        assert_eq!(largest_face(&faces).unwrap().embedding.as_slice()[0], 1.0);
    }

    #[test]
    fn test_zero_area_faces_still_selectable() {
        let faces = vec![face(0.0, 0.0, 4)];
        assert!(largest_face(&faces).is_some());
        assert!(largest_face(&[]).is_none());
    }
}
