pub mod detected_face;
pub mod employee;
pub mod face_match;
pub mod face_table;
