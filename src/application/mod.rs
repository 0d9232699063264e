pub mod enroll;
pub mod face_store;
pub mod match_face;
pub mod rebuild;
pub mod remove;
