pub mod face_repo;
pub mod migrations;
