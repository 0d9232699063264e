pub mod detectors;
pub mod photos;
pub mod sqlite;
