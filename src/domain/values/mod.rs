pub mod bounding_box;
pub mod embedding;
pub mod employee_id;
pub mod match_policy;
pub mod outcome;
