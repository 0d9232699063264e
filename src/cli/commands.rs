use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "faceid", about = "Employee face enrollment and identification")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enroll an employee from a photo
    Enroll {
        /// Display name
        name: String,
        /// Employee number, also used as the photo file name
        employee_id: String,
        /// Path to the photo (JPEG or PNG)
        photo: PathBuf,
    },
    /// Remove an employee, their embedding and their photo
    Remove {
        employee_id: String,
    },
    /// Recompute all embeddings from the photo directory
    Rebuild,
    /// Identify the person in an image
    Match {
        /// Path to the query image
        image: PathBuf,
    },
    /// List enrolled employees
    List,
    /// Show record and embedding counts
    Stats,
    /// Check that the engine starts
    Health,
}
