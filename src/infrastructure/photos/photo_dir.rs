use crate::domain::error::DomainError;
use crate::domain::values::employee_id::EmployeeId;
use crate::infrastructure::photos::codec::encode_jpeg;
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};

const PHOTO_EXTENSION: &str = "jpg";

/// Directory holding one JPEG per employee, named `<employee_id>.jpg`. The
/// directory is the source the face table is rebuilt from.
#[derive(Debug, Clone)]
pub struct PhotoDirectory {
    root: PathBuf,
}

impl PhotoDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn filename_for(id: &EmployeeId) -> String {
        format!("{id}.{PHOTO_EXTENSION}")
    }

    pub fn path_for(&self, id: &EmployeeId) -> PathBuf {
        self.root.join(Self::filename_for(id))
    }

    /// Writes the photo as JPEG, replacing any previous photo for `id`. The
    /// bytes go to a temp file first and are renamed into place.
    pub fn store(&self, id: &EmployeeId, image: &DynamicImage) -> Result<String, DomainError> {
        fs::create_dir_all(&self.root)?;
        let data = encode_jpeg(image)?;
        let path = self.path_for(id);
        let mut tmp = path.clone();
        tmp.set_extension("jpg.tmp");
        fs::write(&tmp, data)?;
        fs::rename(tmp, &path)?;
        Ok(Self::filename_for(id))
    }

    pub fn read(&self, id: &EmployeeId) -> Result<Vec<u8>, DomainError> {
        Ok(fs::read(self.path_for(id))?)
    }

    /// Returns whether a photo was there to delete.
    pub fn remove(&self, id: &EmployeeId) -> Result<bool, DomainError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    /// All `.jpg` files (any case), sorted by file name.
    pub fn list(&self) -> Result<Vec<PathBuf>, DomainError> {
        let mut photos = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_photo = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(PHOTO_EXTENSION))
                .unwrap_or(false);
            if is_photo {
                photos.push(path);
            }
        }
        photos.sort();
        Ok(photos)
    }
}
