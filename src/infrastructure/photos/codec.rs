use crate::domain::error::DomainError;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DomainError> {
    image::load_from_memory(bytes).map_err(|e| DomainError::ImageDecode(e.to_string()))
}

/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(image.to_rgb8())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .map_err(|e| DomainError::Persistence(format!("Failed to encode photo: {e}")))?;
    Ok(buf)
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| DomainError::Detector(format!("Failed to encode image: {e}")))?;
    Ok(buf)
}
