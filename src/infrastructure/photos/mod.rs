pub mod codec;
pub mod photo_dir;
