pub mod entity;
pub mod invariants;

pub use entity::{Image, ImageUpload, MediaType};
pub use invariants::{validate_image, validate_upload};
