// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - Images cross the boundary as data URLs; the data URL is the identity
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only, except uploads

use serde::{Deserialize, Serialize};

use crate::application::error_handling::ErrorResponse;
use crate::domain::{BackgroundPreset, Image, ImageUpload, TryOnResult};
use crate::error::AppResult;

// ============================================================================
// IMAGE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDto {
    pub media_type: String,
    pub data_url: String,
    /// Short content digest, for logs and keys in UI lists
    pub digest: String,
}

impl From<&Image> for ImageDto {
    fn from(image: &Image) -> Self {
        Self {
            media_type: image.media_type().to_string(),
            data_url: image.to_data_url(),
            digest: image.short_digest(),
        }
    }
}

/// A file picked by the user, not validated yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDto {
    pub file_name: String,
    pub data_url: String,
}

impl UploadDto {
    /// Unpack the data URL. The declared media type is carried over as-is
    /// and checked later by `validate_upload`.
    pub fn into_upload(self) -> AppResult<ImageUpload> {
        let image = Image::from_data_url(&self.data_url)?;
        Ok(ImageUpload::new(
            self.file_name,
            image.media_type(),
            image.data().to_vec(),
        ))
    }
}

/// Outcome of a garment upload batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    pub accepted: usize,
    pub rejected: usize,
    /// Set when at least one file was rejected
    pub message: Option<String>,
}

impl UploadReport {
    pub fn new(accepted: usize, rejected: usize) -> Self {
        let message = (rejected > 0).then(|| {
            format!(
                "{} image(s) had an unsupported format and were not uploaded. Please use PNG, JPG, WEBP, HEIC, or HEIF.",
                rejected
            )
        });
        Self {
            accepted,
            rejected,
            message,
        }
    }
}

// ============================================================================
// GARMENT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentDto {
    pub image: ImageDto,
    pub selected: bool,
}

/// Selection and palette after a selection-affecting command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionDto {
    pub selection: Vec<ImageDto>,
    /// The garment the palette belongs to, when exactly one is selected
    pub active_garment: Option<ImageDto>,
    pub palette: Vec<ImageDto>,
    /// Palette generation failed; the selection change still stands
    pub palette_error: Option<ErrorResponse>,
}

/// Full view of the studio, for an initial render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioDto {
    pub catalog: Vec<GarmentDto>,
    pub selection: SelectionDto,
    pub person_photo: Option<ImageDto>,
    pub background: String,
    pub results: Vec<TryOnResultDto>,
}

// ============================================================================
// TRY-ON DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnResultDto {
    pub garment: ImageDto,
    pub image: ImageDto,
}

impl From<&TryOnResult> for TryOnResultDto {
    fn from(result: &TryOnResult) -> Self {
        Self {
            garment: ImageDto::from(&result.garment),
            image: ImageDto::from(&result.image),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundPresetDto {
    pub name: String,
    pub value: String,
}

impl From<&BackgroundPreset> for BackgroundPresetDto {
    fn from(preset: &BackgroundPreset) -> Self {
        Self {
            name: preset.name.to_string(),
            value: preset.value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_image_dto_round_trips_through_data_url() {
        let image = Image::new("image/png", vec![0u8, 255, 7]);
        let dto = ImageDto::from(&image);

        assert_eq!(dto.media_type, "image/png");
        assert_eq!(dto.digest, image.short_digest());
        assert_eq!(Image::from_data_url(&dto.data_url).unwrap(), image);
    }

    #[test]
    fn test_upload_dto_keeps_declared_type() {
        let dto = UploadDto {
            file_name: "anim.gif".to_string(),
            data_url: Image::new("image/gif", vec![1u8]).to_data_url(),
        };
        let upload = dto.into_upload().unwrap();
        assert_eq!(upload.file_name, "anim.gif");
        assert_eq!(upload.media_type, "image/gif");
    }

    #[test]
    fn test_upload_dto_rejects_malformed_url() {
        let dto = UploadDto {
            file_name: "x.png".to_string(),
            data_url: "not a data url".to_string(),
        };
        assert!(matches!(dto.into_upload(), Err(AppError::Domain(_))));
    }

    #[test]
    fn test_upload_report_message() {
        assert_eq!(UploadReport::new(3, 0).message, None);
        assert_eq!(
            UploadReport::new(2, 1).message.as_deref(),
            Some("1 image(s) had an unsupported format and were not uploaded. Please use PNG, JPG, WEBP, HEIC, or HEIF.")
        );
    }
}
