use super::entity::{Image, ImageUpload, MediaType};
use crate::domain::{DomainError, DomainResult};

/// Validates an upload and turns it into an Image.
///
/// Nothing is mutated here; callers validate a whole batch before touching
/// any state.
pub fn validate_upload(upload: &ImageUpload) -> DomainResult<Image> {
    let media_type = validate_media_type(&upload.media_type)?;
    validate_not_empty(upload)?;
    Ok(Image::new(media_type.as_mime(), upload.data.clone()))
}

/// Only PNG, JPEG, WEBP, HEIC and HEIF are accepted
fn validate_media_type(mime: &str) -> DomainResult<MediaType> {
    MediaType::from_mime(mime).ok_or_else(|| DomainError::UnsupportedMediaType(mime.to_string()))
}

/// Zero-byte files cannot be images
fn validate_not_empty(upload: &ImageUpload) -> DomainResult<()> {
    if upload.data.is_empty() {
        return Err(DomainError::InvalidImage(format!(
            "File '{}' is empty",
            upload.file_name
        )));
    }
    Ok(())
}

/// Validates an image that is about to be sent to the generation service
pub fn validate_image(image: &Image) -> DomainResult<()> {
    if image.is_empty() {
        return Err(DomainError::InvalidImage("Image has no data".to_string()));
    }
    if image.media_type().trim().is_empty() {
        return Err(DomainError::InvalidImage(
            "Image has no media type".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_upload() {
        let upload = ImageUpload::new("dress.png", "image/png", vec![1, 2, 3]);
        let image = validate_upload(&upload).unwrap();
        assert_eq!(image.media_type(), "image/png");
        assert_eq!(image.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_jpg_alias_is_normalized() {
        let upload = ImageUpload::new("shirt.jpg", "image/jpg", vec![7]);
        let image = validate_upload(&upload).unwrap();
        assert_eq!(image.media_type(), "image/jpeg");
    }

    #[test]
    fn test_unsupported_media_type() {
        let upload = ImageUpload::new("anim.gif", "image/gif", vec![1]);
        match validate_upload(&upload) {
            Err(DomainError::UnsupportedMediaType(mime)) => assert_eq!(mime, "image/gif"),
            other => panic!("Expected UnsupportedMediaType, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_upload_fails() {
        let upload = ImageUpload::new("empty.png", "image/png", Vec::new());
        let result = validate_upload(&upload);
        assert!(matches!(result, Err(DomainError::InvalidImage(_))));
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image(&Image::new("image/png", vec![1])).is_ok());
        assert!(validate_image(&Image::new("image/png", Vec::new())).is_err());
        assert!(validate_image(&Image::new(" ", vec![1])).is_err());
    }
}
