use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::{DomainError, DomainResult};

/// An immutable image blob: raw encoded bytes plus the declared media type.
///
/// Identity is structural. Two images are the same garment only when both the
/// media type and the encoded bytes match, which is exactly the identity of the
/// data URL the UI hands around. No surrogate key is ever assigned.
///
/// Cloning is cheap: the bytes are shared.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Image {
    media_type: String,
    data: Arc<[u8]>,
}

/// Media types accepted for user uploads (person photo and garments)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Png,
    Jpeg,
    Webp,
    Heic,
    Heif,
}

/// A raw file handed over by the UI before validation
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name as reported by the picker (informational only)
    pub file_name: String,

    /// Declared media type, e.g. "image/png"
    pub media_type: String,

    pub data: Vec<u8>,
}

impl Image {
    /// Wrap encoded bytes. The bytes are never decoded or re-encoded.
    pub fn new(media_type: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// SHA-256 of the encoded bytes, hex encoded.
    ///
    /// Only for logs and event payloads; equality is always full content.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.media_type.as_bytes());
        hasher.update(&self.data);
        format!("{:x}", hasher.finalize())
    }

    /// First 12 hex chars of the digest
    pub fn short_digest(&self) -> String {
        let mut digest = self.digest();
        digest.truncate(12);
        digest
    }

    /// Base64 of the raw bytes (no data URL prefix)
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.to_base64())
    }

    /// Parse a `data:<mime>;base64,<payload>` string
    pub fn from_data_url(url: &str) -> DomainResult<Self> {
        let rest = url.strip_prefix("data:").ok_or_else(|| {
            DomainError::InvalidImage("Data URL must start with 'data:'".to_string())
        })?;

        let (header, payload) = rest.split_once(',').ok_or_else(|| {
            DomainError::InvalidImage("Data URL is missing the ',' separator".to_string())
        })?;

        let media_type = header.strip_suffix(";base64").ok_or_else(|| {
            DomainError::InvalidImage("Only base64 data URLs are supported".to_string())
        })?;

        if media_type.is_empty() {
            return Err(DomainError::InvalidImage(
                "Data URL has no media type".to_string(),
            ));
        }

        let data = BASE64
            .decode(payload)
            .map_err(|e| DomainError::InvalidImage(format!("Invalid base64 payload: {}", e)))?;

        Ok(Self::new(media_type, data))
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("media_type", &self.media_type)
            .field("bytes", &self.data.len())
            .field("digest", &self.short_digest())
            .finish()
    }
}

impl MediaType {
    pub const ALL: [MediaType; 5] = [
        MediaType::Png,
        MediaType::Jpeg,
        MediaType::Webp,
        MediaType::Heic,
        MediaType::Heif,
    ];

    /// Parse a MIME string. Parameters (`; charset=...`) and case are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(MediaType::Png),
            "image/jpeg" | "image/jpg" => Some(MediaType::Jpeg),
            "image/webp" => Some(MediaType::Webp),
            "image/heic" => Some(MediaType::Heic),
            "image/heif" => Some(MediaType::Heif),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Webp => "image/webp",
            MediaType::Heic => "image/heic",
            MediaType::Heif => "image/heif",
        }
    }

    /// Conventional file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            MediaType::Png => "png",
            MediaType::Jpeg => "jpg",
            MediaType::Webp => "webp",
            MediaType::Heic => "heic",
            MediaType::Heif => "heif",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_mime())
    }
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_content_equality() {
        let a = Image::new("image/png", vec![1u8, 2, 3]);
        let b = Image::new("image/png", vec![1u8, 2, 3]);
        let c = Image::new("image/png", vec![1u8, 2, 4]);
        let d = Image::new("image/jpeg", vec![1u8, 2, 3]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_data_url_preserves_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let image = Image::new("image/webp", bytes.clone());

        let url = image.to_data_url();
        assert!(url.starts_with("data:image/webp;base64,"));

        let parsed = Image::from_data_url(&url).unwrap();
        assert_eq!(parsed, image);
        assert_eq!(parsed.data(), bytes.as_slice());
    }

    #[test]
    fn test_data_url_rejects_garbage() {
        assert!(Image::from_data_url("http://example.com/a.png").is_err());
        assert!(Image::from_data_url("data:image/png;base64").is_err());
        assert!(Image::from_data_url("data:image/png,abc").is_err());
        assert!(Image::from_data_url("data:;base64,AAAA").is_err());
        assert!(Image::from_data_url("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_digest_is_stable() {
        let a = Image::new("image/png", vec![9u8; 32]);
        assert_eq!(a.digest(), a.clone().digest());
        assert_eq!(a.digest().len(), 64);
        assert_eq!(a.short_digest().len(), 12);
    }

    #[test]
    fn test_media_type_parsing() {
        assert_eq!(MediaType::from_mime("image/PNG"), Some(MediaType::Png));
        assert_eq!(MediaType::from_mime("image/jpg"), Some(MediaType::Jpeg));
        assert_eq!(
            MediaType::from_mime("image/heif; q=1"),
            Some(MediaType::Heif)
        );
        assert_eq!(MediaType::from_mime("image/gif"), None);
        assert_eq!(MediaType::from_mime(""), None);
    }
}
