// src/infrastructure/image_files.rs
//
// Image files on local disk
//
// CRITICAL RULES:
// - Reading never validates; callers run the batch through `validate_upload`
// - The media type is guessed from the file extension only
// - Saving never overwrites an existing file

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::domain::{Image, ImageUpload, MediaType};
use crate::error::{AppError, AppResult};

/// Read `path` as an upload candidate
pub fn read_upload(path: &Path) -> AppResult<ImageUpload> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Validation(format!("Not a file path: {:?}", path)))?;

    let media_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let data = fs::read(path)?;
    debug!("Read {} ({}, {} bytes)", file_name, media_type, data.len());

    Ok(ImageUpload::new(file_name, media_type, data))
}

/// Write `image` into `dir` as `<stem>.<ext>`.
///
/// The directory is created if needed. If the name is taken, a numeric
/// suffix is appended. Media types without a known extension are saved as `.bin`.
pub fn save_image(dir: &Path, stem: &str, image: &Image) -> AppResult<PathBuf> {
    let extension = file_extension(image.media_type());

    fs::create_dir_all(dir)?;

    let mut target = dir.join(format!("{}.{}", stem, extension));
    let mut suffix = 1;
    while target.exists() {
        target = dir.join(format!("{}-{}.{}", stem, suffix, extension));
        suffix += 1;
    }

    fs::write(&target, image.data())?;
    info!("Saved {} bytes to {:?}", image.len(), target);
    Ok(target)
}

fn file_extension(media_type: &str) -> &'static str {
    MediaType::from_mime(media_type)
        .map(|m| m.extension())
        .or_else(|| {
            mime_guess::get_mime_extensions_str(media_type)
                .and_then(|extensions| extensions.first().copied())
        })
        .unwrap_or("bin")
}
