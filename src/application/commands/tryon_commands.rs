// src/application/commands/tryon_commands.rs
//
// Try-On Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Results are cleared when a run starts and replaced when it ends

use std::path::Path;

use log::info;

use crate::application::{dto::*, error_handling::*, state::AppState};
use crate::domain::{find_background_preset, validate_upload, BackgroundDirective, BACKGROUND_PRESETS};
use crate::infrastructure::save_image;

/// Set the full-body photo. An invalid file leaves the current photo untouched.
pub async fn set_person_photo(
    upload: UploadDto,
    state: &AppState,
) -> Result<ImageDto, ErrorResponse> {
    let upload = upload.into_upload().to_error_response()?;
    let image = validate_upload(&upload).map_err(|e| {
        ErrorResponse::validation(format!(
            "{}. Please use PNG, JPG, WEBP, HEIC, or HEIF.",
            e
        ))
    })?;

    let dto = ImageDto::from(&image);
    state.session().person_photo = Some(image);
    info!("Person photo set ({})", dto.digest);
    Ok(dto)
}

/// Set the free-text background directive. Empty keeps the original background.
pub async fn set_background(text: String, state: &AppState) -> Result<String, ErrorResponse> {
    let directive = BackgroundDirective::new(text);
    let value = directive.as_str().to_string();
    state.session().background = directive;
    Ok(value)
}

/// Set the background from a named preset
pub async fn set_background_preset(
    name: String,
    state: &AppState,
) -> Result<String, ErrorResponse> {
    let preset = find_background_preset(&name)
        .ok_or_else(|| ErrorResponse::validation(format!("Unknown background preset '{}'", name)))?;
    set_background(preset.value.to_string(), state).await
}

pub async fn background_presets() -> Result<Vec<BackgroundPresetDto>, ErrorResponse> {
    Ok(BACKGROUND_PRESETS
        .iter()
        .map(BackgroundPresetDto::from)
        .collect())
}

/// Expand the current background idea into a detailed description and use it
pub async fn expand_background(state: &AppState) -> Result<String, ErrorResponse> {
    let idea = state.session().background.as_str().to_string();

    let expanded = state
        .generation_service
        .expand_background_idea(&idea)
        .await
        .to_error_response()?;

    state.session().background = BackgroundDirective::new(expanded.clone());
    Ok(expanded)
}

/// Run the try-on pipeline over the current selection
pub async fn generate_try_on(state: &AppState) -> Result<Vec<TryOnResultDto>, ErrorResponse> {
    let (person, background) = {
        let mut session = state.session();
        session.results.clear();
        (session.person_photo.clone(), session.background.clone())
    };
    let garments = state.store().selection().to_vec();

    let results = state
        .tryon_service
        .run(person.as_ref(), &garments, &background)
        .await
        .to_error_response()?;

    let dtos = results.iter().map(TryOnResultDto::from).collect();
    state.session().results = results;
    Ok(dtos)
}

pub async fn get_results(state: &AppState) -> Result<Vec<TryOnResultDto>, ErrorResponse> {
    Ok(state
        .session()
        .results
        .iter()
        .map(TryOnResultDto::from)
        .collect())
}

/// Write the result image at `index` into `dir`, bytes unchanged. Returns the file path.
pub async fn export_result(
    index: usize,
    dir: &Path,
    state: &AppState,
) -> Result<String, ErrorResponse> {
    let image = state
        .session()
        .results
        .get(index)
        .map(|result| result.image.clone())
        .ok_or_else(|| ErrorResponse::validation(format!("No try-on result at position {}", index)))?;

    let path = save_image(dir, &format!("tryon-{}", index + 1), &image).to_error_response()?;
    Ok(path.display().to_string())
}
