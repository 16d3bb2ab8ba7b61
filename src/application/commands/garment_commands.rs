// src/application/commands/garment_commands.rs
//
// Garment Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services and the identity store
// - Return DTOs
// - Never hold a lock across an await

use log::{debug, warn};

use crate::application::{dto::*, error_handling::*, state::AppState};
use crate::domain::{validate_upload, Image, PaletteRequest};
use crate::error::{AppError, AppResult};
use crate::events::{
    GarmentSwapped, GarmentsUploaded, PaletteRequested, PaletteSettled, SelectionChanged,
};

/// Validate and add garments to the catalog. Invalid files are dropped and counted.
pub async fn upload_garments(
    uploads: Vec<UploadDto>,
    state: &AppState,
) -> Result<UploadReport, ErrorResponse> {
    let mut accepted = Vec::with_capacity(uploads.len());
    let mut rejected = 0;

    for dto in uploads {
        let file_name = dto.file_name.clone();
        match dto.into_upload().and_then(|u| validate_upload(&u).map_err(AppError::from)) {
            Ok(image) => accepted.push(image),
            Err(e) => {
                warn!("Rejected garment upload '{}': {}", file_name, e);
                rejected += 1;
            }
        }
    }

    let added = accepted.len();
    let catalog_size = {
        let mut store = state.store();
        store.upload(accepted);
        store.catalog().len()
    };

    state
        .event_bus
        .emit(GarmentsUploaded::new(added, rejected, catalog_size));
    Ok(UploadReport::new(added, rejected))
}

/// Toggle a garment in or out of the selection.
///
/// When the selection becomes a single new garment its palette is generated
/// before returning. A palette failure is reported in the result, not as an error.
pub async fn toggle_garment(
    data_url: String,
    state: &AppState,
) -> Result<SelectionDto, ErrorResponse> {
    let garment = parse_identity(&data_url)?;

    let (request, changed) = {
        let mut store = state.store();
        let known = store.catalog().contains(&garment);
        let request = store.toggle_select(&garment);
        let changed = known.then(|| (store.is_selected(&garment), store.selection().len()));
        (request, changed)
    };

    if let Some((selected, selection_size)) = changed {
        state.event_bus.emit(SelectionChanged::new(
            garment.short_digest(),
            selected,
            selection_size,
        ));
    }

    let palette_error = match request {
        Some(request) => refresh_palette(request, state)
            .await
            .err()
            .map(ErrorResponse::from_app_error),
        None => None,
    };

    Ok(selection_view(state, palette_error))
}

/// Replace a garment by another version of it everywhere it appears
pub async fn swap_garment(
    old_data_url: String,
    new_data_url: String,
    state: &AppState,
) -> Result<SelectionDto, ErrorResponse> {
    let old = parse_identity(&old_data_url)?;
    let new = parse_identity(&new_data_url)?;

    swap(&old, &new, state);
    Ok(selection_view(state, None))
}

/// Swap the selected garment for the palette variant at `index`
pub async fn select_palette_variant(
    index: usize,
    state: &AppState,
) -> Result<SelectionDto, ErrorResponse> {
    let (selected, variant) = {
        let store = state.store();
        let selected = store.single_selected().cloned().ok_or_else(no_single_selection)?;
        let variant = store.palette().get(index).cloned().ok_or_else(|| {
            ErrorResponse::validation(format!("No color variation at position {}", index))
        })?;
        (selected, variant)
    };

    swap(&selected, &variant, state);
    Ok(selection_view(state, None))
}

/// Recolor the selected garment with free text and swap it in.
///
/// The result is dropped if the selection moved away from that garment while
/// the recolor was running.
pub async fn apply_custom_color(
    color: String,
    state: &AppState,
) -> Result<SelectionDto, ErrorResponse> {
    let selected = state
        .store()
        .single_selected()
        .cloned()
        .ok_or_else(no_single_selection)?;

    let recolored = state
        .color_variation_service
        .generate_one(&selected, &color)
        .await
        .to_error_response()?;

    let replaced = {
        let mut store = state.store();
        if store.single_selected() == Some(&selected) {
            Some(store.swap(&selected, &recolored))
        } else {
            None
        }
    };

    match replaced {
        Some(replaced) => emit_swapped(&selected, &recolored, replaced, state),
        None => debug!(
            "Dropping custom recolor of {}: selection changed",
            selected.short_digest()
        ),
    }
    Ok(selection_view(state, None))
}

/// Generate the palette again for the current single selection
pub async fn retry_palette(state: &AppState) -> Result<SelectionDto, ErrorResponse> {
    let request = state
        .store()
        .palette_request_for_current()
        .ok_or_else(no_single_selection)?;

    refresh_palette(request, state).await.to_error_response()?;
    Ok(selection_view(state, None))
}

/// Everything the studio screen shows
pub async fn get_studio(state: &AppState) -> Result<StudioDto, ErrorResponse> {
    let catalog = {
        let store = state.store();
        store
            .catalog()
            .iter()
            .map(|image| GarmentDto {
                image: ImageDto::from(image),
                selected: store.is_selected(image),
            })
            .collect()
    };

    let (person_photo, background, results) = {
        let session = state.session();
        (
            session.person_photo.as_ref().map(ImageDto::from),
            session.background.as_str().to_string(),
            session.results.iter().map(TryOnResultDto::from).collect(),
        )
    };

    Ok(StudioDto {
        catalog,
        selection: selection_view(state, None),
        person_photo,
        background,
        results,
    })
}

// ============================================================================
// HELPERS
// ============================================================================

fn parse_identity(data_url: &str) -> Result<Image, ErrorResponse> {
    Image::from_data_url(data_url)
        .map_err(|e| ErrorResponse::from_app_error(AppError::Domain(e)))
}

fn no_single_selection() -> ErrorResponse {
    ErrorResponse::from_app_error(AppError::InvalidRequest(
        "Select a single item to change its color.".to_string(),
    ))
}

fn swap(old: &Image, new: &Image, state: &AppState) {
    let replaced = state.store().swap(old, new);
    emit_swapped(old, new, replaced, state);
}

fn emit_swapped(old: &Image, new: &Image, replaced: usize, state: &AppState) {
    if replaced > 0 {
        state.event_bus.emit(GarmentSwapped::new(
            old.short_digest(),
            new.short_digest(),
            replaced,
        ));
    }
}

/// Run the palette for `request` and store it if the ticket is still current.
///
/// Errors for superseded tickets are swallowed.
async fn refresh_palette(request: PaletteRequest, state: &AppState) -> AppResult<()> {
    let digest = request.garment.short_digest();
    state
        .event_bus
        .emit(PaletteRequested::new(digest.clone(), request.generation));

    match state
        .color_variation_service
        .generate_palette(&request.garment)
        .await
    {
        Ok(palette) => {
            let variants = palette.len();
            let applied = state.store().apply_palette(&request, palette);
            state.event_bus.emit(PaletteSettled::new(
                digest,
                request.generation,
                variants,
                applied,
            ));
            Ok(())
        }
        Err(e) => {
            state
                .event_bus
                .emit(PaletteSettled::new(digest, request.generation, 0, false));

            let still_current = state
                .store()
                .palette_request_for_current()
                .map(|current| current.generation)
                == Some(request.generation);

            if still_current {
                Err(e)
            } else {
                warn!("Ignoring failure of superseded palette request: {}", e);
                Ok(())
            }
        }
    }
}

fn selection_view(state: &AppState, palette_error: Option<ErrorResponse>) -> SelectionDto {
    let store = state.store();
    SelectionDto {
        selection: store.selection().iter().map(ImageDto::from).collect(),
        active_garment: store.single_selected().map(ImageDto::from),
        palette: store.palette().iter().map(ImageDto::from).collect(),
        palette_error,
    }
}
