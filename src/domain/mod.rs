// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod garment;
pub mod image;
pub mod palette;
pub mod tryon;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Image
pub use image::{validate_image, validate_upload, Image, ImageUpload, MediaType};

// Garment collections
pub use garment::{GarmentCatalog, PaletteRequest, SelectionSet, VariationCache};

// Try-on
pub use tryon::{
    find_background_preset, BackgroundDirective, BackgroundPreset, TryOnResult, TryOnStage,
    BACKGROUND_PRESETS,
};

// Palette
pub use palette::{ColorDirective, PALETTE};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of input shape and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
