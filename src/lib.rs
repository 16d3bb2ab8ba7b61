// src/lib.rs
// Try-On Studio - virtual try-on orchestration over a generative image service
//
// Architecture:
// - Domain-centric: images, garments, palettes and try-on values live in domain
// - Event-driven: services report progress and state changes through the bus
// - Explicit: identity is image content, no hidden keys
// - The generation service is reached only through the GenerationBackend seam
// - Application Layer: UI boundary (commands, DTOs, session state)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod integrations;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    find_background_preset,
    validate_image,
    validate_upload,
    BackgroundDirective,
    BackgroundPreset,
    ColorDirective,
    // Garments
    GarmentCatalog,
    // Image
    Image,
    ImageUpload,
    MediaType,
    PaletteRequest,
    SelectionSet,
    // Try-on
    TryOnResult,
    TryOnStage,
    VariationCache,
    BACKGROUND_PRESETS,
    PALETTE,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    GarmentSwapped,
    GarmentsUploaded,
    PaletteRequested,
    PaletteSettled,
    SelectionChanged,
    TryOnItemCompleted,
    TryOnRunCompleted,
    TryOnRunFailed,
    TryOnStageStarted,
};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{GeminiClient, GenerationBackend, GenerationConfig};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{ColorVariationService, GenerationService, IdentitySyncStore, TryOnService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse};

// Re-export application submodules
pub use application::commands;
pub use application::dto;
