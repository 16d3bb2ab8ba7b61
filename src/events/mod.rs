// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and must NOT be exported

pub mod bus;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Catalog & selection
    GarmentSwapped,
    GarmentsUploaded,
    // Palette
    PaletteRequested,
    PaletteSettled,
    SelectionChanged,
    // Try-on pipeline
    TryOnItemCompleted,
    TryOnRunCompleted,
    TryOnRunFailed,
    TryOnStageStarted,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
