// src/events/types.rs
//
// All events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry digests, never image bytes
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::TryOnStage;
use crate::error::ErrorKind;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($ty:ty, $name:literal) => {
        impl DomainEvent for $ty {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { $name }
        }
    };
}

// ============================================================================
// CATALOG & SELECTION EVENTS
// ============================================================================

/// Emitted after a garment upload batch was validated and applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentsUploaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub accepted: usize,
    pub rejected: usize,
    pub catalog_size: usize,
}

impl GarmentsUploaded {
    pub fn new(accepted: usize, rejected: usize, catalog_size: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            accepted,
            rejected,
            catalog_size,
        }
    }
}

impl_domain_event!(GarmentsUploaded, "GarmentsUploaded");

/// Emitted when the selection set changed membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub garment_digest: String,
    pub selected: bool,
    pub selection_size: usize,
}

impl SelectionChanged {
    pub fn new(garment_digest: String, selected: bool, selection_size: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            garment_digest,
            selected,
            selection_size,
        }
    }
}

impl_domain_event!(SelectionChanged, "SelectionChanged");

/// Emitted when a garment's content was replaced by a variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentSwapped {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub old_digest: String,
    pub new_digest: String,
    pub replaced: usize,
}

impl GarmentSwapped {
    pub fn new(old_digest: String, new_digest: String, replaced: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            old_digest,
            new_digest,
            replaced,
        }
    }
}

impl_domain_event!(GarmentSwapped, "GarmentSwapped");

// ============================================================================
// PALETTE EVENTS
// ============================================================================

/// Emitted when palette generation starts for a single selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub garment_digest: String,
    pub generation: u64,
}

impl PaletteRequested {
    pub fn new(garment_digest: String, generation: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            garment_digest,
            generation,
        }
    }
}

impl_domain_event!(PaletteRequested, "PaletteRequested");

/// Emitted when a palette response arrived. `applied` is false for stale responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteSettled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub garment_digest: String,
    pub generation: u64,
    pub variants: usize,
    pub applied: bool,
}

impl PaletteSettled {
    pub fn new(garment_digest: String, generation: u64, variants: usize, applied: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            garment_digest,
            generation,
            variants,
            applied,
        }
    }
}

impl_domain_event!(PaletteSettled, "PaletteSettled");

// ============================================================================
// TRY-ON PIPELINE EVENTS
// ============================================================================

/// Progress: a stage is about to run for one item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnStageStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub item_index: usize,
    pub total: usize,
    pub stage: TryOnStage,
    pub label: String,
}

impl TryOnStageStarted {
    pub fn new(item_index: usize, total: usize, stage: TryOnStage) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            item_index,
            total,
            stage,
            label: stage.label(item_index, total),
        }
    }
}

impl_domain_event!(TryOnStageStarted, "TryOnStageStarted");

/// Both stages finished for one item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnItemCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub item_index: usize,
    pub total: usize,
    pub garment_digest: String,
}

impl TryOnItemCompleted {
    pub fn new(item_index: usize, total: usize, garment_digest: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            item_index,
            total,
            garment_digest,
        }
    }
}

impl_domain_event!(TryOnItemCompleted, "TryOnItemCompleted");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnRunCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub results: usize,
}

impl TryOnRunCompleted {
    pub fn new(results: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            results,
        }
    }
}

impl_domain_event!(TryOnRunCompleted, "TryOnRunCompleted");

/// The run aborted; no results were kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnRunFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub item_index: usize,
    pub stage: TryOnStage,
    pub error_kind: ErrorKind,
    pub message: String,
}

impl TryOnRunFailed {
    pub fn new(item_index: usize, stage: TryOnStage, error_kind: ErrorKind, message: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            item_index,
            stage,
            error_kind,
            message,
        }
    }
}

impl_domain_event!(TryOnRunFailed, "TryOnRunFailed");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_started_carries_label() {
        let event = TryOnStageStarted::new(1, 3, TryOnStage::Compose);
        assert_eq!(event.label, "Generating try-on for item 2 of 3...");
        assert_eq!(event.event_type(), "TryOnStageStarted");
    }

    #[test]
    fn test_events_have_unique_ids() {
        let a = TryOnRunCompleted::new(2);
        let b = TryOnRunCompleted::new(2);
        assert_ne!(a.event_id(), b.event_id());
    }
}
