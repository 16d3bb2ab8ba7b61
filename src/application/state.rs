// src/application/state.rs

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{BackgroundDirective, Image, TryOnResult};
use crate::events::EventBus;
use crate::integrations::GenerationBackend;
use crate::services::{ColorVariationService, GenerationService, IdentitySyncStore, TryOnService};

/// Inputs and outputs of the try-on screen that live outside the garment store
#[derive(Debug, Default)]
pub struct SessionState {
    pub person_photo: Option<Image>,
    pub background: BackgroundDirective,
    /// Replaced wholesale by each run; empty while a run is in progress
    pub results: Vec<TryOnResult>,
}

/// Application state shared by all commands.
///
/// Locks guard plain data only and are never held across an `.await`.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub generation_service: Arc<GenerationService>,
    pub color_variation_service: Arc<ColorVariationService>,
    pub tryon_service: Arc<TryOnService>,
    store: Mutex<IdentitySyncStore>,
    session: Mutex<SessionState>,
}

impl AppState {
    /// Wire the services over `backend` with default finish-reason handling
    pub fn new(backend: Arc<dyn GenerationBackend>, event_bus: Arc<EventBus>) -> Self {
        Self::with_generation_service(Arc::new(GenerationService::new(backend)), event_bus)
    }

    pub fn with_generation_service(
        generation_service: Arc<GenerationService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let color_variation_service =
            Arc::new(ColorVariationService::new(Arc::clone(&generation_service)));
        let tryon_service = Arc::new(TryOnService::new(
            Arc::clone(&generation_service),
            Arc::clone(&event_bus),
        ));

        Self {
            event_bus,
            generation_service,
            color_variation_service,
            tryon_service,
            store: Mutex::new(IdentitySyncStore::new()),
            session: Mutex::new(SessionState::default()),
        }
    }

    pub fn store(&self) -> MutexGuard<'_, IdentitySyncStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
