// src/services/tryon_service.rs
//
// Try-On Service - two-stage pipeline over the selected garments
//
// CRITICAL RULES:
// - Preconditions are checked before any external call
// - Garments are processed strictly in order, one at a time
// - Per garment: compose, then enhance
// - Progress is emitted on every stage transition
// - Fail-fast: the first failure aborts the run and discards completed items

use log::{error, info};
use std::sync::Arc;

use super::generation_service::GenerationService;
use crate::domain::{BackgroundDirective, Image, TryOnResult, TryOnStage};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, TryOnItemCompleted, TryOnRunCompleted, TryOnRunFailed, TryOnStageStarted,
};

pub struct TryOnService {
    generation: Arc<GenerationService>,
    event_bus: Arc<EventBus>,
}

impl TryOnService {
    pub fn new(generation: Arc<GenerationService>, event_bus: Arc<EventBus>) -> Self {
        Self {
            generation,
            event_bus,
        }
    }

    /// Render `person` wearing each garment in `garments`.
    ///
    /// Returns one result per garment, in input order, or the first error.
    pub async fn run(
        &self,
        person: Option<&Image>,
        garments: &[Image],
        background: &BackgroundDirective,
    ) -> AppResult<Vec<TryOnResult>> {
        let person = match person {
            Some(person) if !garments.is_empty() => person,
            _ => {
                return Err(AppError::InvalidRequest(
                    "Please upload a full-body photo and select at least one item.".to_string(),
                ))
            }
        };

        let total = garments.len();
        info!(
            "Starting try-on for {} garment(s), background: {}",
            total,
            if background.preserves_original() {
                "original"
            } else {
                background.as_str()
            }
        );

        let mut results = Vec::with_capacity(total);

        for (index, garment) in garments.iter().enumerate() {
            let composed = self
                .stage(index, total, TryOnStage::Compose, async {
                    self.generation.compose(person, garment, background).await
                })
                .await?;

            let enhanced = self
                .stage(index, total, TryOnStage::Enhance, async {
                    self.generation.enhance(&composed).await
                })
                .await?;

            self.event_bus
                .emit(TryOnItemCompleted::new(index, total, garment.short_digest()));
            results.push(TryOnResult::new(garment.clone(), enhanced));
        }

        info!("Try-on finished with {} result(s)", results.len());
        self.event_bus.emit(TryOnRunCompleted::new(results.len()));
        Ok(results)
    }

    /// Announce a stage, await it, and report a failure before propagating it
    async fn stage<F>(
        &self,
        index: usize,
        total: usize,
        stage: TryOnStage,
        call: F,
    ) -> AppResult<Image>
    where
        F: std::future::Future<Output = AppResult<Image>>,
    {
        let started = TryOnStageStarted::new(index, total, stage);
        info!("{}", started.label);
        self.event_bus.emit(started);

        call.await.map_err(|err| {
            error!("Try-on {} failed for item {}: {}", stage, index + 1, err);
            self.event_bus
                .emit(TryOnRunFailed::new(index, stage, err.kind(), err.to_string()));
            err
        })
    }
}
