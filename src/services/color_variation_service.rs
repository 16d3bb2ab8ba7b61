// src/services/color_variation_service.rs
//
// Color Variation Service
//
// - generate_palette: five independent recolor calls run concurrently,
//   results returned in fixed palette order, all-or-nothing
// - generate_one: a single free-text recolor

use futures_util::future::join_all;
use log::{info, warn};
use std::sync::Arc;

use super::generation_service::GenerationService;
use crate::domain::{ColorDirective, Image};
use crate::error::AppResult;

pub struct ColorVariationService {
    generation: Arc<GenerationService>,
}

impl ColorVariationService {
    pub fn new(generation: Arc<GenerationService>) -> Self {
        Self { generation }
    }

    /// Recolor `garment` in every palette colour.
    ///
    /// Waits for all calls to settle; the first failure in palette order is
    /// reported and no partial palette is returned.
    pub async fn generate_palette(&self, garment: &Image) -> AppResult<Vec<Image>> {
        let directives = ColorDirective::palette();

        let calls = directives
            .iter()
            .map(|color| self.generation.recolor(garment, color));
        let settled = join_all(calls).await;

        let failures = settled.iter().filter(|r| r.is_err()).count();
        if failures > 0 {
            warn!(
                "Palette for {} failed: {} of {} recolor calls errored",
                garment.short_digest(),
                failures,
                settled.len()
            );
        }

        let palette = settled.into_iter().collect::<AppResult<Vec<_>>>()?;

        info!(
            "Generated {} color variations for {}",
            palette.len(),
            garment.short_digest()
        );
        Ok(palette)
    }

    /// Recolor with a free-text directive; blank text is rejected before any call
    pub async fn generate_one(&self, garment: &Image, color: &str) -> AppResult<Image> {
        let directive = ColorDirective::new(color)?;
        self.generation.recolor(garment, &directive).await
    }
}
