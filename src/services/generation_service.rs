// src/services/generation_service.rs
//
// Generation Service - typed adapter over the external generation capability
//
// CRITICAL RULES:
// - Every operation issues exactly ONE backend call
// - Inputs are validated before the call
// - All responses go through `interpret_response`
// - No retries

use log::{debug, warn};
use std::sync::Arc;

use super::prompts;
use crate::domain::{validate_image, BackgroundDirective, ColorDirective, Image};
use crate::error::{AppError, AppResult};
use crate::integrations::{
    GenerationBackend, GenerationRequest, GenerationResponse, RequestPart, ResponseSegment,
};

/// What a caller expects to pull out of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    Image,
    Text,
}

/// Content extracted from a successful response
#[derive(Debug)]
enum Extracted {
    Image(Image),
    Text(String),
}

pub struct GenerationService {
    backend: Arc<dyn GenerationBackend>,
    allowed_finish_reasons: Vec<String>,
}

impl GenerationService {
    /// Normal stops are STOP and MAX_TOKENS
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self::with_allowed_finish_reasons(
            backend,
            vec!["STOP".to_string(), "MAX_TOKENS".to_string()],
        )
    }

    pub fn with_allowed_finish_reasons(
        backend: Arc<dyn GenerationBackend>,
        allowed_finish_reasons: Vec<String>,
    ) -> Self {
        Self {
            backend,
            allowed_finish_reasons,
        }
    }

    /// Dress `person` in `garment`, optionally replacing the background
    pub async fn compose(
        &self,
        person: &Image,
        garment: &Image,
        background: &BackgroundDirective,
    ) -> AppResult<Image> {
        validate_image(person)?;
        validate_image(garment)?;

        let request = GenerationRequest::image(vec![
            RequestPart::Text(prompts::TRY_ON_PREAMBLE.to_string()),
            RequestPart::Text(prompts::PERSON_PHOTO_LABEL.to_string()),
            RequestPart::Image(person.clone()),
            RequestPart::Text(prompts::ITEM_PHOTO_LABEL.to_string()),
            RequestPart::Image(garment.clone()),
            RequestPart::Text(prompts::try_on_instructions(background.as_str())),
        ]);

        debug!(
            "compose: person={} garment={} background={:?}",
            person.short_digest(),
            garment.short_digest(),
            background.as_str()
        );
        self.call_for_image(request).await
    }

    /// Quality pass over a generated image
    pub async fn enhance(&self, image: &Image) -> AppResult<Image> {
        validate_image(image)?;

        let request = GenerationRequest::image(vec![
            RequestPart::Text(prompts::ENHANCE_INSTRUCTIONS.to_string()),
            RequestPart::Image(image.clone()),
        ]);

        debug!("enhance: image={}", image.short_digest());
        self.call_for_image(request).await
    }

    /// Render `garment` in another colour
    pub async fn recolor(&self, garment: &Image, color: &ColorDirective) -> AppResult<Image> {
        validate_image(garment)?;

        let request = GenerationRequest::image(vec![
            RequestPart::Text(prompts::recolor_instructions(color.as_str())),
            RequestPart::Text(prompts::BASE_ITEM_LABEL.to_string()),
            RequestPart::Image(garment.clone()),
        ]);

        debug!("recolor: garment={} color={}", garment.short_digest(), color);
        self.call_for_image(request).await
    }

    /// Expand a short background idea into descriptive text
    pub async fn expand_background_idea(&self, idea: &str) -> AppResult<String> {
        if idea.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter a background idea first.".to_string(),
            ));
        }

        let request = GenerationRequest::text(prompts::expand_background_instructions(idea));
        let response = self.backend.generate(request).await?;

        match self.interpret_response(response, Expected::Text)? {
            Extracted::Text(text) => Ok(text),
            Extracted::Image(_) => Err(AppError::NoTextReturned),
        }
    }

    async fn call_for_image(&self, request: GenerationRequest) -> AppResult<Image> {
        let response = self.backend.generate(request).await?;

        match self.interpret_response(response, Expected::Image)? {
            Extracted::Image(image) => Ok(image),
            Extracted::Text(_) => Err(AppError::NoImageReturned),
        }
    }

    // ========================================================================
    // RESPONSE INTERPRETATION
    // ========================================================================

    /// Shared by all operations:
    /// 1. prompt-level block → GenerationBlocked
    /// 2. no candidate → NoImageReturned / NoTextReturned
    /// 3. non-allowed or missing finish reason → GenerationBlocked
    /// 4. first image segment (image) or joined text segments (text)
    fn interpret_response(
        &self,
        response: GenerationResponse,
        expected: Expected,
    ) -> AppResult<Extracted> {
        let missing = || match expected {
            Expected::Image => AppError::NoImageReturned,
            Expected::Text => AppError::NoTextReturned,
        };

        if let Some(reason) = response.prompt_block_reason {
            warn!("Prompt blocked by the generation service: {}", reason);
            return Err(AppError::GenerationBlocked {
                reason,
                categories: response.prompt_categories,
            });
        }

        let candidate = response.candidates.into_iter().next().ok_or_else(missing)?;

        let finish_reason = candidate
            .finish_reason
            .unwrap_or_else(|| "UNKNOWN".to_string());

        if !self
            .allowed_finish_reasons
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&finish_reason))
        {
            warn!(
                "Generation stopped with {} (categories: {:?})",
                finish_reason, candidate.categories
            );
            return Err(AppError::GenerationBlocked {
                reason: finish_reason,
                categories: candidate.categories,
            });
        }

        match expected {
            Expected::Image => candidate
                .segments
                .into_iter()
                .find_map(|segment| match segment {
                    ResponseSegment::Image(image) => Some(Extracted::Image(image)),
                    ResponseSegment::Text(_) => None,
                })
                .ok_or_else(missing),
            Expected::Text => {
                let text = candidate
                    .segments
                    .iter()
                    .filter_map(|segment| match segment {
                        ResponseSegment::Text(text) => Some(text.as_str()),
                        ResponseSegment::Image(_) => None,
                    })
                    .collect::<String>();
                let text = text.trim();
                if text.is_empty() {
                    Err(missing())
                } else {
                    Ok(Extracted::Text(text.to_string()))
                }
            }
        }
    }
}
