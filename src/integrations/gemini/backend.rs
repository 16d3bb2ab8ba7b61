// src/integrations/gemini/backend.rs
//
// Provider-neutral view of the generation capability.
//
// Services talk to `GenerationBackend` only. The HTTP client maps these types
// to and from the wire format; tests substitute a mock.

use async_trait::async_trait;

use crate::domain::Image;
use crate::error::AppResult;

/// Which model family a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Multimodal model able to return images
    Image,
    /// Text-only model
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseModality {
    Image,
    Text,
}

/// One ordered input segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    Text(String),
    Image(Image),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: ModelKind,
    pub parts: Vec<RequestPart>,
    /// Empty means "provider default"
    pub response_modalities: Vec<ResponseModality>,
}

/// One ordered output segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSegment {
    Text(String),
    Image(Image),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationCandidate {
    /// Termination signal, e.g. "STOP", "MAX_TOKENS", "SAFETY"
    pub finish_reason: Option<String>,
    /// Safety category labels reported for this candidate
    pub categories: Vec<String>,
    pub segments: Vec<ResponseSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Set when the prompt itself was rejected and no candidate was produced
    pub prompt_block_reason: Option<String>,
    pub prompt_categories: Vec<String>,
    pub candidates: Vec<GenerationCandidate>,
}

/// The external image-generation capability: given inputs, produce output or fail
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Issue exactly one call. Transport failures surface as `AppError::Transport`.
    async fn generate(&self, request: GenerationRequest) -> AppResult<GenerationResponse>;
}

impl GenerationRequest {
    /// Image-producing request (response modalities IMAGE + TEXT)
    pub fn image(parts: Vec<RequestPart>) -> Self {
        Self {
            model: ModelKind::Image,
            parts,
            response_modalities: vec![ResponseModality::Image, ResponseModality::Text],
        }
    }

    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            model: ModelKind::Text,
            parts: vec![RequestPart::Text(prompt.into())],
            response_modalities: Vec::new(),
        }
    }

    /// Images attached to the request, in order
    pub fn images(&self) -> Vec<&Image> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                RequestPart::Image(image) => Some(image),
                RequestPart::Text(_) => None,
            })
            .collect()
    }

    /// All text parts joined with newlines
    pub fn instruction_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                RequestPart::Text(text) => Some(text.as_str()),
                RequestPart::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl GenerationResponse {
    /// A normal single-candidate response carrying `segments`
    pub fn completed(segments: Vec<ResponseSegment>) -> Self {
        Self {
            prompt_block_reason: None,
            prompt_categories: Vec::new(),
            candidates: vec![GenerationCandidate {
                finish_reason: Some("STOP".to_string()),
                categories: Vec::new(),
                segments,
            }],
        }
    }

    /// A single candidate that stopped for `reason`
    pub fn stopped(reason: &str, categories: &[&str]) -> Self {
        Self {
            prompt_block_reason: None,
            prompt_categories: Vec::new(),
            candidates: vec![GenerationCandidate {
                finish_reason: Some(reason.to_string()),
                categories: categories.iter().map(|c| c.to_string()).collect(),
                segments: Vec::new(),
            }],
        }
    }
}
