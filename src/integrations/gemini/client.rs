// src/integrations/gemini/client.rs
//
// Gemini generateContent API Integration
//
// ARCHITECTURE:
// - REST client for the Generative Language API
// - Maps provider-neutral requests → wire JSON and wire JSON → neutral responses
// - Does NOT interpret finish reasons; that is GenerationService's job
// - Single attempt per call, no retries
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Image bytes are passed through untouched (base64 only on the wire)

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::{debug, warn};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::backend::{
    GenerationBackend, GenerationCandidate, GenerationRequest, GenerationResponse, ModelKind,
    RequestPart, ResponseModality, ResponseSegment,
};
use super::config::GenerationConfig;
use crate::domain::Image;
use crate::error::{AppError, AppResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireInlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    #[serde(default)]
    prompt_feedback: Option<WirePromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireContent>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<WireSafetyRating>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<WireSafetyRating>,
}

#[derive(Debug, Deserialize)]
struct WireSafetyRating {
    category: String,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct WireErrorEnvelope {
    error: WireError,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Gemini API Client
pub struct GeminiClient {
    config: GenerationConfig,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: GenerationConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "Gemini API key is empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn model_name(&self, model: ModelKind) -> &str {
        match model {
            ModelKind::Image => &self.config.image_model,
            ModelKind::Text => &self.config.text_model,
        }
    }

    fn endpoint(&self, model: ModelKind) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.model_name(model)
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> AppResult<GenerationResponse> {
        let url = self.endpoint(request.model);
        let body = to_wire_request(&request);
        let started = Instant::now();

        debug!(
            "POST {} ({} parts, {} images)",
            url,
            request.parts.len(),
            request.images().len()
        );

        let response = self
            .http_client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        debug!(
            "{} answered {} in {} ms",
            self.model_name(request.model),
            status,
            started.elapsed().as_millis()
        );

        if !status.is_success() {
            let detail = serde_json::from_str::<WireErrorEnvelope>(&text)
                .map(|envelope| match envelope.error.status {
                    Some(code) => format!("{} ({})", envelope.error.message, code),
                    None => envelope.error.message,
                })
                .unwrap_or_else(|_| text.chars().take(200).collect());
            warn!("Generation API returned status {}: {}", status, detail);
            return Err(AppError::Transport(format!(
                "Generation API returned status {}: {}",
                status, detail
            )));
        }

        let wire: WireResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::Transport(format!("Failed to parse generation response: {}", e))
        })?;

        from_wire_response(wire)
    }
}

// ============================================================================
// INTERNAL: Mapping
// ============================================================================

fn to_wire_request(request: &GenerationRequest) -> WireRequest {
    let parts = request
        .parts
        .iter()
        .map(|part| match part {
            RequestPart::Text(text) => WirePart {
                text: Some(text.clone()),
                inline_data: None,
            },
            RequestPart::Image(image) => WirePart {
                text: None,
                inline_data: Some(WireInlineData {
                    mime_type: image.media_type().to_string(),
                    data: image.to_base64(),
                }),
            },
        })
        .collect();

    let generation_config = if request.response_modalities.is_empty() {
        None
    } else {
        Some(WireGenerationConfig {
            response_modalities: request
                .response_modalities
                .iter()
                .map(|m| match m {
                    ResponseModality::Image => "IMAGE",
                    ResponseModality::Text => "TEXT",
                })
                .collect(),
        })
    };

    WireRequest {
        contents: vec![WireContent {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config,
    }
}

fn from_wire_response(wire: WireResponse) -> AppResult<GenerationResponse> {
    let (prompt_block_reason, prompt_categories) = match wire.prompt_feedback {
        Some(feedback) => (
            feedback.block_reason,
            feedback
                .safety_ratings
                .into_iter()
                .map(|r| r.category)
                .collect(),
        ),
        None => (None, Vec::new()),
    };

    let candidates = wire
        .candidates
        .into_iter()
        .map(|candidate| -> AppResult<GenerationCandidate> {
            let segments = candidate
                .content
                .unwrap_or_default()
                .parts
                .into_iter()
                .map(part_to_segment)
                .collect::<AppResult<Vec<_>>>()?
                .into_iter()
                .flatten()
                .collect();

            Ok(GenerationCandidate {
                finish_reason: candidate.finish_reason,
                categories: candidate
                    .safety_ratings
                    .into_iter()
                    .map(|r| r.category)
                    .collect(),
                segments,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(GenerationResponse {
        prompt_block_reason,
        prompt_categories,
        candidates,
    })
}

/// Image parts win over text when both are set; empty parts are dropped
fn part_to_segment(part: WirePart) -> AppResult<Option<ResponseSegment>> {
    if let Some(inline) = part.inline_data {
        let data = BASE64.decode(inline.data.as_bytes())?;
        return Ok(Some(ResponseSegment::Image(Image::new(inline.mime_type, data))));
    }
    Ok(part.text.map(ResponseSegment::Text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_requires_api_key() {
        assert!(matches!(
            GeminiClient::new(GenerationConfig::default()),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_endpoint_per_model() {
        let mut config = GenerationConfig::with_api_key("k");
        config.base_url = "http://localhost:9000/v1beta/".to_string();
        let client = GeminiClient::new(config).unwrap();

        assert_eq!(
            client.endpoint(ModelKind::Image),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash-image-preview:generateContent"
        );
        assert_eq!(
            client.endpoint(ModelKind::Text),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerationRequest::image(vec![
            RequestPart::Text("This is the `item_photo`:".to_string()),
            RequestPart::Image(Image::new("image/png", vec![1u8, 2, 3])),
        ]);

        let value = serde_json::to_value(to_wire_request(&request)).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "This is the `item_photo`:" },
                        { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
                    ]
                }],
                "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] }
            })
        );
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let value = serde_json::to_value(to_wire_request(&GenerationRequest::text("a beach")))
            .unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_mapping() {
        let wire: WireResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "AQID" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "BAUG" } }
                    ]
                },
                "finishReason": "STOP",
                "safetyRatings": [{ "category": "HARM_CATEGORY_HARASSMENT", "probability": "NEGLIGIBLE" }]
            }]
        }))
        .unwrap();

        let response = from_wire_response(wire).unwrap();
        let candidate = &response.candidates[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(candidate.categories, vec!["HARM_CATEGORY_HARASSMENT"]);
        assert_eq!(candidate.segments.len(), 3);
        assert_eq!(
            candidate.segments[1],
            ResponseSegment::Image(Image::new("image/png", vec![1u8, 2, 3]))
        );
    }

    #[test]
    fn test_prompt_feedback_mapping() {
        let wire: WireResponse = serde_json::from_value(json!({
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [{ "category": "violence", "probability": "HIGH" }]
            }
        }))
        .unwrap();

        let response = from_wire_response(wire).unwrap();
        assert!(response.candidates.is_empty());
        assert_eq!(response.prompt_block_reason.as_deref(), Some("SAFETY"));
        assert_eq!(response.prompt_categories, vec!["violence"]);
    }

    #[test]
    fn test_candidate_without_content() {
        let wire: WireResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();

        let response = from_wire_response(wire).unwrap();
        assert!(response.candidates[0].segments.is_empty());
    }

    #[test]
    fn test_bad_base64_is_transport_error() {
        let wire: WireResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "@@" } }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert!(matches!(
            from_wire_response(wire),
            Err(AppError::Transport(_))
        ));
    }
}
