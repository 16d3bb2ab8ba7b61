// src/integrations/mod.rs
//
// External Integrations Module
//
// The generative image service is consumed through the `GenerationBackend`
// seam; `GeminiClient` is the HTTP implementation.

pub mod gemini;

pub use gemini::{
    GeminiClient, GenerationBackend, GenerationCandidate, GenerationConfig, GenerationRequest,
    GenerationResponse, ModelKind, RequestPart, ResponseModality, ResponseSegment,
};
