// src/integrations/gemini/mod.rs

pub mod backend;
pub mod client;
pub mod config;

pub use backend::{
    GenerationBackend, GenerationCandidate, GenerationRequest, GenerationResponse, ModelKind,
    RequestPart, ResponseModality, ResponseSegment,
};
pub use client::GeminiClient;
pub use config::GenerationConfig;

#[cfg(test)]
pub use backend::MockGenerationBackend;
