// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod color_variation_service;
pub mod generation_service;
pub mod identity_sync_store;
pub mod prompts;
pub mod tryon_service;

#[cfg(test)]
mod identity_sync_store_tests;

pub use color_variation_service::ColorVariationService;
pub use generation_service::GenerationService;
pub use identity_sync_store::IdentitySyncStore;
pub use tryon_service::TryOnService;
