// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Commands convert errors to ErrorResponse
// - Commands NEVER contain business logic

pub mod garment_commands;
pub mod tryon_commands;

pub use garment_commands::*;
pub use tryon_commands::*;
