// src/error/types.rs
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad input shape or format, caught before any external call
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The generation service stopped for a non-normal reason (safety, policy...)
    #[error(
        "Image generation was blocked. Reason: {reason}. Blocked categories: {}. Please try with different images.",
        format_categories(.categories)
    )]
    GenerationBlocked {
        reason: String,
        categories: Vec<String>,
    },

    #[error("Image generation failed. No image data was returned by the model.")]
    NoImageReturned,

    #[error("Text generation failed. No text was returned by the model.")]
    NoTextReturned,

    /// Network or service-level failure
    #[error("Generation service error: {0}")]
    Transport(String),

    /// Pipeline preconditions not met
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Machine-distinguishable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationError,
    GenerationBlocked,
    NoImageReturned,
    NoTextReturned,
    TransportError,
    InvalidRequest,
    Configuration,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::Domain(_) => ErrorKind::ValidationError,
            AppError::GenerationBlocked { .. } => ErrorKind::GenerationBlocked,
            AppError::NoImageReturned => ErrorKind::NoImageReturned,
            AppError::NoTextReturned => ErrorKind::NoTextReturned,
            AppError::Transport(_) => ErrorKind::TransportError,
            AppError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            AppError::Configuration(_) => ErrorKind::Configuration,
            AppError::Serialization(_) | AppError::Io(_) => ErrorKind::Internal,
        }
    }
}

fn format_categories(categories: &[String]) -> String {
    if categories.is_empty() {
        "none".to_string()
    } else {
        categories.join(", ")
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Transport(format!("Request timed out: {}", err))
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::Transport(format!("Malformed image payload: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
