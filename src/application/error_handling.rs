// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Provides consistent error format for UI
// - Internal failures are logged, not exposed

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Bad input from the user, e.g. an unsupported file
    Validation,

    /// A required input is missing for the requested action
    InvalidRequest,

    /// The generation service refused on safety grounds
    GenerationBlocked,

    /// The generation service failed or answered without the expected content
    ExternalService,

    /// The service is not configured (e.g. no API key)
    Configuration,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        let error_type = match error.kind() {
            ErrorKind::ValidationError => ErrorType::Validation,
            ErrorKind::InvalidRequest => ErrorType::InvalidRequest,
            ErrorKind::GenerationBlocked => ErrorType::GenerationBlocked,
            ErrorKind::NoImageReturned | ErrorKind::NoTextReturned | ErrorKind::TransportError => {
                ErrorType::ExternalService
            }
            ErrorKind::Configuration => ErrorType::Configuration,
            ErrorKind::Internal => ErrorType::Internal,
        };

        match error {
            AppError::GenerationBlocked { ref categories, .. } => Self {
                success: false,
                error_type,
                message: error.to_string(),
                details: (!categories.is_empty()).then(|| categories.join(", ")),
            },

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type,
                message: domain_error.to_string(),
                details: None,
            },

            AppError::Serialization(_) | AppError::Io(_) => {
                error!("Internal error: {:?}", error);

                Self {
                    success: false,
                    error_type,
                    message: "Internal error".to_string(),
                    details: Some(error.to_string()),
                }
            }

            other => Self {
                success: false,
                error_type,
                message: other.to_string(),
                details: None,
            },
        }
    }

    /// Create validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message: message.into(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_blocked_error_keeps_message_and_categories() {
        let error = ErrorResponse::from_app_error(AppError::GenerationBlocked {
            reason: "SAFETY".to_string(),
            categories: vec!["violence".to_string()],
        });
        assert_eq!(error.error_type, ErrorType::GenerationBlocked);
        assert!(error.message.contains("Reason: SAFETY"));
        assert_eq!(error.details.as_deref(), Some("violence"));
        assert!(!error.success);
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Invalid input");
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn test_domain_error_is_validation() {
        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::UnsupportedMediaType("image/gif".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert!(error.message.contains("image/gif"));
    }

    #[test]
    fn test_service_failures_are_external() {
        for err in [
            AppError::NoImageReturned,
            AppError::NoTextReturned,
            AppError::Transport("connection reset".to_string()),
        ] {
            let response = ErrorResponse::from(err);
            assert_eq!(response.error_type, ErrorType::ExternalService);
        }
    }

    #[test]
    fn test_io_error_hides_message() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error = ErrorResponse::from_app_error(AppError::Io(io));
        assert_eq!(error.error_type, ErrorType::Internal);
        assert_eq!(error.message, "Internal error");
    }

    #[test]
    fn test_result_conversion() {
        let result: Result<(), AppError> = Err(AppError::InvalidRequest("missing".to_string()));
        let converted = result.to_error_response().unwrap_err();
        assert_eq!(converted.error_type, ErrorType::InvalidRequest);

        let ok: Result<u8, AppError> = Ok(3);
        assert_eq!(ok.to_error_response().unwrap(), 3);
    }

    #[test]
    fn test_serializes_snake_case_type() {
        let json = serde_json::to_value(ErrorResponse::validation("bad")).unwrap();
        assert_eq!(json["error_type"], "validation");
        assert_eq!(json["success"], false);
    }
}
