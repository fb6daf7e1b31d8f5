use thiserror::Error;

use crate::session::{View, ViewEvent};

/// The single message shown to the user when routine generation fails for any upstream reason.
pub const GENERATION_FAILED_MESSAGE: &str =
    "The coach is having a smoke break (API Error). Please try again or check your API key.";

/// Application-level error type.
/// `user_message()` decides what the presentation layer is allowed to see.
#[derive(Debug, Error)]
pub enum AppError {
    /// No credential is configured. Fatal until the environment is fixed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The service answered but returned no usable text.
    #[error("Generation error: {0}")]
    Generation(String),

    /// The service returned text that does not match the routine schema.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Transport failure or non-success status from the service.
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {event} is not allowed from {from}")]
    InvalidTransition { from: View, event: ViewEvent },
}

impl AppError {
    /// Collapses the error into text fit for display.
    ///
    /// Upstream failures all map to `GENERATION_FAILED_MESSAGE`. The caller logs the detail.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Configuration(_)
            | AppError::Generation(_)
            | AppError::Parse(_)
            | AppError::Llm(_)
            | AppError::InvalidTransition { .. } => GENERATION_FAILED_MESSAGE.to_string(),
        }
    }

    /// Whether retrying with the same configuration can succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AppError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_collapse_to_fixed_message() {
        let errors = vec![
            AppError::Configuration("API key is missing".to_string()),
            AppError::Generation("no text".to_string()),
            AppError::Parse("bits: expected array".to_string()),
            AppError::Llm("HTTP error: connection refused".to_string()),
        ];
        for err in errors {
            assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_user_message_does_not_leak_detail() {
        let err = AppError::Parse("line 1 column 7: trailing garbage".to_string());
        assert!(!err.user_message().contains("trailing garbage"));
        assert!(err.to_string().contains("trailing garbage"));
    }

    #[test]
    fn test_validation_message_is_surfaced() {
        let err = AppError::Validation("Missing required fields: name".to_string());
        assert_eq!(err.user_message(), "Missing required fields: name");
    }

    #[test]
    fn test_configuration_is_not_retryable() {
        assert!(!AppError::Configuration("x".to_string()).is_retryable());
        assert!(AppError::Generation("x".to_string()).is_retryable());
        assert!(AppError::Parse("x".to_string()).is_retryable());
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = AppError::InvalidTransition {
            from: View::Loading,
            event: ViewEvent::Reset,
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition: reset is not allowed from loading"
        );
    }
}
