use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Backend responded with {status}: {detail}")]
    HttpError { status: StatusCode, detail: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Places request failed due to {status}")]
    PlacesError { status: String },

    #[error("Directions request failed due to {status}")]
    DirectionsError { status: String },

    #[error("Invalid identity credential: {message}")]
    CredentialError { message: String },

    #[error("Sign-in rejected: {message}")]
    AuthRejected { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Maps,
    Configuration,
    Input,
    Authentication,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::ApiError(_) => ErrorCategory::Network,
            ClientError::HttpError { .. } => ErrorCategory::Backend,
            ClientError::PlacesError { .. } | ClientError::DirectionsError { .. } => {
                ErrorCategory::Maps
            }
            ClientError::ConfigError { .. }
            | ClientError::ConfigValidationError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ClientError::ValidationError { .. } | ClientError::CredentialError { .. } => {
                ErrorCategory::Input
            }
            ClientError::AuthRejected { .. } => ErrorCategory::Authentication,
            ClientError::IoError(_) | ClientError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 查無路線或地點不影響其他流程
            ClientError::PlacesError { .. } | ClientError::DirectionsError { .. } => {
                ErrorSeverity::Low
            }
            ClientError::ApiError(_)
            | ClientError::HttpError { .. }
            | ClientError::AuthRejected { .. } => ErrorSeverity::Medium,
            ClientError::ValidationError { .. }
            | ClientError::CredentialError { .. }
            | ClientError::ConfigError { .. }
            | ClientError::ConfigValidationError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::MissingConfigError { .. } => ErrorSeverity::High,
            ClientError::IoError(_) | ClientError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend is running and reachable",
            ErrorCategory::Backend => "Check the request data or sign in again",
            ErrorCategory::Maps => "Check the maps API key and the requested location",
            ErrorCategory::Configuration => "Check the config file and command line flags",
            ErrorCategory::Input => "Check the values you entered and try again",
            ErrorCategory::Authentication => "Check your username and password and sign in again",
            ErrorCategory::System => "Check file permissions and the local storage file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::ApiError(_) => "An error occurred. Please try again later.".to_string(),
            ClientError::HttpError { detail, .. } => detail.clone(),
            ClientError::ValidationError { message } | ClientError::AuthRejected { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_drives_exit_codes() {
        let maps = ClientError::DirectionsError {
            status: "ZERO_RESULTS".to_string(),
        };
        let backend = ClientError::HttpError {
            status: StatusCode::NOT_FOUND,
            detail: "Invalid event id".to_string(),
        };
        let config = ClientError::MissingConfigError {
            field: "maps.api_key".to_string(),
        };

        assert_eq!(maps.severity(), ErrorSeverity::Low);
        assert_eq!(backend.severity(), ErrorSeverity::Medium);
        assert_eq!(config.severity(), ErrorSeverity::High);
        assert!(maps.severity() < config.severity());
    }

    #[test]
    fn test_user_friendly_message_uses_backend_detail() {
        let err = ClientError::HttpError {
            status: StatusCode::UNAUTHORIZED,
            detail: "Could not validate user.".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Could not validate user.");
        assert_eq!(err.category(), ErrorCategory::Backend);
    }

    #[test]
    fn test_rejected_sign_in_is_not_a_success() {
        let err = ClientError::AuthRejected {
            message: "Could not validate user.".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert!(err.severity() > ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Could not validate user.");
    }
}
