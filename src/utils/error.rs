use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid request input for {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Authentication failed with status {status}: {message}")]
    AuthenticationError { status: u16, message: String },

    #[error("Response with status {status} is not valid JSON: {body}")]
    InvalidResponse { status: u16, body: String },

    #[error("API error {status}: {message}")]
    ApiError {
        status: u16,
        message: String,
        body: serde_json::Value,
    },
}

/// 錯誤分類，CLI 用來決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Authentication,
    Vendor,
}

impl SdkError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SdkError::MissingConfigError { .. }
            | SdkError::InvalidConfigValueError { .. }
            | SdkError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SdkError::ValidationError { .. }
            | SdkError::IoError(_)
            | SdkError::SerializationError(_) => ErrorCategory::Input,
            SdkError::HttpError(_) => ErrorCategory::Network,
            SdkError::AuthenticationError { .. } => ErrorCategory::Authentication,
            SdkError::InvalidResponse { .. } | SdkError::ApiError { .. } => ErrorCategory::Vendor,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check AMADEUS_API_URL, AMADEUS_CLIENT_ID and AMADEUS_CLIENT_SECRET (or the config file)"
            }
            ErrorCategory::Input => "Check the command arguments and the JSON input files",
            ErrorCategory::Network => "Check network connectivity and the API base URL",
            ErrorCategory::Authentication => "Verify the client credentials for the selected environment",
            ErrorCategory::Vendor => "Inspect the vendor error details in the response body",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SdkError::AuthenticationError { status, .. } => {
                format!("Could not obtain an access token (HTTP {})", status)
            }
            SdkError::ApiError { status, message, .. } => {
                format!("The booking API rejected the request (HTTP {}): {}", status, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;
