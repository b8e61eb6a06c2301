use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Malformed request body: {message}")]
    InvalidRequestError { message: String },

    #[error("Invalid IP address format: {ip}")]
    InvalidIpError { ip: String },

    #[error("Phone number format error: {message}")]
    PhoneFormatError { message: String },

    #[error("Invalid phone number: {number}")]
    InvalidPhoneError { number: String },

    #[error("Rate limit exceeded at {provider}")]
    RateLimitError { provider: String },

    #[error("Could not retrieve IP information from any provider")]
    AllProvidersFailedError { primary: String, secondary: String },
}

impl LookupError {
    /// HTTP status used when this error reaches the front end.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::MissingFieldError { .. }
            | LookupError::InvalidRequestError { .. }
            | LookupError::InvalidIpError { .. }
            | LookupError::PhoneFormatError { .. }
            | LookupError::InvalidPhoneError { .. } => StatusCode::BAD_REQUEST,
            LookupError::RateLimitError { .. } => StatusCode::TOO_MANY_REQUESTS,
            LookupError::AllProvidersFailedError { .. } | LookupError::HttpError(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON error payload: always carries `error`, plus details for some variants.
    pub fn to_payload(&self) -> Value {
        match self {
            LookupError::RateLimitError { provider } => json!({
                "error": self.to_string(),
                "provider": provider,
                "rate_limited": true,
            }),
            LookupError::AllProvidersFailedError { primary, secondary } => json!({
                "error": self.to_string(),
                "details": {
                    "primary": primary,
                    "secondary": secondary,
                },
            }),
            LookupError::InvalidIpError { ip } => json!({
                "error": self.to_string(),
                "ip": ip,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
