//! Error types for SCIM client operations.
//!
//! Two families of errors exist. [`ConfigurationError`] is fatal and is returned
//! while resolving credentials or building a [`ScimClient`](crate::ScimClient).
//! [`ScimFailure`] is the outcome of a failed operation and always has one of
//! three shapes:
//!
//! - `{status, error}` when the service answered with a non-2xx status
//! - `{reason}` when the request never produced a response
//! - `{error}` when the request was rejected locally or the response body
//!   could not be decoded
//!
//! Callers can tell the shapes apart with [`ScimFailure::status`],
//! [`ScimFailure::reason`] and [`ScimFailure::error`], or by matching.

use serde::Serialize;
use std::path::PathBuf;

/// Message used when a 2xx response carries a body that is not JSON.
pub const INVALID_RESPONSE_BODY: &str = "invalid response body";

/// Failure outcome of a SCIM client operation.
///
/// Serializes untagged so that diagnostics keep the field layout of the
/// three failure shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(untagged)]
pub enum ScimFailure {
    /// The service answered with a non-2xx status
    #[error("HTTP {status}: {error}")]
    Http { status: u16, error: String },

    /// DNS, TLS, connection or timeout failure
    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    /// Rejected before sending, or a 2xx response that could not be decoded
    #[error("{error}")]
    Local { error: String },
}

impl ScimFailure {
    /// Create an HTTP-level failure
    pub fn http(status: u16, error: impl Into<String>) -> Self {
        Self::Http {
            status,
            error: error.into(),
        }
    }

    /// Create a transport failure
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Create a local failure
    pub fn local(error: impl Into<String>) -> Self {
        Self::Local {
            error: error.into(),
        }
    }

    /// Failure for a 2xx response whose body is not valid JSON.
    pub fn invalid_response_body() -> Self {
        Self::local(INVALID_RESPONSE_BODY)
    }

    /// HTTP status code, present only for HTTP-level failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport failure description.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Transport { reason } => Some(reason),
            _ => None,
        }
    }

    /// Error message, present for HTTP-level and local failures.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Http { error, .. } | Self::Local { error } => Some(error),
            Self::Transport { .. } => None,
        }
    }

    /// True when no request reached the network.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }
}

impl From<ValidationError> for ScimFailure {
    fn from(error: ValidationError) -> Self {
        Self::local(error.to_string())
    }
}

/// Local precondition failures detected before a request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required attribute is missing or empty
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// Resource id is empty
    #[error("{resource_type} id cannot be empty")]
    EmptyId { resource_type: String },

    /// Filter attribute is empty or not a plain attribute path
    #[error("Invalid filter attribute '{attribute}'")]
    InvalidFilterAttribute { attribute: String },

    /// Update payload is not a JSON object
    #[error("{operation} data must be a JSON object")]
    ExpectedObject { operation: String },

    /// Membership change without any members
    #[error("At least one member is required")]
    EmptyMembers,

    /// General validation error with custom message
    #[error("Validation failed: {message}")]
    Custom { message: String },
}

impl ValidationError {
    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create an empty id error
    pub fn empty_id(resource_type: impl Into<String>) -> Self {
        Self::EmptyId {
            resource_type: resource_type.into(),
        }
    }

    /// Create a custom validation error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

/// Fatal errors raised while resolving configuration or building a client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// No base URL from arguments, environment or `.env` file
    #[error(
        "SCIM URL must be provided either as parameter or via CATO_SCIM_URL environment variable"
    )]
    MissingBaseUrl,

    /// No token from arguments, environment or `.env` file
    #[error(
        "SCIM token must be provided either as parameter or via CATO_SCIM_TOKEN environment variable"
    )]
    MissingToken,

    /// Base URL could not be used as a SCIM endpoint prefix
    #[error("Invalid SCIM URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// `.env` file exists but could not be read or parsed
    #[error("Failed to read environment file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// HTTP transport could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConfigurationError {
    /// Create an invalid base URL error
    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

// Result type aliases for convenience
pub type ScimResult<T> = Result<T, ScimFailure>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type ConfigResult<T> = Result<T, ConfigurationError>;
