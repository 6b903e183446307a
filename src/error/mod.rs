//! Error types for crdctl

use kube::core::GroupVersionKind;
use thiserror::Error;

/// Main error type for crdctl
#[derive(Debug, Error)]
pub enum CrdError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CrdError {
    /// True when the server answered 404 for the addressed resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, CrdError::Api(ApiError::NotFound { .. }))
    }

    /// True when the server rejected a create because the name is taken
    pub fn is_conflict(&self) -> bool {
        matches!(self, CrdError::Api(ApiError::Conflict { .. }))
    }

    /// True when the call's deadline expired
    pub fn is_timeout(&self) -> bool {
        matches!(self, CrdError::Api(ApiError::Timeout { .. }))
    }
}

/// Failures reported by (or on the way to) the API server
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    #[error("Resource already exists: {message}")]
    Conflict { message: String },

    #[error("Timeout waiting for {operation}")]
    Timeout { operation: String },

    #[error("Operation cancelled: {operation}")]
    Cancelled { operation: String },

    #[error("API server returned {code} ({reason}): {message}")]
    Status {
        code: u16,
        reason: String,
        message: String,
    },

    #[error("Invalid request: {0}")]
    Request(#[from] http::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Kubernetes API error: {0}")]
    Transport(#[source] kube::Error),
}

impl From<kube::Error> for ApiError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) if resp.code == 404 => ApiError::NotFound {
                message: resp.message,
            },
            kube::Error::Api(resp) if resp.code == 409 => ApiError::Conflict {
                message: resp.message,
            },
            kube::Error::Api(resp) => ApiError::Status {
                code: resp.code,
                reason: resp.reason,
                message: resp.message,
            },
            other => ApiError::Transport(other),
        }
    }
}

impl From<kube::Error> for CrdError {
    fn from(err: kube::Error) -> Self {
        CrdError::Api(err.into())
    }
}

/// A group/version/kind that was never registered in a [`Scheme`](crate::resources::Scheme)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no kind {} is registered for version {}", .0.kind, .0.api_version())]
pub struct UnregisteredKind(pub GroupVersionKind);

/// Mismatch between an untyped document and a typed shape
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Unregistered(#[from] UnregisteredKind),

    #[error("document has no apiVersion/kind")]
    MissingTypeMeta,

    #[error("invalid apiVersion {0:?}")]
    InvalidApiVersion(String),

    #[error("kind {found} is registered to {registered}, not {requested}")]
    ShapeMismatch {
        found: String,
        registered: String,
        requested: String,
    },

    #[error("expected {expected}, document declares {found}")]
    KindMismatch { expected: String, found: String },

    #[error("document does not fit {kind}: {source}")]
    Invalid {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {kind}: {source}")]
    Encode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for CrdError {
    fn from(e: serde_json::Error) -> Self {
        CrdError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for CrdError {
    fn from(e: serde_yaml::Error) -> Self {
        CrdError::Serialization(e.to_string())
    }
}

/// Result type alias for crdctl
pub type Result<T> = std::result::Result<T, CrdError>;
