//! # Store Errors
//!
//! One error type is shared by the remote boundary and the view-model handles, so callers
//! match on a single enum whether a failure came from the wire, from local validation, or
//! from a view-model that has already shut down.

/// Errors surfaced by the remote service or by local validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Transport or connectivity failure; no response was received.
    #[error("Network error: {0}")]
    Network(String),
    /// The service answered with a non-success status.
    #[error("Remote error (status {status}): {message}")]
    Remote { status: u16, message: String },
    /// Input rejected locally; nothing was sent to the service.
    #[error("Validation error: {0}")]
    Validation(String),
    /// A success response whose body did not match the contract.
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("View-model closed")]
    Closed,
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }

    /// HTTP-like status of a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            StoreError::Remote {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            StoreError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}
