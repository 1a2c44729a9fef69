//! Error types for CodeSense.
//!
//! `ClientError` covers everything that can go wrong talking to the analysis
//! service or the persistence store. `SessionError` covers illegal transitions
//! of the analysis session, which never reach the network.

use thiserror::Error;

use super::session::RequestId;

/// Failures of remote calls and storage.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected locally before any request was issued.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Server answered with a structured non-success status.
    #[error("Request rejected ({status}): {message}")]
    RemoteRejection { status: String, message: String },

    /// Network failure or a non-JSON response.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

/// Illegal analysis-session transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Code is empty")]
    EmptyCode,

    #[error("A request is already in flight")]
    Busy,

    #[error("Full fix is disabled until an analysis reports errors")]
    FullFixDisabled,

    #[error("Stale response {got} (expected {expected:?})")]
    StaleResponse {
        expected: Option<RequestId>,
        got: RequestId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_wrap_anyhow() {
        let err: ClientError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "Storage failure: disk full");
        assert!(!err.is_transport());
    }

    #[test]
    fn rejection_message_includes_status() {
        let err = ClientError::RemoteRejection {
            status: "error".into(),
            message: "no such project".into(),
        };
        assert_eq!(err.to_string(), "Request rejected (error): no such project");
    }
}
