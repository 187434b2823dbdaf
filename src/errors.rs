use std::fmt;

use thiserror::Error;

use crate::core::{validation::ValidationErrors, wizard::WizardStep};

/// Error type that captures local persistence failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Classifies why a booking submission (or catalog read) did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitErrorKind {
    NetworkError,
    Unauthorized,
    ServerRejected,
}

impl fmt::Display for SubmitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmitErrorKind::NetworkError => "network error",
            SubmitErrorKind::Unauthorized => "unauthorized",
            SubmitErrorKind::ServerRejected => "server rejected",
        };
        f.write_str(label)
    }
}

/// Failure reported by the booking API collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct SubmitError {
    pub kind: SubmitErrorKind,
    pub message: String,
}

impl SubmitError {
    pub fn new(kind: SubmitErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SubmitErrorKind::NetworkError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(SubmitErrorKind::Unauthorized, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(SubmitErrorKind::ServerRejected, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == SubmitErrorKind::Unauthorized
    }
}

/// Illegal or blocked wizard operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WizardError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("cannot go back from {from} to {to}")]
    InvalidRetreat { from: WizardStep, to: WizardStep },
    #[error("submission is only possible from the review step")]
    NotAtReview,
    #[error("the booking has not been submitted yet")]
    NotSubmitted,
    #[error("the booking has already been submitted")]
    Finished,
    #[error("service `{0}` is not available")]
    ServiceUnavailable(String),
    #[error("service `{0}` is not in the catalog")]
    UnknownService(String),
}

impl WizardError {
    /// Field errors carried by a blocked transition, if any.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            WizardError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_error_displays_message_verbatim() {
        let err = SubmitError::rejected("Slot already taken");
        assert_eq!(err.to_string(), "Slot already taken");
        assert_eq!(err.kind, SubmitErrorKind::ServerRejected);
        assert!(!err.is_unauthorized());
        assert!(SubmitError::unauthorized("expired").is_unauthorized());
    }
}
