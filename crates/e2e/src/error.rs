//! Error types for the E2E suite
//!
//! Hard failures only. An expected-value mismatch in business data is a
//! soft assertion (see [`crate::soft`]) and never surfaces here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("ERP not reachable: {0}")]
    Target(String),

    #[error("browser setup failed: {0}")]
    Browser(String),

    #[error("missing precondition in '{scenario}': {what}")]
    MissingPrecondition { scenario: String, what: String },

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("modal never appeared: {0}")]
    ModalTimeout(String),

    #[error("step failed: {step} - {reason}")]
    StepFailed { step: String, reason: String },

    #[error("timeout waiting for: {0}")]
    Timeout(String),

    #[error("javascript evaluation failed: {0}")]
    Eval(String),

    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl E2eError {
    /// Shorthand for the hard-abort case where an upstream scenario never
    /// produced a value this one depends on.
    pub fn missing(scenario: &str, what: &str) -> Self {
        Self::MissingPrecondition {
            scenario: scenario.to_string(),
            what: what.to_string(),
        }
    }

    /// True when the failure means "a producer scenario did not run or did
    /// not finish" - the runner reports these as skipped, not failed.
    pub fn is_missing_precondition(&self) -> bool {
        matches!(self, Self::MissingPrecondition { .. })
    }
}

pub type E2eResult<T> = Result<T, E2eError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_precondition_is_detectable() {
        let err = E2eError::missing("create-shipment-order", "order number");
        assert!(err.is_missing_precondition());
        assert!(err.to_string().contains("order number"));

        let other = E2eError::Timeout("deficit row".into());
        assert!(!other.is_missing_precondition());
    }
}
