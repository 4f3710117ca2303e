use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct TutorError {
    pub code: String,
    pub message: String,
}

impl TutorError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Raised when an authenticated-only operation is asked to run without a
    /// persisted progress record.
    pub fn progress_missing(operation: &str) -> Self {
        Self::new(
            "PROGRESS_MISSING",
            format!(
                "{} requires a persisted learner progress record; route the learner to sign-up.",
                operation
            ),
        )
    }
}
