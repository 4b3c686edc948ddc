use thiserror::Error;

/// Error kinds shared by the service and every storage adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimesheetError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found")]
    NotFound,

    #[error("duplicate")]
    Duplicate,

    #[error("backend error: {0}")]
    Backend(String),
}

impl TimesheetError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}
