//! Errors raised at the manager boundary

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimerError>;

/// Failures a caller must report back to the user as an error line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer '{0}' does not exist")]
    NotFound(String),

    #[error("Timer '{0}' already exists")]
    AlreadyExists(String),
}
