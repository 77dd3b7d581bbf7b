//! Error types for the Weir traffic router.

use thiserror::Error;

/// Result type alias for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

/// Errors surfaced to the orchestrator.
///
/// Both variants are terminal for the invocation: nothing is retried
/// or reclassified here. Skipped updates (no canary status, abort,
/// pause, promotion) are not errors and never reach this type.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The weight request never reached the backend.
    #[error("failed to send weight request: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("weight request failed with status: {0}")]
    BackendStatus(u16),
}
