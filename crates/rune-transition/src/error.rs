//! Error types for page transitions.

use thiserror::Error;

use crate::locator::Locator;

/// Result type for host navigation operations.
pub type Result<T> = std::result::Result<T, TransitionError>;

/// Errors surfaced by the host navigation stack.
///
/// None of these are fatal to the orchestrator: a failed replay is logged
/// and the navigation latch is released regardless.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    /// The host refused or failed to navigate.
    #[error("navigation to {target} failed: {reason}")]
    NavigationFailed {
        /// Requested destination.
        target: Locator,
        /// Host supplied reason.
        reason: String,
    },

    /// `go_back` was issued with an empty back stack.
    #[error("no back entry in navigation history")]
    NoBackEntry,

    /// `go_forward` was issued with an empty forward stack.
    #[error("no forward entry in navigation history")]
    NoForwardEntry,

    /// A `New` navigation intent was recorded without a target.
    #[error("navigation intent has no target locator")]
    MissingTarget,
}
