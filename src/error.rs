//! Error types for workplan.
//!
//! The derived-view functions themselves are total: bad task data degrades
//! to diagnostics, never errors. Errors exist at the use-case seams -
//! rejecting an invalid schedule transition before the persistence write,
//! and looking up a tier definition by an unknown identifier.

use thiserror::Error;

use crate::schedule::ScheduleStatus;

/// Main error type for workplan operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid schedule transition: {from} -> {to}")]
    InvalidTransition {
        from: ScheduleStatus,
        to: ScheduleStatus,
    },

    #[error("Unknown skill tier: {0}")]
    UnknownTier(String),
}

/// Result type alias for workplan operations.
pub type Result<T> = std::result::Result<T, Error>;
