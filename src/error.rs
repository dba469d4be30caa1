// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the tracking core.
//!
//! Every failure carries a human-readable message and a stable machine
//! kind, so the consuming CRM layer can map it onto whatever transport it
//! binds (the reference binding is JSON-over-HTTP).

/// Error type for all tracking-core operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// Missing or malformed required input (absent odometer reading,
    /// empty photo reference, non-finite coordinate).
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The one-active-session-per-representative invariant would be violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Referenced session or target does not exist, or does not belong
    /// to the requesting representative.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Operation attempted on a session or target not in the required state
    /// (e.g. stopping an already-stopped session).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Backing-store failure.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl TrackError {
    /// Stable machine-readable error kind.
    ///
    /// These strings are part of the contract with consumers; the messages
    /// attached to each variant are not.
    pub fn kind(&self) -> &'static str {
        match self {
            TrackError::Validation(_) => "validation_error",
            TrackError::Conflict(_) => "conflict_error",
            TrackError::NotFound(_) => "not_found",
            TrackError::InvalidState(_) => "invalid_state",
            TrackError::Store(_) => "store_error",
            TrackError::Internal(_) => "internal_error",
        }
    }

    /// True for the four terminal request-level kinds (everything except
    /// store/internal failures, which indicate infrastructure trouble).
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            TrackError::Validation(_)
                | TrackError::Conflict(_)
                | TrackError::NotFound(_)
                | TrackError::InvalidState(_)
        )
    }
}

/// Result type alias for tracking-core operations.
pub type Result<T> = std::result::Result<T, TrackError>;
