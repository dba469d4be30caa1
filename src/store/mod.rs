// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer: trait seams over a keyed document store.
//!
//! The tracking core talks to five narrow interfaces:
//! - Sessions (lifecycle records, one active per rep)
//! - Targets (visit targets and their status transitions)
//! - Locations (read-only latest position per rep)
//! - Photos (key-addressed index with atomic find-or-create)
//! - Reps (read-only directory)
//!
//! [`memory::MemoryStore`] implements all five over concurrent maps and is
//! the reference for the atomicity each trait promises.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{LiveLocation, Representative, ShiftPhotoRecord, TrackingSession, VisitTarget};

pub mod memory;

pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    pub const SESSIONS: &str = "tracking_sessions";
    pub const TARGETS: &str = "visit_targets";
    pub const LOCATIONS: &str = "live_locations";
    pub const SHIFT_PHOTOS: &str = "shift_photos";
    /// Representative directory (read-only for this core)
    pub const REPS: &str = "representatives";
}

/// Outcome of a photo upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoUpsert {
    /// The record was written
    Inserted,
    /// A record with the same key already existed and was left untouched
    AlreadyPresent,
}

/// Tracking session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert `session` as its rep's active session.
    ///
    /// Atomic check-then-create: fails with `Conflict` when the rep already
    /// has an active session, no matter how many callers race.
    async fn insert_active(&self, session: TrackingSession) -> Result<TrackingSession>;

    /// Replace the stored session, provided it is still active.
    ///
    /// Atomic check-then-write: fails with `InvalidState` when the stored
    /// copy is no longer active, so racing stops cannot both close out one
    /// session.
    async fn update_active(&self, session: &TrackingSession) -> Result<()>;

    async fn get(&self, id: &str) -> Result<Option<TrackingSession>>;

    /// The rep's currently active session, if any.
    async fn active_for_rep(&self, rep_id: &str) -> Result<Option<TrackingSession>>;

    /// Every stored session. The photo synchronizer walks these.
    async fn all(&self) -> Result<Vec<TrackingSession>>;
}

/// Visit target storage.
///
/// Target CRUD lives outside this core; these are the read paths the
/// aggregations need plus the single completion write.
#[async_trait]
pub trait TargetStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<VisitTarget>>;

    /// Targets explicitly linked to a tracking session.
    async fn linked_to_session(&self, session_id: &str) -> Result<Vec<VisitTarget>>;

    /// The rep's targets whose visit date falls within `[from, to]`.
    async fn for_rep_between(
        &self,
        rep_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<VisitTarget>>;

    /// Move a target to `Completed` at `at`.
    ///
    /// Transitions are forward-only; a target that is already completed
    /// fails with `InvalidState`.
    async fn mark_completed(&self, id: &str, at: DateTime<Utc>) -> Result<VisitTarget>;

    /// Every stored target. The photo synchronizer walks these.
    async fn all(&self) -> Result<Vec<VisitTarget>>;
}

/// Read side of the position history.
///
/// The history itself is append-only and written by the device ingestion
/// path outside this core.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Most recent observation per representative, selected by `observed_at`.
    async fn latest_per_rep(&self) -> Result<HashMap<String, LiveLocation>>;
}

/// Shift photo index storage.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Find-or-create by the record's deduplication key.
    ///
    /// Atomic: concurrent upserts of one key yield exactly one stored record,
    /// and an existing record (synced or manually captured) is never
    /// overwritten. Records with neither a session nor a target link have no
    /// key and are rejected with `Validation`.
    async fn upsert(&self, record: ShiftPhotoRecord) -> Result<PhotoUpsert>;

    /// Every indexed photo record.
    async fn all(&self) -> Result<Vec<ShiftPhotoRecord>>;
}

/// Read-only representative directory.
#[async_trait]
pub trait RepDirectory: Send + Sync {
    async fn all(&self) -> Result<Vec<Representative>>;

    async fn get(&self, id: &str) -> Result<Option<Representative>>;
}
