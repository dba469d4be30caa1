// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory reference store backed by concurrent maps.
//!
//! Gives the services the same behavior contract an indexed document store
//! would: unique-key inserts are atomic, reads see committed writes, and the
//! location history is append-only. Integration tests run entirely against
//! this store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{Result, TrackError};
use crate::models::{
    LiveLocation, Representative, ShiftPhotoRecord, TargetStatus, TrackingSession, VisitTarget,
};
use crate::store::{
    LocationStore, PhotoStore, PhotoUpsert, RepDirectory, SessionStore, TargetStore,
};

/// In-memory store implementing every storage trait.
#[derive(Default)]
pub struct MemoryStore {
    sessions: DashMap<String, TrackingSession>,
    /// rep_id → id of the rep's active session (uniqueness guard)
    active_by_rep: DashMap<String, String>,
    targets: DashMap<String, VisitTarget>,
    /// rep_id → observation history, in arrival order
    locations: DashMap<String, Vec<LiveLocation>>,
    /// photo document ID → record
    photos: DashMap<String, ShiftPhotoRecord>,
    reps: DashMap<String, Representative>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Seeding (the external writers) ──────────────────────────

    /// Register a directory entry.
    pub fn add_rep(&self, rep: Representative) {
        self.reps.insert(rep.id.clone(), rep);
    }

    /// Create or replace a visit target.
    pub fn add_target(&self, target: VisitTarget) {
        self.targets.insert(target.id.clone(), target);
    }

    /// Append one position observation, as the device ingestion path would.
    pub fn record_location(&self, location: LiveLocation) {
        self.locations
            .entry(location.rep_id.clone())
            .or_default()
            .push(location);
    }

    /// Insert a manually captured photo record.
    ///
    /// Linked records land under their deduplication key, so a later sync of
    /// the same key is a no-op. Unlinked records are stored under their own
    /// id and never collide with synced ones.
    pub fn add_photo(&self, record: ShiftPhotoRecord) {
        let doc_id = record
            .key()
            .map(|k| k.document_id())
            .unwrap_or_else(|| record.id.clone());
        self.photos.insert(doc_id, record);
    }

    // ─── Inspection ──────────────────────────────────────────────

    /// Snapshot one target without going through the trait seams.
    pub fn get_target(&self, id: &str) -> Option<VisitTarget> {
        self.targets.get(id).map(|t| t.clone())
    }

    /// Number of indexed photo records.
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }
}

// ─── Session Operations ──────────────────────────────────────────

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert_active(&self, session: TrackingSession) -> Result<TrackingSession> {
        // The entry guard on the uniqueness map makes check-then-create
        // atomic: the losing racer sees Occupied.
        match self.active_by_rep.entry(session.rep_id.clone()) {
            Entry::Occupied(_) => Err(TrackError::Conflict(format!(
                "representative {} already has an active session",
                session.rep_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(session.id.clone());
                self.sessions.insert(session.id.clone(), session.clone());
                Ok(session)
            }
        }
    }

    async fn update_active(&self, session: &TrackingSession) -> Result<()> {
        {
            // The map guard serializes racing writers; the status check and
            // the replacement happen under one lock.
            let mut slot = self.sessions.get_mut(&session.id).ok_or_else(|| {
                TrackError::NotFound(format!("tracking session {}", session.id))
            })?;
            if !slot.status.is_active() {
                return Err(TrackError::InvalidState(format!(
                    "tracking session {} is already stopped",
                    session.id
                )));
            }
            *slot = session.clone();
        }
        if !session.status.is_active() {
            self.active_by_rep
                .remove_if(&session.rep_id, |_, active_id| active_id == &session.id);
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<TrackingSession>> {
        Ok(self.sessions.get(id).map(|s| s.clone()))
    }

    async fn active_for_rep(&self, rep_id: &str) -> Result<Option<TrackingSession>> {
        let active_id = match self.active_by_rep.get(rep_id) {
            Some(id) => id.clone(),
            None => return Ok(None),
        };
        Ok(self.sessions.get(&active_id).map(|s| s.clone()))
    }

    async fn all(&self) -> Result<Vec<TrackingSession>> {
        Ok(self.sessions.iter().map(|e| e.value().clone()).collect())
    }
}

// ─── Target Operations ───────────────────────────────────────────

#[async_trait]
impl TargetStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<VisitTarget>> {
        Ok(self.targets.get(id).map(|t| t.clone()))
    }

    async fn linked_to_session(&self, session_id: &str) -> Result<Vec<VisitTarget>> {
        Ok(self
            .targets
            .iter()
            .filter(|e| e.value().tracking_id.as_deref() == Some(session_id))
            .map(|e| e.value().clone())
            .collect())
    }

    async fn for_rep_between(
        &self,
        rep_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<VisitTarget>> {
        Ok(self
            .targets
            .iter()
            .filter(|e| {
                let t = e.value();
                t.rep_id == rep_id && t.visit_date.is_some_and(|d| d >= from && d <= to)
            })
            .map(|e| e.value().clone())
            .collect())
    }

    async fn mark_completed(&self, id: &str, at: DateTime<Utc>) -> Result<VisitTarget> {
        let mut slot = self
            .targets
            .get_mut(id)
            .ok_or_else(|| TrackError::NotFound(format!("visit target {}", id)))?;
        if !slot.status.can_transition_to(TargetStatus::Completed) {
            return Err(TrackError::InvalidState(format!(
                "visit target {} is already completed",
                id
            )));
        }
        slot.status = TargetStatus::Completed;
        slot.completed_at = Some(at);
        slot.updated_at = at;
        Ok(slot.clone())
    }

    async fn all(&self) -> Result<Vec<VisitTarget>> {
        Ok(self.targets.iter().map(|e| e.value().clone()).collect())
    }
}

// ─── Location Operations ─────────────────────────────────────────

#[async_trait]
impl LocationStore for MemoryStore {
    async fn latest_per_rep(&self) -> Result<HashMap<String, LiveLocation>> {
        let mut latest = HashMap::new();
        for entry in self.locations.iter() {
            // Ties on observed_at resolve to the last appended observation.
            if let Some(newest) = entry.value().iter().max_by_key(|l| l.observed_at) {
                latest.insert(entry.key().clone(), newest.clone());
            }
        }
        Ok(latest)
    }
}

// ─── Photo Operations ────────────────────────────────────────────

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn upsert(&self, record: ShiftPhotoRecord) -> Result<PhotoUpsert> {
        let key = record.key().ok_or_else(|| {
            TrackError::Validation(
                "photo record must reference a session or a visit target".to_string(),
            )
        })?;
        match self.photos.entry(key.document_id()) {
            Entry::Occupied(_) => Ok(PhotoUpsert::AlreadyPresent),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(PhotoUpsert::Inserted)
            }
        }
    }

    async fn all(&self) -> Result<Vec<ShiftPhotoRecord>> {
        Ok(self.photos.iter().map(|e| e.value().clone()).collect())
    }
}

// ─── Directory Operations ────────────────────────────────────────

#[async_trait]
impl RepDirectory for MemoryStore {
    async fn all(&self) -> Result<Vec<Representative>> {
        Ok(self.reps.iter().map(|e| e.value().clone()).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Representative>> {
        Ok(self.reps.get(id).map(|r| r.clone()))
    }
}
