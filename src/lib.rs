// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fieldrep-Tracker: shift tracking and geofenced visit completion
//!
//! This crate provides the tracking core of a field-sales backend: shift
//! sessions with odometer bookkeeping, proximity checks against visit
//! targets, the live roster, shift summaries, and the shift photo index.

pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;

use std::sync::Arc;

use config::TrackingConfig;
use services::{
    PhotoSyncService, ProximityService, RosterService, SessionService, VisitSummaryService,
};
use store::MemoryStore;

/// The assembled tracking core: every service wired to one store.
pub struct TrackingCore {
    pub config: TrackingConfig,
    pub sessions: SessionService,
    pub proximity: ProximityService,
    pub roster: RosterService,
    pub summary: VisitSummaryService,
    pub photo_sync: PhotoSyncService,
}

impl TrackingCore {
    /// Wire every service to an in-memory store.
    ///
    /// The store comes back alongside the core so callers can seed reps,
    /// targets, and positions through it.
    pub fn in_memory(config: TrackingConfig) -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let core = Self {
            sessions: SessionService::new(store.clone()),
            proximity: ProximityService::new(store.clone(), config.clone()),
            roster: RosterService::new(store.clone(), store.clone(), config.clone()),
            summary: VisitSummaryService::new(store.clone()),
            photo_sync: PhotoSyncService::new(store.clone(), store.clone(), store.clone()),
            config,
        };
        (core, store)
    }
}
