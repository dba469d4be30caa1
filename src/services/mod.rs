// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod photo_sync;
pub mod proximity;
pub mod roster;
pub mod session;
pub mod summary;

pub use photo_sync::{PhotoSyncService, SyncReport};
pub use proximity::{ProximityCheck, ProximityService};
pub use roster::{online_count, LiveRoster, RosterEntry, RosterService};
pub use session::{SessionService, ShiftStart, ShiftStop};
pub use summary::{ShiftSummary, VisitSummaryService};
