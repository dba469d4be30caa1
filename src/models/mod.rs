// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the tracking core.

pub mod location;
pub mod photo;
pub mod rep;
pub mod session;
pub mod target;

pub use location::{GeoPoint, LiveLocation};
pub use photo::{PhotoKey, PhotoOwner, PhotoSpot, PhotoType, ShiftPhotoRecord};
pub use rep::Representative;
pub use session::{SessionStatus, TrackingSession};
pub use target::{TargetStatus, VisitTarget};
