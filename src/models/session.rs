// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Tracking session model for a representative's work shift.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::location::GeoPoint;

/// Lifecycle state of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Stopped,
}

impl SessionStatus {
    pub fn is_active(self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

/// Stored tracking session record.
///
/// At most one session per representative is `Active` at any time; stopped
/// sessions are kept as the history the day summary is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingSession {
    /// Session ID (also used as document ID)
    pub id: String,
    /// Representative this session belongs to
    pub rep_id: String,
    /// Current lifecycle state
    pub status: SessionStatus,
    /// Odometer reading at shift start, in kilometers
    pub start_odometer_km: f64,
    /// Odometer reading at shift stop, in kilometers
    pub end_odometer_km: Option<f64>,
    /// Distance covered this shift: end minus start, never below zero
    pub total_distance_km: f64,
    /// Device position at start, if reported
    pub start_location: Option<GeoPoint>,
    /// Odometer photo captured at start
    pub start_meter_photo: String,
    /// Device position at stop, if reported
    pub end_location: Option<GeoPoint>,
    /// Odometer photo captured at stop
    pub end_meter_photo: Option<String>,
    /// Optional photo of the area visited during the shift
    pub visited_area_photo: Option<String>,
    /// When the shift started
    pub started_at: DateTime<Utc>,
    /// When the shift stopped
    pub stopped_at: Option<DateTime<Utc>>,
}

impl TrackingSession {
    /// Create a fresh active session at `started_at`.
    pub fn start(
        id: String,
        rep_id: String,
        start_odometer_km: f64,
        start_meter_photo: String,
        start_location: Option<GeoPoint>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            rep_id,
            status: SessionStatus::Active,
            start_odometer_km,
            end_odometer_km: None,
            total_distance_km: 0.0,
            start_location,
            start_meter_photo,
            end_location: None,
            end_meter_photo: None,
            visited_area_photo: None,
            started_at,
            stopped_at: None,
        }
    }

    /// Close out the shift: record the end readings and derive the distance.
    ///
    /// A lower end reading than start (odometer swap, typo) yields zero
    /// distance rather than a negative one; callers decide whether to log it.
    pub fn close_out(
        &mut self,
        end_odometer_km: f64,
        end_meter_photo: String,
        visited_area_photo: Option<String>,
        end_location: Option<GeoPoint>,
        stopped_at: DateTime<Utc>,
    ) {
        self.status = SessionStatus::Stopped;
        self.end_odometer_km = Some(end_odometer_km);
        self.total_distance_km = (end_odometer_km - self.start_odometer_km).max(0.0);
        self.end_meter_photo = Some(end_meter_photo);
        self.visited_area_photo = visited_area_photo;
        self.end_location = end_location;
        self.stopped_at = Some(stopped_at);
    }

    /// Shift duration, once the session has stopped.
    pub fn duration(&self) -> Option<Duration> {
        self.stopped_at.map(|stopped| stopped - self.started_at)
    }
}
