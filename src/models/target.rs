//! Visit target model and status transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::location::GeoPoint;

/// Lifecycle state of a visit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    Pending,
    InProgress,
    Completed,
}

impl TargetStatus {
    fn rank(self) -> u8 {
        match self {
            TargetStatus::Pending => 0,
            TargetStatus::InProgress => 1,
            TargetStatus::Completed => 2,
        }
    }

    /// Transitions move forward only; skipping InProgress is allowed,
    /// re-opening a completed target is not.
    pub fn can_transition_to(self, next: TargetStatus) -> bool {
        next.rank() > self.rank()
    }
}

/// Stored visit target record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitTarget {
    /// Target ID (also used as document ID)
    pub id: String,
    /// Representative assigned to this target
    pub rep_id: String,
    /// Where the visit happens
    pub location: GeoPoint,
    /// Completion radius in meters around `location`
    pub completion_radius_m: f64,
    /// Current lifecycle state
    pub status: TargetStatus,
    /// Explicit link to the tracking session that covers this visit
    pub tracking_id: Option<String>,
    /// Planned visit date
    pub visit_date: Option<DateTime<Utc>>,
    /// Planned travel distance in kilometers
    pub estimated_km: Option<f64>,
    /// Travelled distance in kilometers, once known
    pub actual_km: Option<f64>,
    /// Photo of the visited area
    pub visited_area_photo: Option<String>,
    /// When the target was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl VisitTarget {
    /// Estimated distance, with absent or non-finite readings counted as zero.
    pub fn estimated_or_zero(&self) -> f64 {
        self.estimated_km.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Actual distance, with absent or non-finite readings counted as zero.
    pub fn actual_or_zero(&self) -> f64 {
        self.actual_km.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Meter reading to attach to a synced visit photo: the actual distance
    /// when it is usable, otherwise the estimate. Zero and non-finite values
    /// count as absent, so a target with neither yields `None` and is left to
    /// manual capture.
    pub fn sync_meter_reading(&self) -> Option<f64> {
        [self.actual_km, self.estimated_km]
            .into_iter()
            .flatten()
            .find(|v| v.is_finite() && *v != 0.0)
    }

    /// Shift date for photos synced from this target: completion time when
    /// known, else the planned visit date, else the last modification.
    pub fn shift_date(&self) -> DateTime<Utc> {
        self.completed_at
            .or(self.visit_date)
            .unwrap_or(self.updated_at)
    }
}
