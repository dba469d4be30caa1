//! Live position models shared across the tracking core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers (NaN and infinities are GPS noise).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// One reported position of a representative.
///
/// Positions are append-only: the ingestion path only ever adds rows, and
/// the live view considers the single most recent `observed_at` per
/// representative authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveLocation {
    /// Representative this observation belongs to
    pub rep_id: String,
    pub lat: f64,
    pub lng: f64,
    /// Device-reported accuracy radius in meters, if supplied
    pub accuracy_m: Option<f64>,
    /// When the device observed this position
    pub observed_at: DateTime<Utc>,
}

impl LiveLocation {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}
