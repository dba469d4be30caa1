// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Shift photo index models and the deduplication key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::location::GeoPoint;

/// What a shift photo shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoType {
    /// Odometer reading at shift start or stop
    Meter,
    /// A position snapshot
    Location,
    /// The visited area of a target
    Visit,
}

impl PhotoType {
    pub fn as_str(self) -> &'static str {
        match self {
            PhotoType::Meter => "meter",
            PhotoType::Location => "location",
            PhotoType::Visit => "visit",
        }
    }
}

/// Where a photo was taken, with an optional human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSpot {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
}

impl From<GeoPoint> for PhotoSpot {
    fn from(p: GeoPoint) -> Self {
        Self {
            lat: p.lat,
            lng: p.lng,
            address: None,
        }
    }
}

/// Stored photo-index record.
///
/// Records enter the index either through the synchronizer (derived from
/// sessions and visit targets) or through direct manual capture. The index is
/// keyed by [`PhotoKey`], so re-syncing never duplicates a record and never
/// overwrites a manual one with a matching key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPhotoRecord {
    /// Record ID
    pub id: String,
    /// Representative the photo belongs to
    pub rep_id: String,
    /// What the photo shows
    pub photo_type: PhotoType,
    /// Image reference (URL or storage path)
    pub image: String,
    /// Odometer or distance reading attached to the photo
    pub meter_reading: Option<f64>,
    /// Where the photo was taken
    pub location: Option<PhotoSpot>,
    /// Tracking session this photo came from
    pub session_id: Option<String>,
    /// Visit target this photo came from
    pub target_id: Option<String>,
    /// Which shift day the photo belongs to
    pub shift_date: DateTime<Utc>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl ShiftPhotoRecord {
    /// Deduplication key for this record, or `None` when the record
    /// references neither a session nor a target.
    pub fn key(&self) -> Option<PhotoKey> {
        match (&self.session_id, &self.target_id) {
            (Some(session_id), _) => Some(PhotoKey::for_session(
                session_id,
                self.photo_type,
                &self.image,
                self.meter_reading,
            )),
            (None, Some(target_id)) => Some(PhotoKey::for_target(
                target_id,
                self.photo_type,
                &self.image,
            )),
            (None, None) => None,
        }
    }
}

/// Owning side of a photo's deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhotoOwner {
    Session(String),
    Target(String),
}

/// Identity of a photo record in the index.
///
/// Session-derived photos key on the meter reading as well (the same image
/// may legitimately appear with start and end readings); target-derived
/// photos key on the image alone. Readings are quantized to thousandths of a
/// kilometer so the key stays hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoKey {
    owner: PhotoOwner,
    photo_type: PhotoType,
    image: String,
    reading_milli: Option<i64>,
}

impl PhotoKey {
    pub fn for_session(
        session_id: &str,
        photo_type: PhotoType,
        image: &str,
        reading: Option<f64>,
    ) -> Self {
        Self {
            owner: PhotoOwner::Session(session_id.to_string()),
            photo_type,
            image: image.to_string(),
            reading_milli: reading.filter(|v| v.is_finite()).map(quantize_reading),
        }
    }

    pub fn for_target(target_id: &str, photo_type: PhotoType, image: &str) -> Self {
        Self {
            owner: PhotoOwner::Target(target_id.to_string()),
            photo_type,
            image: image.to_string(),
            reading_milli: None,
        }
    }

    /// Compound document ID for key-addressed stores. Image references are
    /// URL-encoded so slashes and query strings stay inside one path segment.
    pub fn document_id(&self) -> String {
        let owner = match &self.owner {
            PhotoOwner::Session(id) => format!("session_{}", id),
            PhotoOwner::Target(id) => format!("target_{}", id),
        };
        let safe_image = urlencoding::encode(&self.image);
        match self.reading_milli {
            Some(milli) => format!(
                "{}_{}_{}_{}",
                owner,
                self.photo_type.as_str(),
                safe_image,
                milli
            ),
            None => format!("{}_{}_{}", owner, self.photo_type.as_str(), safe_image),
        }
    }
}

fn quantize_reading(v: f64) -> i64 {
    (v * 1000.0).round() as i64
}
