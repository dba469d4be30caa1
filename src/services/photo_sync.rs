// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shift photo synchronization.
//!
//! Projects sessions and visit targets into the keyed photo index:
//! 1. Session pass: start/end odometer photos, keyed with their readings
//! 2. Target pass: visited-area photos that have a determinable reading
//!
//! Synced and manually captured records share the index, so a run is
//! idempotent and never overwrites a manual entry. Each source item is
//! processed independently; one bad record never aborts the batch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::{stream, StreamExt};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{PhotoSpot, PhotoType, ShiftPhotoRecord, TrackingSession, VisitTarget};
use crate::store::{PhotoStore, PhotoUpsert, SessionStore, TargetStore};

const MAX_CONCURRENT_UPSERTS: usize = 16;

/// Result of one synchronization run.
///
/// The counts are for logging and monitoring; re-running a sync moves
/// records from `inserted` to `already_present` and changes nothing else.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Records newly written this run
    pub inserted: u64,
    /// Records already in the index (earlier runs or manual capture)
    pub already_present: u64,
    /// Source items that failed and were skipped
    pub failed: u64,
}

impl SyncReport {
    /// Number of records this run added.
    pub fn synced_count(&self) -> u64 {
        self.inserted
    }

    /// True when no source item failed.
    pub fn is_fully_synced(&self) -> bool {
        self.failed == 0
    }
}

/// Photo synchronization service.
pub struct PhotoSyncService {
    sessions: Arc<dyn SessionStore>,
    targets: Arc<dyn TargetStore>,
    photos: Arc<dyn PhotoStore>,
}

impl PhotoSyncService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        targets: Arc<dyn TargetStore>,
        photos: Arc<dyn PhotoStore>,
    ) -> Self {
        Self {
            sessions,
            targets,
            photos,
        }
    }

    /// Run a full synchronization pass over all sessions and targets.
    ///
    /// Safe to run any number of times and from concurrent callers: the
    /// index key makes every upsert a find-or-create.
    pub async fn sync(&self) -> Result<SyncReport> {
        let inserted = Arc::new(AtomicU64::new(0));
        let already_present = Arc::new(AtomicU64::new(0));
        let failed = Arc::new(AtomicU64::new(0));

        let sessions = self.sessions.all().await?;
        stream::iter(sessions)
            .for_each_concurrent(MAX_CONCURRENT_UPSERTS, |session| {
                let inserted = Arc::clone(&inserted);
                let already_present = Arc::clone(&already_present);
                let failed = Arc::clone(&failed);
                async move {
                    for record in session_photo_records(&session) {
                        match self.photos.upsert(record).await {
                            Ok(PhotoUpsert::Inserted) => {
                                inserted.fetch_add(1, Ordering::Relaxed);
                            }
                            Ok(PhotoUpsert::AlreadyPresent) => {
                                already_present.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(e) => {
                                tracing::warn!(
                                    session_id = %session.id,
                                    error = ?e,
                                    "Failed to sync session photo, skipping"
                                );
                                failed.fetch_add(1, Ordering::Relaxed);
                            }
                        }
                    }
                }
            })
            .await;

        let targets = self.targets.all().await?;
        stream::iter(targets)
            .for_each_concurrent(MAX_CONCURRENT_UPSERTS, |target| {
                let inserted = Arc::clone(&inserted);
                let already_present = Arc::clone(&already_present);
                let failed = Arc::clone(&failed);
                async move {
                    let Some(record) = target_photo_record(&target) else {
                        // No photo or no usable reading; manual capture is
                        // the fallback for these.
                        return;
                    };
                    match self.photos.upsert(record).await {
                        Ok(PhotoUpsert::Inserted) => {
                            inserted.fetch_add(1, Ordering::Relaxed);
                        }
                        Ok(PhotoUpsert::AlreadyPresent) => {
                            already_present.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            tracing::warn!(
                                target_id = %target.id,
                                error = ?e,
                                "Failed to sync target photo, skipping"
                            );
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
            .await;

        let report = SyncReport {
            inserted: inserted.load(Ordering::Relaxed),
            already_present: already_present.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
        };

        tracing::info!(
            inserted = report.inserted,
            already_present = report.already_present,
            failed = report.failed,
            "Photo sync finished"
        );
        Ok(report)
    }

    /// The rep's photo gallery, freshly synced.
    ///
    /// Runs a sync pass first, so meter photos from a shift that just ended
    /// appear without waiting for any schedule. Records come back newest
    /// shift first.
    pub async fn gallery(&self, rep_id: &str) -> Result<Vec<ShiftPhotoRecord>> {
        self.sync().await?;

        let mut records: Vec<ShiftPhotoRecord> = self
            .photos
            .all()
            .await?
            .into_iter()
            .filter(|r| r.rep_id == rep_id)
            .collect();
        records.sort_by(|a, b| {
            b.shift_date
                .cmp(&a.shift_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }
}

/// Photo records a session contributes: the start meter photo always, the
/// end photo once both the photo and its reading exist.
fn session_photo_records(session: &TrackingSession) -> Vec<ShiftPhotoRecord> {
    let mut records = Vec::new();

    if !session.start_meter_photo.is_empty() {
        records.push(ShiftPhotoRecord {
            id: Uuid::new_v4().to_string(),
            rep_id: session.rep_id.clone(),
            photo_type: PhotoType::Meter,
            image: session.start_meter_photo.clone(),
            meter_reading: Some(session.start_odometer_km),
            location: session.start_location.map(PhotoSpot::from),
            session_id: Some(session.id.clone()),
            target_id: None,
            shift_date: session.started_at,
            notes: None,
        });
    }

    if let (Some(photo), Some(reading)) = (&session.end_meter_photo, session.end_odometer_km) {
        if !photo.is_empty() {
            records.push(ShiftPhotoRecord {
                id: Uuid::new_v4().to_string(),
                rep_id: session.rep_id.clone(),
                photo_type: PhotoType::Meter,
                image: photo.clone(),
                meter_reading: Some(reading),
                location: session.end_location.map(PhotoSpot::from),
                session_id: Some(session.id.clone()),
                target_id: None,
                shift_date: session.stopped_at.unwrap_or(session.started_at),
                notes: None,
            });
        }
    }

    records
}

/// The photo record a target contributes, when it has both a photo and a
/// determinable reading.
fn target_photo_record(target: &VisitTarget) -> Option<ShiftPhotoRecord> {
    let image = target
        .visited_area_photo
        .as_deref()
        .filter(|p| !p.is_empty())?;
    let reading = target.sync_meter_reading()?;

    Some(ShiftPhotoRecord {
        id: Uuid::new_v4().to_string(),
        rep_id: target.rep_id.clone(),
        photo_type: PhotoType::Meter,
        image: image.to_string(),
        meter_reading: Some(reading),
        location: Some(PhotoSpot::from(target.location)),
        session_id: None,
        target_id: Some(target.id.clone()),
        shift_date: target.shift_date(),
        notes: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, TargetStatus};
    use chrono::{TimeZone, Utc};

    fn session() -> TrackingSession {
        TrackingSession::start(
            "s-1".to_string(),
            "rep-1".to_string(),
            12_400.0,
            "https://img.example/start.jpg".to_string(),
            Some(GeoPoint::new(28.6139, 77.2090)),
            Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
        )
    }

    fn target() -> VisitTarget {
        VisitTarget {
            id: "t-1".to_string(),
            rep_id: "rep-1".to_string(),
            location: GeoPoint::new(28.7041, 77.1025),
            completion_radius_m: 100.0,
            status: TargetStatus::Completed,
            tracking_id: None,
            visit_date: None,
            estimated_km: Some(10.0),
            actual_km: Some(12.5),
            visited_area_photo: Some("https://img.example/visit.jpg".to_string()),
            completed_at: Some(Utc.with_ymd_and_hms(2026, 3, 14, 11, 0, 0).unwrap()),
            updated_at: Utc.with_ymd_and_hms(2026, 3, 14, 11, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_active_session_contributes_start_photo_only() {
        let records = session_photo_records(&session());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].photo_type, PhotoType::Meter);
        assert_eq!(records[0].meter_reading, Some(12_400.0));
        assert_eq!(records[0].session_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn test_stopped_session_contributes_both_photos() {
        let mut s = session();
        s.close_out(
            12_466.5,
            "https://img.example/end.jpg".to_string(),
            None,
            None,
            Utc.with_ymd_and_hms(2026, 3, 14, 17, 30, 0).unwrap(),
        );
        let records = session_photo_records(&s);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].meter_reading, Some(12_466.5));
        assert_eq!(records[1].shift_date, s.stopped_at.unwrap());
    }

    #[test]
    fn test_end_photo_without_reading_is_skipped() {
        let mut s = session();
        s.end_meter_photo = Some("https://img.example/end.jpg".to_string());
        // end_odometer_km left None, as a partially written record would be
        let records = session_photo_records(&s);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_target_record_uses_actual_reading() {
        let record = target_photo_record(&target()).unwrap();
        assert_eq!(record.photo_type, PhotoType::Meter);
        assert_eq!(record.meter_reading, Some(12.5));
        assert_eq!(record.target_id.as_deref(), Some("t-1"));
        assert_eq!(record.shift_date, target().completed_at.unwrap());
    }

    #[test]
    fn test_target_without_usable_reading_is_skipped() {
        let mut t = target();
        t.actual_km = Some(0.0);
        t.estimated_km = None;
        assert!(target_photo_record(&t).is_none());

        t.visited_area_photo = None;
        t.actual_km = Some(12.5);
        assert!(target_photo_record(&t).is_none());
    }

    #[test]
    fn test_sync_report_accessors() {
        let report = SyncReport {
            inserted: 3,
            already_present: 2,
            failed: 0,
        };
        assert_eq!(report.synced_count(), 3);
        assert!(report.is_fully_synced());

        let report = SyncReport {
            failed: 1,
            ..report
        };
        assert!(!report.is_fully_synced());
    }
}
