// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::{Arc, Once};

use chrono::{DateTime, TimeZone, Utc};
use fieldrep_tracker::config::TrackingConfig;
use fieldrep_tracker::models::{GeoPoint, LiveLocation, Representative, TargetStatus, VisitTarget};
use fieldrep_tracker::services::{ShiftStart, ShiftStop};
use fieldrep_tracker::store::MemoryStore;
use fieldrep_tracker::TrackingCore;

static INIT: Once = Once::new();

/// Switch on RUST_LOG-gated log output, once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Assembled core over a fresh in-memory store.
#[allow(dead_code)]
pub fn test_core() -> (TrackingCore, Arc<MemoryStore>) {
    init_tracing();
    TrackingCore::in_memory(TrackingConfig::default())
}

/// Fixed reference instant shared by the deterministic tests.
#[allow(dead_code)]
pub fn noonish() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn rep(id: &str, name: &str) -> Representative {
    Representative {
        id: id.to_string(),
        display_name: name.to_string(),
        email: None,
    }
}

/// A pending target with sensible defaults at the given position.
#[allow(dead_code)]
pub fn target_at(id: &str, rep_id: &str, lat: f64, lng: f64) -> VisitTarget {
    VisitTarget {
        id: id.to_string(),
        rep_id: rep_id.to_string(),
        location: GeoPoint::new(lat, lng),
        completion_radius_m: 100.0,
        status: TargetStatus::Pending,
        tracking_id: None,
        visit_date: None,
        estimated_km: None,
        actual_km: None,
        visited_area_photo: None,
        completed_at: None,
        updated_at: noonish(),
    }
}

#[allow(dead_code)]
pub fn observation(rep_id: &str, lat: f64, lng: f64, observed_at: DateTime<Utc>) -> LiveLocation {
    LiveLocation {
        rep_id: rep_id.to_string(),
        lat,
        lng,
        accuracy_m: Some(8.0),
        observed_at,
    }
}

#[allow(dead_code)]
pub fn start_req(rep_id: &str, odometer_km: f64) -> ShiftStart {
    ShiftStart {
        rep_id: rep_id.to_string(),
        odometer_km,
        meter_photo: format!("https://img.example/{}-start.jpg", rep_id),
        location: Some(GeoPoint::new(28.6139, 77.2090)),
    }
}

#[allow(dead_code)]
pub fn stop_req(session_id: &str, rep_id: &str, odometer_km: f64) -> ShiftStop {
    ShiftStop {
        session_id: session_id.to_string(),
        rep_id: rep_id.to_string(),
        odometer_km,
        meter_photo: format!("https://img.example/{}-end.jpg", rep_id),
        visited_area_photo: None,
        location: Some(GeoPoint::new(28.7041, 77.1025)),
    }
}
