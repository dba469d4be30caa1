// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use common::{start_req, stop_req, test_core};
use fieldrep_tracker::error::TrackError;
use fieldrep_tracker::models::SessionStatus;

#[tokio::test]
async fn test_shift_start_stop_derives_distance() {
    let (core, _store) = test_core();

    let session = core
        .sessions
        .start(start_req("rep-1", 12_400.0))
        .await
        .expect("start should succeed");
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.start_odometer_km, 12_400.0);
    assert_eq!(session.total_distance_km, 0.0);
    assert!(session.stopped_at.is_none());

    let stopped = core
        .sessions
        .stop(stop_req(&session.id, "rep-1", 12_466.5))
        .await
        .expect("stop should succeed");
    assert_eq!(stopped.status, SessionStatus::Stopped);
    assert_eq!(stopped.end_odometer_km, Some(12_466.5));
    assert!((stopped.total_distance_km - 66.5).abs() < 1e-9);
    assert!(stopped.stopped_at.is_some());
    assert!(stopped.duration().is_some());
}

#[tokio::test]
async fn test_second_start_conflicts_while_active() {
    let (core, _store) = test_core();

    core.sessions
        .start(start_req("rep-1", 100.0))
        .await
        .expect("first start should succeed");

    let err = core
        .sessions
        .start(start_req("rep-1", 105.0))
        .await
        .expect_err("second start must conflict");
    assert!(matches!(err, TrackError::Conflict(_)));
    assert_eq!(err.kind(), "conflict_error");

    // A different rep is unaffected.
    core.sessions
        .start(start_req("rep-2", 50.0))
        .await
        .expect("other rep should start fine");
}

#[tokio::test]
async fn test_restart_allowed_after_stop() {
    let (core, _store) = test_core();

    let first = core.sessions.start(start_req("rep-1", 100.0)).await.unwrap();
    core.sessions
        .stop(stop_req(&first.id, "rep-1", 130.0))
        .await
        .unwrap();

    let second = core
        .sessions
        .start(start_req("rep-1", 130.0))
        .await
        .expect("start after stop should succeed");
    assert_ne!(second.id, first.id);
    assert_eq!(second.status, SessionStatus::Active);
}

#[tokio::test]
async fn test_stop_below_start_clamps_to_zero() {
    let (core, _store) = test_core();

    let session = core.sessions.start(start_req("rep-1", 500.0)).await.unwrap();
    let stopped = core
        .sessions
        .stop(stop_req(&session.id, "rep-1", 450.0))
        .await
        .expect("a lower end reading still stops the shift");

    assert_eq!(stopped.total_distance_km, 0.0);
    assert_eq!(stopped.end_odometer_km, Some(450.0));
    assert_eq!(stopped.status, SessionStatus::Stopped);
}

#[tokio::test]
async fn test_negative_reading_is_accepted_and_clamped() {
    // Any finite reading passes validation; a pair that works out negative
    // is clamped at stop time, not rejected.
    let (core, _store) = test_core();

    let session = core.sessions.start(start_req("rep-1", -3.0)).await.unwrap();
    let stopped = core
        .sessions
        .stop(stop_req(&session.id, "rep-1", -10.0))
        .await
        .unwrap();
    assert_eq!(stopped.total_distance_km, 0.0);
    assert_eq!(stopped.end_odometer_km, Some(-10.0));
}

#[tokio::test]
async fn test_validation_rejects_bad_readings() {
    let (core, _store) = test_core();

    for bad_odometer in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = core
            .sessions
            .start(start_req("rep-1", bad_odometer))
            .await
            .expect_err("bad odometer must be rejected");
        assert!(matches!(err, TrackError::Validation(_)));
    }

    let mut no_photo = start_req("rep-1", 100.0);
    no_photo.meter_photo = String::new();
    let err = core.sessions.start(no_photo).await.expect_err("photo required");
    assert!(matches!(err, TrackError::Validation(_)));

    let mut no_rep = start_req("rep-1", 100.0);
    no_rep.rep_id = String::new();
    let err = core.sessions.start(no_rep).await.expect_err("rep required");
    assert!(matches!(err, TrackError::Validation(_)));

    // Nothing was created along the way.
    assert!(core.sessions.active_for("rep-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_stop_validation_leaves_session_active() {
    let (core, _store) = test_core();

    let session = core.sessions.start(start_req("rep-1", 100.0)).await.unwrap();

    let mut bad = stop_req(&session.id, "rep-1", 130.0);
    bad.meter_photo = String::new();
    let err = core.sessions.stop(bad).await.expect_err("photo required");
    assert!(matches!(err, TrackError::Validation(_)));

    let err = core
        .sessions
        .stop(stop_req(&session.id, "rep-1", f64::NAN))
        .await
        .expect_err("reading must be finite");
    assert!(matches!(err, TrackError::Validation(_)));

    let still_active = core
        .sessions
        .active_for("rep-1")
        .await
        .unwrap()
        .expect("session must remain active after failed stops");
    assert_eq!(still_active.id, session.id);
    assert_eq!(still_active.status, SessionStatus::Active);
}

#[tokio::test]
async fn test_stop_by_wrong_rep_is_not_found() {
    let (core, _store) = test_core();

    let session = core.sessions.start(start_req("rep-1", 100.0)).await.unwrap();
    let err = core
        .sessions
        .stop(stop_req(&session.id, "rep-2", 130.0))
        .await
        .expect_err("another rep must not see the session");
    assert!(matches!(err, TrackError::NotFound(_)));

    // Still active for its owner.
    assert!(core.sessions.active_for("rep-1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_stop_twice_is_invalid_state() {
    let (core, _store) = test_core();

    let session = core.sessions.start(start_req("rep-1", 100.0)).await.unwrap();
    core.sessions
        .stop(stop_req(&session.id, "rep-1", 130.0))
        .await
        .unwrap();

    let err = core
        .sessions
        .stop(stop_req(&session.id, "rep-1", 140.0))
        .await
        .expect_err("second stop must fail");
    assert!(matches!(err, TrackError::InvalidState(_)));
    assert_eq!(err.kind(), "invalid_state");
}

#[tokio::test]
async fn test_stop_unknown_session_is_not_found() {
    let (core, _store) = test_core();

    let err = core
        .sessions
        .stop(stop_req("no-such-session", "rep-1", 130.0))
        .await
        .expect_err("unknown session must not stop");
    assert!(matches!(err, TrackError::NotFound(_)));
}

#[tokio::test]
async fn test_active_for_follows_lifecycle() {
    let (core, _store) = test_core();

    assert!(core.sessions.active_for("rep-1").await.unwrap().is_none());

    let session = core.sessions.start(start_req("rep-1", 100.0)).await.unwrap();
    let resumed = core
        .sessions
        .active_for("rep-1")
        .await
        .unwrap()
        .expect("active session should be resumable");
    assert_eq!(resumed.id, session.id);

    core.sessions
        .stop(stop_req(&session.id, "rep-1", 130.0))
        .await
        .unwrap();
    assert!(core.sessions.active_for("rep-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_session_serializes_snake_case() {
    let (core, _store) = test_core();

    let session = core.sessions.start(start_req("rep-1", 100.0)).await.unwrap();
    let value = serde_json::to_value(&session).expect("session should serialize");
    assert_eq!(value["status"], "active");
    assert_eq!(value["rep_id"], "rep-1");

    let stopped = core
        .sessions
        .stop(stop_req(&session.id, "rep-1", 130.0))
        .await
        .unwrap();
    let value = serde_json::to_value(&stopped).unwrap();
    assert_eq!(value["status"], "stopped");
    assert_eq!(value["total_distance_km"], 30.0);
}
