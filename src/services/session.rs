// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle service.
//!
//! Handles the shift workflow:
//! 1. Start: validate the readings, create the rep's single active session
//! 2. Stop: validate, close the session out with the derived distance
//! 3. Resume: hand the client its active session, if any

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{Result, TrackError};
use crate::models::{GeoPoint, TrackingSession};
use crate::store::SessionStore;
use crate::time_utils::format_utc_rfc3339;

/// Request to start a shift.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShiftStart {
    #[validate(length(min = 1, message = "rep id is required"))]
    pub rep_id: String,
    /// Odometer reading at start, in kilometers
    pub odometer_km: f64,
    #[validate(length(min = 1, message = "meter photo is required"))]
    pub meter_photo: String,
    pub location: Option<GeoPoint>,
}

/// Request to stop a shift.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShiftStop {
    #[validate(length(min = 1, message = "session id is required"))]
    pub session_id: String,
    #[validate(length(min = 1, message = "rep id is required"))]
    pub rep_id: String,
    /// Odometer reading at stop, in kilometers
    pub odometer_km: f64,
    #[validate(length(min = 1, message = "meter photo is required"))]
    pub meter_photo: String,
    pub visited_area_photo: Option<String>,
    pub location: Option<GeoPoint>,
}

/// Session lifecycle service.
pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Start a shift for a representative.
    ///
    /// At most one session per rep is active at a time: a second start while
    /// one is running fails with `Conflict`, no matter how calls interleave.
    pub async fn start(&self, req: ShiftStart) -> Result<TrackingSession> {
        req.validate()
            .map_err(|e| TrackError::Validation(e.to_string()))?;
        check_odometer(req.odometer_km)?;

        let session = TrackingSession::start(
            Uuid::new_v4().to_string(),
            req.rep_id,
            req.odometer_km,
            req.meter_photo,
            req.location,
            Utc::now(),
        );

        let session = self.sessions.insert_active(session).await?;

        tracing::info!(
            rep_id = %session.rep_id,
            session_id = %session.id,
            odometer_km = session.start_odometer_km,
            "Shift started"
        );
        Ok(session)
    }

    /// Stop a shift and derive the distance covered.
    ///
    /// The distance is end minus start odometer, clamped at zero; a lower end
    /// reading is logged and treated as a zero-distance shift rather than an
    /// error. The stored record is replaced in one write, so the session is
    /// either fully closed out or untouched.
    pub async fn stop(&self, req: ShiftStop) -> Result<TrackingSession> {
        req.validate()
            .map_err(|e| TrackError::Validation(e.to_string()))?;
        check_odometer(req.odometer_km)?;

        // Ownership check folds into NotFound so another rep's session ids
        // stay unguessable.
        let mut session = self
            .sessions
            .get(&req.session_id)
            .await?
            .filter(|s| s.rep_id == req.rep_id)
            .ok_or_else(|| TrackError::NotFound(format!("tracking session {}", req.session_id)))?;

        if !session.status.is_active() {
            return Err(TrackError::InvalidState(format!(
                "tracking session {} is already stopped",
                session.id
            )));
        }

        if req.odometer_km < session.start_odometer_km {
            tracing::warn!(
                session_id = %session.id,
                start_odometer_km = session.start_odometer_km,
                end_odometer_km = req.odometer_km,
                "End odometer below start reading, clamping distance to zero"
            );
        }

        let stopped_at = Utc::now();
        session.close_out(
            req.odometer_km,
            req.meter_photo,
            req.visited_area_photo,
            req.location,
            stopped_at,
        );
        self.sessions.update_active(&session).await?;

        tracing::info!(
            rep_id = %session.rep_id,
            session_id = %session.id,
            total_distance_km = session.total_distance_km,
            stopped_at = %format_utc_rfc3339(stopped_at),
            "Shift stopped"
        );
        Ok(session)
    }

    /// The rep's active session, if any. Clients call this on app resume to
    /// pick their running shift back up.
    pub async fn active_for(&self, rep_id: &str) -> Result<Option<TrackingSession>> {
        self.sessions.active_for_rep(rep_id).await
    }
}

/// Odometer readings must be numeric; any finite value is accepted, the
/// distance clamp handles implausible pairs at stop time.
fn check_odometer(value_km: f64) -> Result<()> {
    if !value_km.is_finite() {
        return Err(TrackError::Validation(format!(
            "odometer reading must be a finite number, got {}",
            value_km
        )));
    }
    Ok(())
}
