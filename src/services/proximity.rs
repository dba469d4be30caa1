// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geofenced completion checks for visit targets.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::config::TrackingConfig;
use crate::error::{Result, TrackError};
use crate::geo;
use crate::models::VisitTarget;
use crate::store::TargetStore;

/// Result of a proximity check.
#[derive(Debug, Clone, Serialize)]
pub struct ProximityCheck {
    /// Distance to the target, rounded to 2 decimals for display
    pub distance_km: f64,
    /// Whether the position is inside the target's completion radius
    pub within_radius: bool,
    /// Radius the check was made against, in kilometers
    pub completion_radius_km: f64,
}

/// Proximity service.
///
/// `check` is read-only and safe to poll; the status transition is a
/// separate, explicit call.
pub struct ProximityService {
    targets: Arc<dyn TargetStore>,
    config: TrackingConfig,
}

impl ProximityService {
    pub fn new(targets: Arc<dyn TargetStore>, config: TrackingConfig) -> Self {
        Self { targets, config }
    }

    /// Distance from (`lat`, `lng`) to the target, and whether that position
    /// is inside the completion radius.
    ///
    /// The radius comparison uses the full-precision distance; rounding is
    /// applied only to the reported value, so a device sitting on the
    /// boundary cannot flip the outcome through display rounding.
    pub async fn check(
        &self,
        rep_id: &str,
        target_id: &str,
        lat: f64,
        lng: f64,
    ) -> Result<ProximityCheck> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(TrackError::Validation(format!(
                "position must be finite coordinates, got ({}, {})",
                lat, lng
            )));
        }

        let target = self.owned_target(rep_id, target_id).await?;
        let radius_km =
            effective_radius_m(target.completion_radius_m, self.config.default_completion_radius_m)
                / 1000.0;
        let distance_km = geo::haversine_km(lat, lng, target.location.lat, target.location.lng);

        Ok(ProximityCheck {
            distance_km: geo::round_km(distance_km),
            within_radius: distance_km <= radius_km,
            completion_radius_km: radius_km,
        })
    }

    /// Mark a target completed.
    ///
    /// Separate from `check`: the caller observes `within_radius` and then
    /// requests the transition. Forward-only; completing twice fails with
    /// `InvalidState`.
    pub async fn complete_target(&self, rep_id: &str, target_id: &str) -> Result<VisitTarget> {
        self.owned_target(rep_id, target_id).await?;
        let target = self.targets.mark_completed(target_id, Utc::now()).await?;

        tracing::info!(rep_id, target_id, "Visit target completed");
        Ok(target)
    }

    /// Ownership check folds into NotFound so another rep's target ids stay
    /// unguessable.
    async fn owned_target(&self, rep_id: &str, target_id: &str) -> Result<VisitTarget> {
        self.targets
            .get(target_id)
            .await?
            .filter(|t| t.rep_id == rep_id)
            .ok_or_else(|| TrackError::NotFound(format!("visit target {}", target_id)))
    }
}

/// Stored radius when it is usable; the configured default otherwise.
fn effective_radius_m(stored_m: f64, default_m: f64) -> f64 {
    if stored_m.is_finite() && stored_m > 0.0 {
        stored_m
    } else {
        default_m
    }
}
