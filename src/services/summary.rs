// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shift summary aggregation.
//!
//! Derives the day-end view of one shift from its associated visit targets.
//! Association is read-time only: nothing here writes links back, so the
//! summary always reflects the current target records.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::models::{TrackingSession, VisitTarget};
use crate::store::TargetStore;
use crate::time_utils::utc_day_bounds;

/// Aggregated view of one shift.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftSummary {
    /// Number of targets associated with the shift
    pub visit_count: usize,
    /// Sum of planned distances, missing readings counted as zero
    pub estimated_km: f64,
    /// Sum of travelled distances, missing readings counted as zero
    pub actual_km: f64,
    /// Visited-area photos, most recently completed first
    pub visited_area_images: Vec<String>,
    /// Headline image for the shift
    pub primary_visited_area_image: Option<String>,
}

/// Summary service.
pub struct VisitSummaryService {
    targets: Arc<dyn TargetStore>,
}

impl VisitSummaryService {
    pub fn new(targets: Arc<dyn TargetStore>) -> Self {
        Self { targets }
    }

    /// Summarize the visit targets associated with `session`.
    ///
    /// A target belongs to the shift when it links to the session explicitly,
    /// or when it is the same rep's visit planned for the UTC calendar day
    /// the session started on. The two sets are unioned by target id, the
    /// explicitly linked copy winning; a target linked to a different session
    /// stays with that session and is never re-claimed by the day match.
    pub async fn summarize(&self, session: &TrackingSession) -> Result<ShiftSummary> {
        let linked = self.targets.linked_to_session(&session.id).await?;
        let (day_start, day_end) = utc_day_bounds(session.started_at);
        let same_day = self
            .targets
            .for_rep_between(&session.rep_id, day_start, day_end)
            .await?;

        let mut associated: HashMap<String, VisitTarget> = HashMap::new();
        for target in same_day {
            if target
                .tracking_id
                .as_deref()
                .is_some_and(|id| id != session.id)
            {
                continue;
            }
            associated.insert(target.id.clone(), target);
        }
        for target in linked {
            associated.insert(target.id.clone(), target);
        }

        let mut targets: Vec<VisitTarget> = associated.into_values().collect();
        // Most recently completed first; open targets fall back to their
        // last modification. Id tiebreak keeps the order deterministic.
        targets.sort_by(|a, b| {
            let a_at = a.completed_at.unwrap_or(a.updated_at);
            let b_at = b.completed_at.unwrap_or(b.updated_at);
            b_at.cmp(&a_at).then_with(|| a.id.cmp(&b.id))
        });

        let estimated_km: f64 = targets.iter().map(|t| t.estimated_or_zero()).sum();
        let actual_km: f64 = targets.iter().map(|t| t.actual_or_zero()).sum();

        let visited_area_images: Vec<String> = targets
            .iter()
            .filter_map(|t| t.visited_area_photo.clone())
            .filter(|p| !p.is_empty())
            .collect();

        let primary_visited_area_image = visited_area_images.first().cloned().or_else(|| {
            session
                .visited_area_photo
                .clone()
                .filter(|p| !p.is_empty())
        });

        tracing::debug!(
            session_id = %session.id,
            visit_count = targets.len(),
            "Assembled shift summary"
        );

        Ok(ShiftSummary {
            visit_count: targets.len(),
            estimated_km,
            actual_km,
            visited_area_images,
            primary_visited_area_image,
        })
    }
}
