// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live roster aggregation: where every rep last was, and who is online.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::TrackingConfig;
use crate::error::Result;
use crate::models::LiveLocation;
use crate::store::{LocationStore, RepDirectory};

/// One representative's row in the live roster.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub rep_id: String,
    pub display_name: String,
    /// Latest observation, if the rep has ever reported one
    pub latest: Option<LiveLocation>,
    /// Milliseconds since the latest observation
    pub last_seen_ms: Option<i64>,
    pub is_online: bool,
}

/// The assembled roster.
#[derive(Debug, Clone, Serialize)]
pub struct LiveRoster {
    /// Entries ordered by display name, rep id as tiebreak
    pub reps: Vec<RosterEntry>,
    pub online_count: usize,
}

/// Number of entries classified online.
pub fn online_count(entries: &[RosterEntry]) -> usize {
    entries.iter().filter(|e| e.is_online).count()
}

/// Roster service.
pub struct RosterService {
    reps: Arc<dyn RepDirectory>,
    locations: Arc<dyn LocationStore>,
    config: TrackingConfig,
}

impl RosterService {
    pub fn new(
        reps: Arc<dyn RepDirectory>,
        locations: Arc<dyn LocationStore>,
        config: TrackingConfig,
    ) -> Self {
        Self {
            reps,
            locations,
            config,
        }
    }

    /// Assemble the roster as of now.
    pub async fn live_roster(&self, window_minutes: Option<f64>) -> Result<LiveRoster> {
        self.live_roster_at(window_minutes, Utc::now()).await
    }

    /// Assemble the roster against an explicit reference instant.
    ///
    /// One instant classifies every entry, so two reps with identical
    /// observation times always land on the same side of the window. A rep
    /// whose latest observation is exactly the window old counts as online.
    pub async fn live_roster_at(
        &self,
        window_minutes: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<LiveRoster> {
        let window = effective_window(window_minutes, self.config.online_window_minutes);
        let window_ms = (window * 60_000.0).round() as i64;

        let mut latest = self.locations.latest_per_rep().await?;

        // Every directory rep gets a row; reps without history show offline.
        let mut entries = Vec::new();
        for rep in self.reps.all().await? {
            let latest_loc: Option<LiveLocation> = latest.remove(&rep.id);
            let last_seen_ms = latest_loc
                .as_ref()
                .map(|l| (now - l.observed_at).num_milliseconds());
            let is_online = last_seen_ms.is_some_and(|ms| ms <= window_ms);
            entries.push(RosterEntry {
                rep_id: rep.id,
                display_name: rep.display_name,
                latest: latest_loc,
                last_seen_ms,
                is_online,
            });
        }

        entries.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.rep_id.cmp(&b.rep_id))
        });

        let online = online_count(&entries);
        tracing::debug!(
            total = entries.len(),
            online,
            window_minutes = window,
            "Assembled live roster"
        );

        Ok(LiveRoster {
            reps: entries,
            online_count: online,
        })
    }
}

/// Requested window when it is usable; the configured default otherwise.
fn effective_window(requested: Option<f64>, default_minutes: f64) -> f64 {
    requested
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(default_minutes)
}
