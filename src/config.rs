//! Tracking-core configuration loaded from environment variables.
//!
//! Every knob has a safe default, so a bare environment is fully usable
//! (and is exactly what the test suites run with).

use std::env;

/// Default online-classification window for the live roster, in minutes.
pub const DEFAULT_ONLINE_WINDOW_MINUTES: f64 = 5.0;

/// Default visit-target completion radius, in meters.
pub const DEFAULT_COMPLETION_RADIUS_M: f64 = 100.0;

/// Tunables for the tracking core, loaded once at startup.
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// How recently a representative must have reported a position to be
    /// classified online in the live roster.
    pub online_window_minutes: f64,
    /// Completion radius applied to targets whose stored radius is missing
    /// or unusable.
    pub default_completion_radius_m: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            online_window_minutes: DEFAULT_ONLINE_WINDOW_MINUTES,
            default_completion_radius_m: DEFAULT_COMPLETION_RADIUS_M,
        }
    }
}

impl TrackingConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults rather than
    /// failing startup; a misconfigured window must never take the tracking
    /// core down.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            online_window_minutes: env_f64(
                "FIELDREP_ONLINE_WINDOW_MINUTES",
                DEFAULT_ONLINE_WINDOW_MINUTES,
            ),
            default_completion_radius_m: env_f64(
                "FIELDREP_COMPLETION_RADIUS_M",
                DEFAULT_COMPLETION_RADIUS_M,
            ),
        }
    }
}

/// Read a positive, finite f64 from the environment, or fall back.
fn env_f64(name: &str, default: f64) -> f64 {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                tracing::warn!(var = name, value = %raw, "Ignoring unusable config value");
                default
            }
        },
        Err(_) => default,
    }
}
