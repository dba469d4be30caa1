// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance math shared by the proximity and summary services.
//!
//! All coordinates are WGS84 degrees; distances are kilometers.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points using the Haversine formula.
///
/// Computed at full double precision; use [`round_km`] only at display
/// boundaries.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to 2 decimal places (10 m resolution) for display.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_km(28.6139, 77.2090, 28.6139, 77.2090), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_km(28.6139, 77.2090, 28.7041, 77.1025);
        let d2 = haversine_km(28.7041, 77.1025, 28.6139, 77.2090);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_known_value_delhi() {
        // Connaught Place to Pitampura, central Delhi
        let d = haversine_km(28.6139, 77.2090, 28.7041, 77.1025);
        assert!(approx_eq(d, 14.44, 0.2), "got {}", d);
    }

    #[test]
    fn test_known_value_london_paris() {
        let d = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(approx_eq(d, 343.56, 1.0), "got {}", d);
    }

    #[test]
    fn test_short_distance() {
        // ~500 m due north (0.004491 deg of latitude)
        let d = haversine_km(28.6139, 77.2090, 28.618391, 77.2090);
        assert!(approx_eq(d, 0.4994, 0.005), "got {}", d);
    }

    #[test]
    fn test_crosses_equator_and_meridian() {
        let d = haversine_km(-1.0, -1.0, 1.0, 1.0);
        assert!(d > 0.0);
        assert!(approx_eq(d, haversine_km(1.0, 1.0, -1.0, -1.0), 1e-12));
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(14.44231), 14.44);
        assert_eq!(round_km(0.005), 0.01);
        assert_eq!(round_km(0.0), 0.0);
    }
}
