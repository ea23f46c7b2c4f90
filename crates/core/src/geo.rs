//! Rough travel-time estimate from a visitor's position to the dealership.
//!
//! Purely cosmetic: great-circle distance scaled by a road detour factor and
//! divided by an average road speed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Ratio of road distance to straight-line distance.
pub const ROAD_DETOUR_FACTOR: f64 = 1.3;

/// Average road speed used for the estimate.
pub const AVERAGE_SPEED_KMH: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::Validation(format!(
                "Latitude {lat} is out of range [-90, 90]"
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::Validation(format!(
                "Longitude {lng} is out of range [-180, 180]"
            )));
        }
        Ok(Self { lat, lng })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TravelEstimate {
    /// Estimated road distance, rounded to one decimal.
    pub distance_km: f64,
    /// Estimated driving time in whole minutes (at least 1).
    pub minutes: u32,
}

/// Great-circle distance between two points.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

pub fn estimate_travel(from: Coordinates, to: Coordinates) -> TravelEstimate {
    let road_km = haversine_km(from, to) * ROAD_DETOUR_FACTOR;
    let minutes = (road_km / AVERAGE_SPEED_KMH * 60.0).ceil().max(1.0) as u32;
    TravelEstimate {
        distance_km: (road_km * 10.0).round() / 10.0,
        minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Coordinates {
        Coordinates::new(48.8566, 2.3522).unwrap()
    }

    fn lyon() -> Coordinates {
        Coordinates::new(45.7640, 4.8357).unwrap()
    }

    #[test]
    fn haversine_paris_lyon() {
        let d = haversine_km(paris(), lyon());
        assert!((d - 392.0).abs() < 5.0, "unexpected distance {d}");
    }

    #[test]
    fn same_point_is_one_minute() {
        let est = estimate_travel(paris(), paris());
        assert_eq!(est.distance_km, 0.0);
        assert_eq!(est.minutes, 1);
    }

    #[test]
    fn estimate_applies_detour_and_speed() {
        let est = estimate_travel(paris(), lyon());
        // ~392 km * 1.3 = ~510 km at 60 km/h = ~510 minutes.
        assert!((est.distance_km - 510.0).abs() < 10.0);
        assert!((500..=520).contains(&est.minutes));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }
}
