//! Great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, south negative. Valid range `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, west negative. Valid range `[-180, 180]`.
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` if both components are finite and within range.
    ///
    /// [`distance_meters`] accepts any finite input; callers feeding device
    /// locations in are expected to reject invalid coordinates upstream.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Haversine distance between two coordinates, rounded to whole meters.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn distance_meters(origin: Coordinate, target: Coordinate) -> u32 {
    let phi1 = origin.latitude.to_radians();
    let phi2 = target.latitude.to_radians();
    let delta_phi = (target.latitude - origin.latitude).to_radians();
    let delta_lambda = (target.longitude - origin.longitude).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_M * c).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOSCOW_CENTER: Coordinate = Coordinate {
        latitude: 55.7558,
        longitude: 37.6173,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_meters(MOSCOW_CENTER, MOSCOW_CENTER), 0);
        let south = Coordinate::new(-33.8688, 151.2093);
        assert_eq!(distance_meters(south, south), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let berlin = Coordinate::new(52.5200, 13.4050);
        let paris = Coordinate::new(48.8566, 2.3522);
        assert_eq!(
            distance_meters(berlin, paris),
            distance_meters(paris, berlin)
        );
    }

    #[test]
    fn moscow_block_east_is_about_626_meters() {
        let target = Coordinate::new(55.7558, 37.6273);
        let distance = distance_meters(MOSCOW_CENTER, target);
        assert!(
            (621..=631).contains(&distance),
            "expected ~626 m, got {distance}"
        );
    }

    #[test]
    fn berlin_to_paris_is_about_878_km() {
        let berlin = Coordinate::new(52.5200, 13.4050);
        let paris = Coordinate::new(48.8566, 2.3522);
        let distance = distance_meters(berlin, paris);
        assert!(
            (868_000..=888_000).contains(&distance),
            "expected ~878 km, got {distance} m"
        );
    }

    #[test]
    fn valid_coordinate_ranges() {
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.1, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }
}
