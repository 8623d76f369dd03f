// src/geo/distance.rs
//
// Great-circle distance on a spherical Earth

use super::Coordinate;
use crate::config::EARTH_RADIUS_KM;

/// Calculate the Haversine distance between two points in kilometers.
///
/// Uses a sphere of radius [`EARTH_RADIUS_KM`], not the WGS-84 ellipsoid.
/// Inputs are not range-checked and the intermediate `a` term is not clamped,
/// so near-antipodal points see the raw floating-point result.
pub fn distance_km(point_a: Coordinate, point_b: Coordinate) -> f64 {
    // Convert degrees to radians
    let lat1_rad = point_a.latitude.to_radians();
    let lat2_rad = point_b.latitude.to_radians();

    let dlat = (point_b.latitude - point_a.latitude).to_radians();
    let dlon = (point_b.longitude - point_a.longitude).to_radians();

    // Haversine formula
    let a =
        (dlat / 2.0).sin().powi(2) + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} +/- {}, got {}",
            expected,
            tolerance,
            actual
        );
    }

    #[test]
    fn test_coincident_points_are_zero() {
        for point in [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(-34.6037, -58.3816),
            Coordinate::new(90.0, 0.0),
            Coordinate::new(-90.0, 180.0),
            Coordinate::new(12.5, -179.999),
        ] {
            assert_eq!(distance_km(point, point), 0.0);
        }
    }

    #[test]
    fn test_one_degree_along_equator() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert_close(d, 111.19, 0.5);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (Coordinate::new(51.5074, -0.1278), Coordinate::new(48.8566, 2.3522)),
            (Coordinate::new(-34.6037, -58.3816), Coordinate::new(-33.4489, -70.6693)),
            (Coordinate::new(10.0, 179.5), Coordinate::new(-10.0, -179.5)),
            (Coordinate::new(89.9, 0.0), Coordinate::new(89.9, 180.0)),
        ];
        for (a, b) in pairs {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            assert!((ab - ba).abs() <= 1e-9 * ab.abs().max(1.0), "{} vs {}", ab, ba);
        }
    }

    #[test]
    fn test_london_to_paris() {
        let d = distance_km(
            Coordinate::new(51.5074, -0.1278),
            Coordinate::new(48.8566, 2.3522),
        );
        assert_close(d, 343.5, 1.0);
    }

    #[test]
    fn test_across_antimeridian_is_short() {
        // 0.2 degrees of longitude on the equator, wrapping through 180
        let d = distance_km(Coordinate::new(0.0, 179.9), Coordinate::new(0.0, -179.9));
        assert_close(d, 22.24, 0.1);
    }

    #[test]
    fn test_pole_to_pole_is_half_circumference() {
        let d = distance_km(Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0));
        assert_close(d, std::f64::consts::PI * EARTH_RADIUS_KM, 1e-6);
    }

    #[test]
    fn test_nan_input_does_not_panic() {
        let d = distance_km(Coordinate::new(f64::NAN, 0.0), Coordinate::new(0.0, 0.0));
        assert!(d.is_nan());
    }

    #[test]
    fn test_agrees_with_geo_crate() {
        use ::geo::{HaversineDistance, Point};

        let a = Coordinate::new(-34.6037, -58.3816);
        let b = Coordinate::new(-34.9214, -57.9545);
        // geo works in meters on a slightly larger mean radius
        let reference_km = Point::new(a.longitude, a.latitude)
            .haversine_distance(&Point::new(b.longitude, b.latitude))
            / 1000.0;
        assert_close(distance_km(a, b), reference_km, 0.01);
    }
}
