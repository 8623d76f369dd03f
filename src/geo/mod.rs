// src/geo/mod.rs

mod distance;
mod proximity;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_RADIUS_KM;
use crate::errors::MalformedCoordinate;

pub use distance::distance_km;
pub use proximity::{filter_nearby, partition_nearby, ProximityOutcome};

/// A point in degrees. Expected domain is latitude in [-90, 90] and
/// longitude in [-180, 180]; nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Center plus radius for one nearby-reports lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityQuery {
    pub center: Coordinate,
    pub radius_km: f64,
}

impl ProximityQuery {
    pub fn new(center: Coordinate, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// Query with the default search radius.
    pub fn around(center: Coordinate) -> Self {
        Self::new(center, DEFAULT_RADIUS_KM)
    }

    pub fn filter<'a, R: Geotagged>(&self, candidates: &'a [R]) -> Vec<&'a R> {
        filter_nearby(candidates, self.center, self.radius_km)
    }
}

/// Records that carry a location the proximity filter can read.
pub trait Geotagged {
    /// Identity used in diagnostics only.
    fn tag_id(&self) -> String;

    fn coordinate(&self) -> Result<Coordinate, MalformedCoordinate>;
}

impl Geotagged for Coordinate {
    fn tag_id(&self) -> String {
        format!("({}, {})", self.latitude, self.longitude)
    }

    fn coordinate(&self) -> Result<Coordinate, MalformedCoordinate> {
        Ok(*self)
    }
}

/// Validates a pair of optional raw degree values into a [`Coordinate`].
pub fn coordinate_from_parts(
    report_id: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Coordinate, MalformedCoordinate> {
    let latitude = latitude.ok_or_else(|| MalformedCoordinate::MissingLatitude {
        report_id: report_id.to_string(),
    })?;
    let longitude = longitude.ok_or_else(|| MalformedCoordinate::MissingLongitude {
        report_id: report_id.to_string(),
    })?;
    if !latitude.is_finite() {
        return Err(MalformedCoordinate::NonFiniteLatitude {
            report_id: report_id.to_string(),
            value: latitude,
        });
    }
    if !longitude.is_finite() {
        return Err(MalformedCoordinate::NonFiniteLongitude {
            report_id: report_id.to_string(),
            value: longitude,
        });
    }
    Ok(Coordinate::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_uses_default_radius() {
        let q = ProximityQuery::around(Coordinate::new(1.0, 2.0));
        assert_eq!(q.radius_km, 10.0);

        let points = [Coordinate::new(1.0, 2.05), Coordinate::new(1.0, 2.2)];
        assert_eq!(q.filter(&points), vec![&points[0]]);
    }

    #[test]
    fn test_coordinate_from_parts() {
        assert_eq!(
            coordinate_from_parts("r1", Some(1.5), Some(-2.5)),
            Ok(Coordinate::new(1.5, -2.5))
        );
        assert!(matches!(
            coordinate_from_parts("r1", None, Some(1.0)),
            Err(MalformedCoordinate::MissingLatitude { .. })
        ));
        assert!(matches!(
            coordinate_from_parts("r1", Some(1.0), None),
            Err(MalformedCoordinate::MissingLongitude { .. })
        ));
        assert!(matches!(
            coordinate_from_parts("r1", Some(f64::INFINITY), Some(1.0)),
            Err(MalformedCoordinate::NonFiniteLatitude { .. })
        ));
        let err = coordinate_from_parts("r2", Some(1.0), Some(f64::NAN)).unwrap_err();
        assert_eq!(err.report_id(), "r2");
    }
}
