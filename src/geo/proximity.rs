// src/geo/proximity.rs
//
// Radius selection over an already-fetched candidate list

use log::{debug, log_enabled, trace, warn, Level};

use super::{distance_km, Coordinate, Geotagged};
use crate::errors::MalformedCoordinate;

/// Result of [`partition_nearby`]: the retained candidates in input order,
/// and one error per candidate that had no usable coordinate.
#[derive(Debug)]
pub struct ProximityOutcome<'a, R> {
    pub nearby: Vec<&'a R>,
    pub malformed: Vec<MalformedCoordinate>,
}

impl<'a, R> ProximityOutcome<'a, R> {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Select the candidates within `radius_km` of `center`, and report the ones
/// whose coordinate could not be read.
///
/// The boundary is inclusive. Retained candidates keep their input order;
/// nothing is re-sorted by distance. A NaN or negative radius selects nothing.
pub fn partition_nearby<'a, R: Geotagged>(
    candidates: &'a [R],
    center: Coordinate,
    radius_km: f64,
) -> ProximityOutcome<'a, R> {
    let mut nearby = Vec::new();
    let mut malformed = Vec::new();

    for candidate in candidates {
        match candidate.coordinate() {
            Ok(point) => {
                let distance = distance_km(center, point);
                if log_enabled!(Level::Trace) {
                    trace!("{} is {:.3} km from center", candidate.tag_id(), distance);
                }
                if distance <= radius_km {
                    nearby.push(candidate);
                }
            }
            Err(e) => malformed.push(e),
        }
    }

    debug!(
        "Proximity filter: {} of {} candidates within {} km of ({}, {}), {} malformed",
        nearby.len(),
        candidates.len(),
        radius_km,
        center.latitude,
        center.longitude,
        malformed.len()
    );

    ProximityOutcome { nearby, malformed }
}

/// Select the candidates within `radius_km` of `center`.
///
/// Candidates without a usable coordinate are logged and skipped.
pub fn filter_nearby<'a, R: Geotagged>(
    candidates: &'a [R],
    center: Coordinate,
    radius_km: f64,
) -> Vec<&'a R> {
    let outcome = partition_nearby(candidates, center, radius_km);
    for e in &outcome.malformed {
        warn!("Skipping candidate in proximity filter: {}", e);
    }
    outcome.nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::coordinate_from_parts;

    #[derive(Debug, PartialEq)]
    struct Pin {
        id: &'static str,
        lat: Option<f64>,
        lng: Option<f64>,
    }

    impl Pin {
        fn at(id: &'static str, lat: f64, lng: f64) -> Self {
            Self {
                id,
                lat: Some(lat),
                lng: Some(lng),
            }
        }
    }

    impl Geotagged for Pin {
        fn tag_id(&self) -> String {
            self.id.to_string()
        }

        fn coordinate(&self) -> Result<Coordinate, MalformedCoordinate> {
            coordinate_from_parts(self.id, self.lat, self.lng)
        }
    }

    // Degrees of longitude on the equator that correspond to `km`
    fn lng_for_km(km: f64) -> f64 {
        km / crate::config::EARTH_RADIUS_KM * 180.0 / std::f64::consts::PI
    }

    const ORIGIN: Coordinate = Coordinate::new(0.0, 0.0);

    fn ids<'a>(pins: &[&'a Pin]) -> Vec<&'a str> {
        pins.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let pins: Vec<Pin> = Vec::new();
        assert!(filter_nearby(&pins, ORIGIN, 10.0).is_empty());
        assert!(filter_nearby(&pins, Coordinate::new(45.0, 45.0), 0.0).is_empty());
    }

    #[test]
    fn test_no_qualifying_candidates_is_not_an_error() {
        let pins = vec![Pin::at("far", 10.0, 10.0)];
        let outcome = partition_nearby(&pins, ORIGIN, 10.0);
        assert!(outcome.nearby.is_empty());
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_zero_radius_keeps_only_coincident() {
        let pins = vec![
            Pin::at("same", 0.0, 0.0),
            Pin::at("close", 0.0, 0.000001),
            Pin::at("same-again", 0.0, 0.0),
        ];
        assert_eq!(
            ids(&filter_nearby(&pins, ORIGIN, 0.0)),
            vec!["same", "same-again"]
        );
    }

    #[test]
    fn test_selects_within_radius_in_input_order() {
        let pins = vec![
            Pin::at("two", 0.0, lng_for_km(2.0)),
            Pin::at("eleven", 0.0, lng_for_km(11.0)),
            Pin::at("almost-ten", 0.0, lng_for_km(9.999)),
        ];
        assert_eq!(
            ids(&filter_nearby(&pins, ORIGIN, 10.0)),
            vec!["two", "almost-ten"]
        );
    }

    #[test]
    fn test_order_is_preserved_not_sorted_by_distance() {
        let pins = vec![
            Pin::at("c", 0.0, lng_for_km(5.0)),
            Pin::at("a", 0.0, lng_for_km(1.0)),
            Pin::at("b", 0.0, lng_for_km(3.0)),
        ];
        assert_eq!(ids(&filter_nearby(&pins, ORIGIN, 10.0)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let pin = Pin::at("edge", 0.0, lng_for_km(10.0));
        let d = distance_km(ORIGIN, pin.coordinate().unwrap());
        let pins = vec![pin];
        assert_eq!(filter_nearby(&pins, ORIGIN, d).len(), 1);
        assert!(filter_nearby(&pins, ORIGIN, d - 1e-9).is_empty());
    }

    #[test]
    fn test_malformed_candidates_are_skipped_and_reported() {
        let pins = vec![
            Pin {
                id: "no-lat",
                lat: None,
                lng: Some(0.0),
            },
            Pin::at("ok", 0.0, 0.0),
            Pin::at("nan", f64::NAN, 0.0),
        ];
        let outcome = partition_nearby(&pins, ORIGIN, 10.0);
        assert_eq!(ids(&outcome.nearby), vec!["ok"]);
        let bad: Vec<&str> = outcome.malformed.iter().map(|e| e.report_id()).collect();
        assert_eq!(bad, vec!["no-lat", "nan"]);

        assert_eq!(ids(&filter_nearby(&pins, ORIGIN, 20_000.0)), vec!["ok"]);
    }

    #[test]
    fn test_nan_or_negative_radius_selects_nothing() {
        let pins = vec![Pin::at("here", 0.0, 0.0)];
        assert!(filter_nearby(&pins, ORIGIN, f64::NAN).is_empty());
        assert!(filter_nearby(&pins, ORIGIN, -1.0).is_empty());
    }

    #[test]
    fn test_coordinates_are_geotagged() {
        let points = vec![Coordinate::new(0.0, 0.05), Coordinate::new(1.0, 1.0)];
        let kept = filter_nearby(&points, ORIGIN, 10.0);
        assert_eq!(kept, vec![&points[0]]);
    }
}
