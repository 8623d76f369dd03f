// src/lib.rs
pub mod config;
pub mod db;
pub mod errors;
pub mod geo;
pub mod models;
pub mod reports;

// Re-export common types for easier access
pub use errors::MalformedCoordinate;
pub use geo::{distance_km, filter_nearby, partition_nearby, Coordinate, Geotagged, ProximityQuery};
pub use models::{GeoReport, NewReport, Pet, PetId, ReportId, ReportTally, ReportType, UserId};

// Re-export important functionality
pub use db::PgPool;
pub use reports::{NearbyReports, PetSource, ReportSource, ReportWriter};
