// src/models.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::MalformedCoordinate;
use crate::geo::{coordinate_from_parts, Coordinate, Geotagged};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetId(pub Uuid);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a report is about a pet someone lost or one someone found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ReportType {
    Lost,
    Found,
    /// Any value the backend holds that this client does not know about.
    Other(String),
}

impl ReportType {
    pub fn as_str(&self) -> &str {
        match self {
            ReportType::Lost => "lost",
            ReportType::Found => "found",
            ReportType::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for ReportType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "lost" => ReportType::Lost,
            "found" => ReportType::Found,
            _ => ReportType::Other(s),
        }
    }
}

impl From<&str> for ReportType {
    fn from(s: &str) -> Self {
        ReportType::from(s.to_string())
    }
}

impl From<ReportType> for String {
    fn from(t: ReportType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact details joined in from the `users` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportAuthor {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// A single lost/found posting.
///
/// Only `location_lat`/`location_lng` are read by the proximity filter;
/// everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoReport {
    pub id: ReportId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub photos: Vec<String>,
    pub reward_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "users")]
    pub author: Option<ReportAuthor>,
}

impl Geotagged for GeoReport {
    fn tag_id(&self) -> String {
        self.id.to_string()
    }

    fn coordinate(&self) -> Result<Coordinate, MalformedCoordinate> {
        coordinate_from_parts(&self.id.to_string(), self.location_lat, self.location_lng)
    }
}

/// Payload for creating a report. The stored row is always active and
/// stamped with the insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub report_type: ReportType,
    pub location: Coordinate,
    pub photos: Vec<String>,
    pub reward_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub user_id: UserId,
    pub name: String,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Lost/found counters shown alongside the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTally {
    pub lost: usize,
    pub found: usize,
    pub other: usize,
}

impl ReportTally {
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a GeoReport>,
    {
        let mut tally = Self::default();
        for report in reports {
            match report.report_type {
                ReportType::Lost => tally.lost += 1,
                ReportType::Found => tally.found += 1,
                ReportType::Other(_) => tally.other += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.lost + self.found + self.other
    }
}
