// src/config.rs

use anyhow::{Context, Result};
use log::info;

use crate::geo::{Coordinate, ProximityQuery};

/// Mean Earth radius used by the haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Search radius used when the caller does not supply one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

// Buenos Aires; used when the device location cannot be obtained
pub const FALLBACK_CENTER: Coordinate = Coordinate {
    latitude: -34.6037,
    longitude: -58.3816,
};

pub const ENV_CENTER_LAT: &str = "PETALERT_CENTER_LAT";
pub const ENV_CENTER_LNG: &str = "PETALERT_CENTER_LNG";
pub const ENV_RADIUS_KM: &str = "PETALERT_RADIUS_KM";
pub const ENV_OFFLINE: &str = "PETALERT_OFFLINE";

/// Settings for a single nearby-reports lookup, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub center: Coordinate,
    pub radius_km: f64,
    /// Use the in-memory demo backend instead of Postgres.
    pub offline: bool,
}

impl SearchConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be exercised
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lat = parse_optional_f64(&lookup, ENV_CENTER_LAT)?;
        let lng = parse_optional_f64(&lookup, ENV_CENTER_LNG)?;

        let center = match (lat, lng) {
            (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude),
            (None, None) => {
                info!(
                    "No search center configured, falling back to ({}, {})",
                    FALLBACK_CENTER.latitude, FALLBACK_CENTER.longitude
                );
                FALLBACK_CENTER
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "{} and {} must be set together",
                    ENV_CENTER_LAT,
                    ENV_CENTER_LNG
                ))
            }
        };

        let radius_km = parse_optional_f64(&lookup, ENV_RADIUS_KM)?.unwrap_or(DEFAULT_RADIUS_KM);

        let offline = lookup(ENV_OFFLINE)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            center,
            radius_km,
            offline,
        })
    }

    pub fn query(&self) -> ProximityQuery {
        ProximityQuery::new(self.center, self.radius_km)
    }
}

fn parse_optional_f64<F>(lookup: &F, key: &str) -> Result<Option<f64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .with_context(|| format!("{} is not a number: {:?}", key, raw)),
        _ => Ok(None),
    }
}
