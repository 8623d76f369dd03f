// src/errors.rs

use thiserror::Error;

/// A candidate whose coordinate cannot take part in a distance comparison.
///
/// Returned by [`crate::geo::Geotagged::coordinate`]; the proximity filter
/// skips such candidates rather than substituting a default location.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedCoordinate {
    #[error("report {report_id}: latitude is missing")]
    MissingLatitude { report_id: String },

    #[error("report {report_id}: longitude is missing")]
    MissingLongitude { report_id: String },

    #[error("report {report_id}: latitude is not a finite number ({value})")]
    NonFiniteLatitude { report_id: String, value: f64 },

    #[error("report {report_id}: longitude is not a finite number ({value})")]
    NonFiniteLongitude { report_id: String, value: f64 },
}

impl MalformedCoordinate {
    pub fn report_id(&self) -> &str {
        match self {
            Self::MissingLatitude { report_id }
            | Self::MissingLongitude { report_id }
            | Self::NonFiniteLatitude { report_id, .. }
            | Self::NonFiniteLongitude { report_id, .. } => report_id,
        }
    }
}
