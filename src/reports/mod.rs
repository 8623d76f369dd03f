// src/reports/mod.rs

mod database;
mod memory;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::geo::{partition_nearby, ProximityQuery};
use crate::models::{GeoReport, NewReport, Pet, UserId};

pub use database::PgReportBackend;
pub use memory::InMemoryReportBackend;

/// Supplies every active report, newest first.
///
/// The result is the full candidate set; no spatial pre-filtering happens here.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_active_reports(&self) -> Result<Vec<GeoReport>>;
}

#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Stores a new active report stamped with the current time.
    async fn create_report(&self, report: NewReport) -> Result<GeoReport>;
}

#[async_trait]
pub trait PetSource: Send + Sync {
    /// Pets registered by `user_id`, newest first.
    async fn fetch_user_pets(&self, user_id: UserId) -> Result<Vec<Pet>>;
}

/// Nearby-reports lookup over an injected [`ReportSource`].
pub struct NearbyReports<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for NearbyReports<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: ReportSource + ?Sized> NearbyReports<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetches all active reports and keeps those within the query radius,
    /// in the order the source returned them.
    pub async fn get_nearby_reports(&self, query: &ProximityQuery) -> Result<Vec<GeoReport>> {
        let start = Instant::now();
        let candidates = self
            .source
            .fetch_active_reports()
            .await
            .context("Failed to fetch active reports")?;

        let outcome = partition_nearby(&candidates, query.center, query.radius_km);
        if !outcome.is_clean() {
            warn!(
                "{} of {} active reports have no usable location and were skipped",
                outcome.malformed.len(),
                candidates.len()
            );
            for e in &outcome.malformed {
                warn!("  {}", e);
            }
        }

        let nearby: Vec<GeoReport> = outcome.nearby.into_iter().cloned().collect();
        info!(
            "Found {} reports within {} km of ({}, {}) out of {} active in {:.2?}",
            nearby.len(),
            query.radius_km,
            query.center.latitude,
            query.center.longitude,
            candidates.len(),
            start.elapsed()
        );
        Ok(nearby)
    }

    /// Like [`Self::get_nearby_reports`], but a failed lookup is logged and
    /// answered with the demo reports around the query center.
    pub async fn get_nearby_reports_or_demo(
        &self,
        query: &ProximityQuery,
    ) -> Result<Vec<GeoReport>> {
        match self.get_nearby_reports(query).await {
            Ok(reports) => Ok(reports),
            Err(e) => {
                warn!("Report lookup failed, falling back to demo reports: {:#}", e);
                demo_nearby_reports(query).await
            }
        }
    }
}

/// Nearby lookup over [`InMemoryReportBackend::demo_reports`] around the
/// query center.
pub async fn demo_nearby_reports(query: &ProximityQuery) -> Result<Vec<GeoReport>> {
    let backend = Arc::new(InMemoryReportBackend::demo_around(query.center));
    NearbyReports::new(backend).get_nearby_reports(query).await
}
