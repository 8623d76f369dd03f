// src/reports/memory.rs

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PetSource, ReportSource, ReportWriter};
use crate::geo::Coordinate;
use crate::models::{GeoReport, NewReport, Pet, ReportAuthor, ReportId, ReportType, UserId};

#[derive(Debug, Clone)]
struct StoredReport {
    report: GeoReport,
    is_active: bool,
}

/// Process-local backend holding reports, users and pets in memory.
///
/// Mirrors the ordering, activity and author-join rules of the Postgres backend.
#[derive(Debug, Default)]
pub struct InMemoryReportBackend {
    reports: RwLock<Vec<StoredReport>>,
    users: RwLock<HashMap<UserId, ReportAuthor>>,
    pets: RwLock<Vec<Pet>>,
}

impl InMemoryReportBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backend with reports; all are active.
    pub fn with_reports(reports: Vec<GeoReport>) -> Self {
        let stored = reports
            .into_iter()
            .map(|report| StoredReport {
                report,
                is_active: true,
            })
            .collect();
        Self {
            reports: RwLock::new(stored),
            ..Self::default()
        }
    }

    /// Backend seeded with [`Self::demo_reports`].
    pub fn demo_around(center: Coordinate) -> Self {
        Self::with_reports(Self::demo_reports(center))
    }

    /// Three reports a few hundred meters from `center`, newest first. Shown
    /// in offline mode and when the real backend cannot be reached.
    pub fn demo_reports(center: Coordinate) -> Vec<GeoReport> {
        let now = Utc::now();
        let demo = |title: &str,
                    description: &str,
                    report_type: ReportType,
                    dlat: f64,
                    dlng: f64,
                    reward: Option<i64>,
                    name: &str,
                    phone: &str,
                    photo: &str,
                    minutes_ago: i64| GeoReport {
            id: ReportId(Uuid::new_v4()),
            title: title.to_string(),
            description: Some(description.to_string()),
            report_type,
            location_lat: Some(center.latitude + dlat),
            location_lng: Some(center.longitude + dlng),
            photos: vec![photo.to_string()],
            reward_amount: reward.map(rust_decimal::Decimal::from),
            created_at: now - Duration::minutes(minutes_ago),
            author: Some(ReportAuthor {
                full_name: Some(name.to_string()),
                phone: Some(phone.to_string()),
            }),
        };

        vec![
            demo(
                "Golden retriever lost",
                "Lost near the park on Sunday. Very friendly, answers to Max.",
                ReportType::Lost,
                0.002,
                0.002,
                Some(5000),
                "María García",
                "11-1234-5678",
                "https://images.unsplash.com/photo-1552053831-71594a27632d?w=400",
                0,
            ),
            demo(
                "Kitten found",
                "Found this kitten on the street. Healthy and looking for its family.",
                ReportType::Found,
                -0.003,
                0.001,
                None,
                "Juan Pérez",
                "11-8765-4321",
                "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?w=400",
                5,
            ),
            demo(
                "Beagle lost",
                "Luna got away during the morning walk. Wears a pink collar.",
                ReportType::Lost,
                0.001,
                -0.002,
                Some(8000),
                "Ana López",
                "11-5555-9999",
                "https://images.unsplash.com/photo-1544717297-fa95b6ee9643?w=400",
                10,
            ),
        ]
    }

    /// Registers the profile joined onto reports created by `user_id`.
    pub async fn add_user(&self, user_id: UserId, author: ReportAuthor) {
        self.users.write().await.insert(user_id, author);
    }

    pub async fn add_pet(&self, pet: Pet) {
        self.pets.write().await.push(pet);
    }

    /// Marks a report inactive so it no longer appears in
    /// [`ReportSource::fetch_active_reports`]. Returns whether it was found.
    pub async fn deactivate(&self, id: ReportId) -> bool {
        let mut reports = self.reports.write().await;
        match reports.iter_mut().find(|s| s.report.id == id) {
            Some(stored) => {
                stored.is_active = false;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ReportSource for InMemoryReportBackend {
    async fn fetch_active_reports(&self) -> Result<Vec<GeoReport>> {
        let reports = self.reports.read().await;
        let mut active: Vec<GeoReport> = reports
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.report.clone())
            .collect();
        // Stable sort keeps insertion order among equal timestamps
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }
}

#[async_trait]
impl ReportWriter for InMemoryReportBackend {
    async fn create_report(&self, report: NewReport) -> Result<GeoReport> {
        // Unknown users leave the author empty, like the LEFT JOIN
        let author = self.users.read().await.get(&report.user_id).cloned();
        let created = GeoReport {
            id: ReportId(Uuid::new_v4()),
            title: report.title,
            description: report.description,
            report_type: report.report_type,
            location_lat: Some(report.location.latitude),
            location_lng: Some(report.location.longitude),
            photos: report.photos,
            reward_amount: report.reward_amount,
            created_at: Utc::now(),
            author,
        };
        self.reports.write().await.push(StoredReport {
            report: created.clone(),
            is_active: true,
        });
        Ok(created)
    }
}

#[async_trait]
impl PetSource for InMemoryReportBackend {
    async fn fetch_user_pets(&self, user_id: UserId) -> Result<Vec<Pet>> {
        let pets = self.pets.read().await;
        let mut owned: Vec<Pet> = pets
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
