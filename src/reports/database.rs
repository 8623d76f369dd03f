// src/reports/database.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{PetSource, ReportSource, ReportWriter};
use crate::db::PgPool;
use crate::models::{GeoReport, NewReport, Pet, PetId, ReportAuthor, ReportId, ReportType, UserId};

// Every active report, newest first, with the author's contact details
const ACTIVE_REPORTS_SQL: &str = "
    SELECT
        r.id, r.title, r.description, r.type,
        r.location_lat, r.location_lng, r.photos, r.reward_amount, r.created_at,
        u.full_name, u.phone, (u.id IS NOT NULL) AS has_author
    FROM
        reports r
        LEFT JOIN users u ON u.id = r.user_id
    WHERE
        r.is_active = true
    ORDER BY
        r.created_at DESC
";

const INSERT_REPORT_SQL: &str = "
    WITH inserted AS (
        INSERT INTO reports
            (user_id, title, description, type, location_lat, location_lng,
             photos, reward_amount, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, true, $9)
        RETURNING *
    )
    SELECT
        r.id, r.title, r.description, r.type,
        r.location_lat, r.location_lng, r.photos, r.reward_amount, r.created_at,
        u.full_name, u.phone, (u.id IS NOT NULL) AS has_author
    FROM
        inserted r
        LEFT JOIN users u ON u.id = r.user_id
";

const USER_PETS_SQL: &str = "
    SELECT id, user_id, name, species, breed, created_at
    FROM pets
    WHERE user_id = $1
    ORDER BY created_at DESC
";

/// Report, writer and pet access over the backend's Postgres tables.
///
/// Built once at startup and shared through `Arc`.
#[derive(Clone)]
pub struct PgReportBackend {
    pool: PgPool,
}

impl PgReportBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn report_from_row(row: &Row) -> Result<GeoReport> {
    let id: Uuid = row.try_get("id").context("report.id")?;
    let report_type: String = row.try_get("type").context("report.type")?;
    let photos: Option<Vec<String>> = row.try_get("photos").context("report.photos")?;
    let has_author: bool = row.try_get("has_author").context("report author join")?;

    let author = if has_author {
        Some(ReportAuthor {
            full_name: row.try_get("full_name").context("users.full_name")?,
            phone: row.try_get("phone").context("users.phone")?,
        })
    } else {
        None
    };

    Ok(GeoReport {
        id: ReportId(id),
        title: row.try_get("title").context("report.title")?,
        description: row.try_get("description").context("report.description")?,
        report_type: ReportType::from(report_type),
        location_lat: row.try_get("location_lat").context("report.location_lat")?,
        location_lng: row.try_get("location_lng").context("report.location_lng")?,
        photos: photos.unwrap_or_default(),
        reward_amount: row
            .try_get::<_, Option<Decimal>>("reward_amount")
            .context("report.reward_amount")?,
        created_at: row
            .try_get::<_, DateTime<Utc>>("created_at")
            .context("report.created_at")?,
        author,
    })
}

fn pet_from_row(row: &Row) -> Result<Pet> {
    Ok(Pet {
        id: PetId(row.try_get("id").context("pet.id")?),
        user_id: UserId(row.try_get("user_id").context("pet.user_id")?),
        name: row.try_get("name").context("pet.name")?,
        species: row.try_get("species").context("pet.species")?,
        breed: row.try_get("breed").context("pet.breed")?,
        created_at: row.try_get("created_at").context("pet.created_at")?,
    })
}

#[async_trait]
impl ReportSource for PgReportBackend {
    async fn fetch_active_reports(&self) -> Result<Vec<GeoReport>> {
        let conn = self
            .pool
            .get()
            .await
            .context("Reports: DB conn for active reports")?;

        debug!("Executing query for active reports.");
        let rows = conn
            .query(ACTIVE_REPORTS_SQL, &[])
            .await
            .context("Failed to query active reports")?;

        rows.iter().map(report_from_row).collect()
    }
}

#[async_trait]
impl ReportWriter for PgReportBackend {
    async fn create_report(&self, report: NewReport) -> Result<GeoReport> {
        let conn = self
            .pool
            .get()
            .await
            .context("Reports: DB conn for report insert")?;

        let now = Utc::now();
        let report_type = report.report_type.as_str().to_string();
        let row = conn
            .query_one(
                INSERT_REPORT_SQL,
                &[
                    &report.user_id.0,
                    &report.title,
                    &report.description,
                    &report_type,
                    &report.location.latitude,
                    &report.location.longitude,
                    &report.photos,
                    &report.reward_amount,
                    &now,
                ],
            )
            .await
            .context("Failed to insert report")?;

        let created = report_from_row(&row)?;
        debug!("Created report {} for user {}", created.id, report.user_id);
        Ok(created)
    }
}

#[async_trait]
impl PetSource for PgReportBackend {
    async fn fetch_user_pets(&self, user_id: UserId) -> Result<Vec<Pet>> {
        let conn = self
            .pool
            .get()
            .await
            .context("Pets: DB conn for user pets")?;

        let rows = conn
            .query(USER_PETS_SQL, &[&user_id.0])
            .await
            .with_context(|| format!("Failed to query pets for user {}", user_id))?;

        rows.iter().map(pet_from_row).collect()
    }
}
