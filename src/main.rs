// src/main.rs
use anyhow::{Context, Result};
use log::{info, warn};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use petalert_lib::{
    config::SearchConfig,
    db,
    models::{GeoReport, ReportTally},
    reports::{demo_nearby_reports, NearbyReports, PgReportBackend},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    info!("Starting PetAlert nearby reports lookup");
    let start_time = Instant::now();

    // Try to load .env file if it exists
    db::load_first_env_file(&[".env", ".env.local", "../.env"]);

    let config = SearchConfig::from_env().context("Invalid search configuration")?;
    let query = config.query();

    let reports = if config.offline {
        info!("Offline mode: using demo reports around the search center");
        demo_nearby_reports(&query).await?
    } else {
        match db::connect().await {
            Ok(pool) => {
                info!("Successfully connected to the database");
                let backend = Arc::new(PgReportBackend::new(pool));
                NearbyReports::new(backend)
                    .get_nearby_reports_or_demo(&query)
                    .await?
            }
            Err(e) => {
                warn!("Failed to connect to database, using demo reports: {:#}", e);
                demo_nearby_reports(&query).await?
            }
        }
    };

    write_reports(&reports)?;

    let tally = ReportTally::from_reports(&reports);
    info!(
        "Lookup completed in {:.2?}. {} nearby reports: {} lost, {} found, {} other",
        start_time.elapsed(),
        tally.total(),
        tally.lost,
        tally.found,
        tally.other
    );

    Ok(())
}

/// One JSON document per report on stdout.
fn write_reports(reports: &[GeoReport]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for report in reports {
        serde_json::to_writer(&mut out, report).context("Failed to serialize report")?;
        writeln!(out).context("Failed to write to stdout")?;
    }
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}
