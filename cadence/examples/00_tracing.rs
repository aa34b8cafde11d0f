use std::sync::Arc;
use std::time::Duration;

use cadence::{Cadence, ReportConfig};
use cadence_mock::MockHistory;
use chrono::{TimeZone, Utc};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Honour RUST_LOG, e.g. RUST_LOG=cadence=debug,cadence_core=trace
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    let cadence = Cadence::builder()
        .with_history(Arc::new(MockHistory::new()))
        .lookup_timeout(Duration::from_secs(5))
        .request_timeout(Duration::from_secs(30))
        .build()?;

    let start = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).single().ok_or("invalid date")?;
    let end = Utc.with_ymd_and_hms(2020, 6, 30, 0, 0, 0).single().ok_or("invalid date")?;
    let report = cadence
        .generate_report(&ReportConfig::new("fixture-service", start, end))
        .await?;

    tracing::info!(
        windows = report.deploy_freq_data.len(),
        deploys = report.deploy_timestamps.len(),
        "report ready"
    );
    Ok(())
}
