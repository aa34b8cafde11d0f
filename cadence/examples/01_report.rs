use std::sync::Arc;

use cadence::{Cadence, DurationSpec, ReportConfig};
use cadence_mock::MockHistory;
use chrono::{TimeZone, Utc};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. A fixture history: twelve commits and six deployments in June 2020.
    let history = Arc::new(MockHistory::new());

    // 2. Build the orchestrator; one collaborator serves both roles.
    let cadence = Cadence::builder()
        .with_history(history)
        .lookup_concurrency(4)
        .build()?;

    // 3. Weekly samples over June with two-week look-back windows.
    let end = Utc.with_ymd_and_hms(2020, 7, 1, 0, 0, 0).single().ok_or("invalid date")?;
    let cfg = ReportConfig::months_back("fixture-service", end, 1)?
        .with_sampling_frequency(DurationSpec::weeks(1))
        .with_window_size(DurationSpec::weeks(2));

    // 4. Compute both series and print the report the renderer would receive.
    let report = cadence.generate_report(&cfg).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    // 5. The per-release change log is available separately.
    let releases = cadence.gather_release_data().await?;
    for r in &releases.releases {
        println!("{} {} ({} changes)", r.timestamp, r.release_id, r.changes.len());
    }

    Ok(())
}
