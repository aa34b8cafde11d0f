use cadence_core::{CadenceError, MetricsReport, ReportConfig, rolling_windows_for};

use crate::Cadence;

impl Cadence {
    /// Build the full metrics report for one project.
    ///
    /// Fetches deployments, generates the rolling windows, and computes the
    /// deployment-frequency and lead-time series over them. Raw deployment
    /// timestamps in `[report_start, report_end)` are attached for histograms.
    ///
    /// # Errors
    /// Invalid configuration (`InvalidArg`), deployment-source failures, and
    /// any lookup failure abort the whole report.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cadence::report::generate_report",
            skip(self, cfg),
            fields(project = %cfg.project_name, start = %cfg.report_start, end = %cfg.report_end),
        )
    )]
    pub async fn generate_report(&self, cfg: &ReportConfig) -> Result<MetricsReport, CadenceError> {
        cfg.validate()?;
        let mut deployments = self.fetch_deployments().await?;
        deployments.sort_by_key(|d| d.time_created);

        let windows = rolling_windows_for(cfg)?;
        let deploy_freq_data = self.deployment_frequency(&deployments, &windows)?;
        let lead_time_data = self
            .calculate_average_lead_time(&deployments, &windows)
            .await?;

        let deploy_timestamps = deployments
            .iter()
            .map(|d| d.time_created)
            .filter(|t| cfg.report_start <= *t && *t < cfg.report_end)
            .map(|t| t.timestamp_millis())
            .collect();

        Ok(MetricsReport {
            project_name: cfg.project_name.clone(),
            window_size_days: cfg.window_size.as_days(),
            deploy_freq_data,
            lead_time_data,
            deploy_timestamps,
        })
    }
}
