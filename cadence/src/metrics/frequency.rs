use cadence_core::{
    CadenceError, DeploymentEvent, FrequencyMethod, Instant, Interval, SeriesPoint,
    average_frequency, best_mean_frequency, to_hertz,
};

use crate::Cadence;

/// Timestamps of the deployments contained in `window`, ascending.
pub(crate) fn deploys_in_window(deploys: &[DeploymentEvent], window: &Interval) -> Vec<Instant> {
    let mut out: Vec<Instant> = deploys
        .iter()
        .map(|d| d.time_created)
        .filter(|t| window.contains(*t))
        .collect();
    out.sort_unstable();
    out
}

/// Deployment frequency (Hz) of one window.
///
/// # Errors
/// `InterArrival` fails with `InvalidInterval` when two deployments share an instant.
pub fn window_frequency(
    deploys: &[DeploymentEvent],
    window: &Interval,
    method: FrequencyMethod,
) -> Result<f64, CadenceError> {
    let timestamps = deploys_in_window(deploys, window);
    match method {
        FrequencyMethod::InterArrival => average_frequency(&timestamps),
        _ => Ok(to_hertz(&best_mean_frequency(&timestamps, window))),
    }
}

/// One `(window.end_millis, hz)` point per window, in window order.
///
/// # Errors
/// See [`window_frequency`].
pub fn deployment_frequency_series(
    deploys: &[DeploymentEvent],
    windows: &[Interval],
    method: FrequencyMethod,
) -> Result<Vec<SeriesPoint<f64>>, CadenceError> {
    windows
        .iter()
        .map(|w| Ok(SeriesPoint(w.end_millis(), window_frequency(deploys, w, method)?)))
        .collect()
}

impl Cadence {
    /// Deployment-frequency series using the configured `FrequencyMethod`.
    ///
    /// # Errors
    /// See [`window_frequency`].
    pub fn deployment_frequency(
        &self,
        deploys: &[DeploymentEvent],
        windows: &[Interval],
    ) -> Result<Vec<SeriesPoint<f64>>, CadenceError> {
        deployment_frequency_series(deploys, windows, self.cfg.frequency_method)
    }
}
