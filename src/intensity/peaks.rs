use crate::time::{Duration, DAY, HOUR, MINUTE};

/// One Gaussian-shaped activity peak within the daily cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeakConfig {
    /// Center of the peak, in seconds after local midnight.
    pub time_of_day: Duration,
    /// Spread of the peak.
    pub std_dev: Duration,
    /// Area under the peak, i.e., the expected number of events the
    /// peak contributes to one daily cycle (before modulation).
    pub weight: f64,
}

impl PeakConfig {
    pub fn new(time_of_day: Duration, std_dev: Duration, weight: f64) -> Self {
        PeakConfig {
            time_of_day,
            std_dev,
            weight,
        }
    }
}

/// A time-of-day activity profile: the weighted sum of Gaussian peaks.
///
/// The profile is periodic with the day implicitly, since it is only
/// ever evaluated at offsets within `[0, DAY)`. Peaks are not wrapped
/// around midnight; a peak centered near midnight should be kept
/// narrow enough that its tails are negligible at the day boundary.
#[derive(Clone, Debug)]
pub struct DiurnalPeaks {
    pub peaks: Vec<PeakConfig>,
}

impl DiurnalPeaks {
    pub fn new(peaks: Vec<PeakConfig>) -> Self {
        DiurnalPeaks { peaks }
    }

    /// The reference working-day profile: a wide morning ramp-up, the
    /// main afternoon block, and a short evening session.
    pub fn reference() -> Self {
        DiurnalPeaks::new(vec![
            PeakConfig::new(9.0 * HOUR, 2.0 * HOUR, 6.0),
            PeakConfig::new(14.0 * HOUR + 30.0 * MINUTE, HOUR, 8.0),
            PeakConfig::new(20.0 * HOUR + 30.0 * MINUTE, 0.5 * HOUR, 3.0),
        ])
    }

    /// Evaluate the profile at a given time of day.
    ///
    /// `seconds_into_day` must lie in `[0, DAY)`; the caller reduces
    /// absolute time modulo the daily cycle.
    pub fn density(&self, seconds_into_day: Duration) -> f64 {
        let d = seconds_into_day % DAY;
        self.peaks
            .iter()
            .map(|p| p.weight * normal_density(d, p.time_of_day, p.std_dev))
            .sum()
    }
}

/// Density of the normal distribution at `x`.
// quick and dirty, but all we need: no erf, no sampling
pub(crate) fn normal_density(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}
