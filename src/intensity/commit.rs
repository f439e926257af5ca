use chrono::{Datelike, TimeZone, Timelike};
use rand::RngCore;

use super::{DiurnalPeaks, IntensityModel, MotivationWave, PeakConfig, WeekendModulation};
use crate::time::{datetime_at, Duration, Instant};

/// Configuration of the composed commit-rate model.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityConfig {
    /// Time-of-day activity peaks.
    pub peaks: Vec<PeakConfig>,
    /// Uniform range the weekend multiplier is drawn from.
    pub weekend_multiplier_range: (f64, f64),
    /// Period of the motivation oscillation.
    pub motivation_period: Duration,
}

impl Default for IntensityConfig {
    fn default() -> Self {
        IntensityConfig {
            peaks: DiurnalPeaks::reference().peaks,
            weekend_multiplier_range: (
                WeekendModulation::reference().low,
                WeekendModulation::reference().high,
            ),
            motivation_period: MotivationWave::reference().period,
        }
    }
}

impl IntensityConfig {
    /// A configuration with only the given peaks: no weekend
    /// randomness, and a motivation period so long that the wave is
    /// flat over any realistic horizon.
    pub fn peaks_only(peaks: Vec<PeakConfig>) -> Self {
        IntensityConfig {
            peaks,
            weekend_multiplier_range: (1.0, 1.0),
            motivation_period: f64::MAX,
        }
    }
}

/// The composed commit rate for one simulation window.
///
/// Anchored at an absolute epoch instant; offsets passed to
/// [IntensityModel::rate] are relative to that anchor. Time-of-day and
/// day-of-week are evaluated in the calendar timezone `Tz`, which the
/// caller supplies (the command-line tool passes the machine-local
/// zone).
#[derive(Clone, Debug)]
pub struct CommitIntensity<Tz: TimeZone> {
    anchor: Instant,
    tz: Tz,
    peaks: DiurnalPeaks,
    weekend: WeekendModulation,
    motivation: MotivationWave,
}

impl<Tz: TimeZone> CommitIntensity<Tz> {
    pub fn new(anchor: Instant, tz: Tz, config: &IntensityConfig) -> Self {
        let (low, high) = config.weekend_multiplier_range;
        CommitIntensity {
            anchor,
            tz,
            peaks: DiurnalPeaks::new(config.peaks.clone()),
            weekend: WeekendModulation::new(low, high),
            motivation: MotivationWave::new(config.motivation_period),
        }
    }

    /// The absolute instant the window's offset 0 corresponds to.
    pub fn anchor(&self) -> Instant {
        self.anchor
    }
}

impl<Tz: TimeZone> IntensityModel for CommitIntensity<Tz> {
    fn rate(&self, t: Instant, rng: &mut dyn RngCore) -> f64 {
        let absolute = self.anchor + t;
        let calendar = datetime_at(absolute, &self.tz);
        let seconds_into_day = calendar.num_seconds_from_midnight() as f64
            + (absolute - absolute.floor());

        self.peaks.density(seconds_into_day)
            * self.weekend.factor(calendar.weekday(), rng)
            * self.motivation.factor(absolute)
    }
}
