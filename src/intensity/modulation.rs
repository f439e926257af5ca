use chrono::Weekday;
use rand::{Rng, RngCore};

use crate::time::{Duration, Instant, DAY};

/// Day-of-week multiplier on the base rate.
///
/// Weekdays pass through unchanged. On Saturdays and Sundays a fresh
/// multiplier is drawn uniformly from `[low, high)` on *every*
/// evaluation, so weekend activity can come out anywhere between
/// suppressed and amplified. The redraw-per-evaluation is intentional;
/// it makes the rate a stochastic process rather than a deterministic
/// function of time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WeekendModulation {
    pub low: f64,
    pub high: f64,
}

impl WeekendModulation {
    pub fn new(low: f64, high: f64) -> Self {
        WeekendModulation { low, high }
    }

    /// Weekends can see anywhere from a third of to three times the
    /// weekday activity.
    pub fn reference() -> Self {
        WeekendModulation::new(1.0 / 3.0, 3.0)
    }

    pub fn factor(&self, weekday: Weekday, rng: &mut dyn RngCore) -> f64 {
        if matches!(weekday, Weekday::Sat | Weekday::Sun) {
            if self.low == self.high {
                self.low
            } else {
                rng.random_range(self.low..self.high)
            }
        } else {
            1.0
        }
    }
}

/// Slow sinusoidal oscillation of overall motivation.
///
/// The multiplier is `(sin(2π t / period) + 2) / 2` of absolute time,
/// so it stays within `[0.5, 1.5]` and averages out to 1 over a full
/// period.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotivationWave {
    pub period: Duration,
}

impl MotivationWave {
    pub fn new(period: Duration) -> Self {
        MotivationWave { period }
    }

    /// Motivation swings over a three-day cycle.
    pub fn reference() -> Self {
        MotivationWave::new(3.0 * DAY)
    }

    pub fn factor(&self, t_absolute: Instant) -> f64 {
        let phase = std::f64::consts::TAU * t_absolute / self.period;
        (phase.sin() + 2.0) / 2.0
    }
}
