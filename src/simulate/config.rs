use thiserror::Error;

use crate::intensity::IntensityConfig;
use crate::time::{Duration, DAY, MINUTE, WEEK};

/// Default bound on the length of a single simulation window.
pub const DEFAULT_MAX_WINDOW_LENGTH: Duration = WEEK;

/// Default grid resolution: one sample per five minutes of wall time.
pub const DEFAULT_SAMPLE_SPACING: Duration = 5.0 * MINUTE;

/// Error type returned when a simulation is misconfigured.
///
/// All variants are caught by [SimulationConfig::validate] before any
/// table is built or any random draw happens.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("maximum window length must be positive and finite, got {0}")]
    InvalidMaxWindowLength(Duration),
    #[error("sample spacing must be positive and finite, got {0}")]
    InvalidSampleSpacing(Duration),
    #[error("maximum window length {max_window_length} holds fewer than two samples at spacing {sample_spacing}")]
    SamplingTooCoarse {
        max_window_length: Duration,
        sample_spacing: Duration,
    },
    #[error("peak {index} is malformed: time of day {time_of_day}, std dev {std_dev}, weight {weight}")]
    MalformedPeak {
        index: usize,
        time_of_day: Duration,
        std_dev: Duration,
        weight: f64,
    },
    #[error("weekend multiplier range ({0}, {1}) is not a valid positive range")]
    InvalidWeekendRange(f64, f64),
    #[error("motivation period must be positive, got {0}")]
    InvalidMotivationPeriod(Duration),
    #[error("simulation horizon must end after it starts")]
    EmptyHorizon,
}

/// Knobs of a full simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// The commit-rate model applied to every window.
    pub intensity: IntensityConfig,
    /// Upper bound on window length; longer horizons are chunked.
    /// Bounds the quadratic per-window table cost.
    pub max_window_length: Duration,
    /// Distance between grid samples; the accuracy/cost tradeoff of
    /// all integration and interpolation.
    pub sample_spacing: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            intensity: IntensityConfig::default(),
            max_window_length: DEFAULT_MAX_WINDOW_LENGTH,
            sample_spacing: DEFAULT_SAMPLE_SPACING,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_window_length.is_finite() || self.max_window_length <= 0.0 {
            return Err(ConfigError::InvalidMaxWindowLength(self.max_window_length));
        }
        if !self.sample_spacing.is_finite() || self.sample_spacing <= 0.0 {
            return Err(ConfigError::InvalidSampleSpacing(self.sample_spacing));
        }
        if self.max_window_length < 2.0 * self.sample_spacing {
            return Err(ConfigError::SamplingTooCoarse {
                max_window_length: self.max_window_length,
                sample_spacing: self.sample_spacing,
            });
        }

        for (index, peak) in self.intensity.peaks.iter().enumerate() {
            let time_ok = peak.time_of_day.is_finite()
                && (0.0..DAY).contains(&peak.time_of_day);
            let shape_ok = peak.std_dev.is_finite()
                && peak.std_dev > 0.0
                && peak.weight.is_finite()
                && peak.weight >= 0.0;
            if !time_ok || !shape_ok {
                return Err(ConfigError::MalformedPeak {
                    index,
                    time_of_day: peak.time_of_day,
                    std_dev: peak.std_dev,
                    weight: peak.weight,
                });
            }
        }

        let (low, high) = self.intensity.weekend_multiplier_range;
        if !low.is_finite() || !high.is_finite() || low <= 0.0 || high < low {
            return Err(ConfigError::InvalidWeekendRange(low, high));
        }

        if self.intensity.motivation_period <= 0.0 {
            return Err(ConfigError::InvalidMotivationPeriod(
                self.intensity.motivation_period,
            ));
        }

        Ok(())
    }
}
