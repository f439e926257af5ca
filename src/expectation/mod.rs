/*! The cumulative-expectation table of one simulation window.

Sampling an [intensity model][crate::intensity::IntensityModel] on a
fixed-resolution grid yields three interpolated functions: the rate
λ itself, its running integral μ (the expected number of events up to
an offset), and the inverse τ of μ. The sampler only ever touches the
table; the model is not evaluated again after construction.
*/

use rand::RngCore;
use thiserror::Error;

use crate::intensity::IntensityModel;
use crate::time::{Duration, Instant};

mod curve;
mod quadrature;

pub use curve::SampledCurve;

use quadrature::{linspace, simpson};

/// Error type returned when a window's table cannot be built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    /// The window does not span a positive, finite amount of time.
    #[error("window length must be positive and finite, got {0}")]
    InvalidWindowLength(Duration),
    /// Fewer than two grid samples leave nothing to integrate over.
    #[error("at least two grid samples are required, got {0}")]
    InsufficientSamples(usize),
    /// The integrated expectation came out non-finite.
    #[error("cumulative expectation over a window of length {0} is not finite")]
    DegenerateExpectation(Duration),
}

/// Sampled λ, μ, and τ = μ⁻¹ for one window, plus the window's total
/// expected event count.
#[derive(Clone, Debug)]
pub struct ExpectationTable {
    lambda: SampledCurve,
    mu: SampledCurve,
    tau: SampledCurve,
    total: f64,
    window_length: Duration,
}

impl ExpectationTable {
    /// Sample `model` on a grid of `samples` points over
    /// `[0, window_length]` and integrate it into the μ/τ tables.
    ///
    /// The cumulative table is built by re-integrating the
    /// *interpolated* rate from 0 up to every grid point, each pass
    /// resampled at the full grid resolution. That O(N²) pass is the
    /// dominant cost of a window and the reason long horizons are
    /// chunked by the driver.
    pub fn build<M: IntensityModel + ?Sized>(
        model: &M,
        window_length: Duration,
        samples: usize,
        rng: &mut dyn RngCore,
    ) -> Result<ExpectationTable, TableError> {
        if !window_length.is_finite() || window_length <= 0.0 {
            return Err(TableError::InvalidWindowLength(window_length));
        }
        if samples < 2 {
            return Err(TableError::InsufficientSamples(samples));
        }

        let xs = linspace(window_length, samples);
        let ys: Vec<f64> = xs.iter().map(|&t| model.rate(t, rng)).collect();
        let lambda = SampledCurve::new(xs.clone(), ys);

        let (grid, rates) = lambda.support();
        let total = simpson(grid, rates);
        if !total.is_finite() {
            return Err(TableError::DegenerateExpectation(window_length));
        }

        let mut mu_ys = Vec::with_capacity(samples);
        for &t in grid {
            let sub_xs = linspace(t, samples);
            let sub_ys: Vec<f64> = sub_xs.iter().map(|&x| lambda.eval(x)).collect();
            mu_ys.push(simpson(&sub_xs, &sub_ys));
        }
        // λ >= 0 makes μ non-decreasing in exact arithmetic; iron out
        // quadrature jitter between the independently resampled passes
        for i in 1..mu_ys.len() {
            mu_ys[i] = mu_ys[i].max(mu_ys[i - 1]);
        }
        if !mu_ys[samples - 1].is_finite() {
            return Err(TableError::DegenerateExpectation(window_length));
        }

        let mu = SampledCurve::new(xs.clone(), mu_ys.clone());
        let tau = SampledCurve::new(mu_ys, xs);

        Ok(ExpectationTable {
            lambda,
            mu,
            tau,
            total,
            window_length,
        })
    }

    /// Interpolated rate at offset `t`.
    pub fn rate_at(&self, t: Instant) -> f64 {
        self.lambda.eval(t)
    }

    /// μ(t): expected number of events in `[0, t]`.
    pub fn expected_events(&self, t: Instant) -> f64 {
        self.mu.eval(t)
    }

    /// τ(m): the offset by which `m` events are expected, i.e., μ⁻¹.
    pub fn arrival_time(&self, expected: f64) -> Instant {
        self.tau.eval(expected)
    }

    /// μ evaluated over the whole window: the expected event count the
    /// sampler treats as its budget.
    pub fn total_expected(&self) -> f64 {
        self.total
    }

    pub fn window_length(&self) -> Duration {
        self.window_length
    }
}

#[cfg(test)]
mod tests;
