/*! The horizon chunker driving a full simulation run.

An arbitrarily long requested horizon is split into bounded windows so
that the quadratic table-construction cost of any one window stays
bounded. Windows are chained: each one is anchored at the absolute time
of the previous window's last emitted arrival, and the intensity model
and expectation table are rebuilt from scratch for the new anchor.

Chaining at the last arrival (rather than the nominal window boundary)
is load-bearing for the process semantics, with a known wrinkle: the
window after a sparse one starts late relative to calendar time, which
slightly skews its time-of-day evaluation. That behavior is kept as-is.
*/

use chrono::{DateTime, TimeZone};
use derive_more::Display;
use itertools::Itertools;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::expectation::{ExpectationTable, TableError};
use crate::intensity::CommitIntensity;
use crate::sampler::draw_arrivals;
use crate::time::{epoch_seconds, Duration, Instant, DAY};

mod config;

pub use config::{
    ConfigError, SimulationConfig, DEFAULT_MAX_WINDOW_LENGTH, DEFAULT_SAMPLE_SPACING,
};

use thiserror::Error;

/// Error type returned when a simulation run cannot proceed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("window table construction failed: {0}")]
    Table(#[from] TableError),
}

/// One bounded slice of the simulation horizon.
#[derive(Copy, Clone, Debug, PartialEq, Display)]
#[display(fmt = "{:.0} s window anchored at epoch {:.0}", length, anchor)]
pub struct WindowDescriptor {
    /// Absolute epoch instant the window starts at.
    pub anchor: Instant,
    /// Length of the window in seconds.
    pub length: Duration,
}

/// Iterator over the horizon's windows, yielding each window's
/// absolute arrival instants.
///
/// The per-window work (model evaluation, the quadratic integration
/// pass, sampling) happens inside [Iterator::next], so a caller that
/// stops consuming the iterator interrupts the run cleanly between
/// windows. [simulate] drains it to completion.
pub struct Windows<'a, Tz: TimeZone> {
    config: &'a SimulationConfig,
    tz: Tz,
    rng: &'a mut StdRng,
    anchor: Instant,
    nominal_elapsed: Duration,
    total: Duration,
    exhausted: bool,
}

impl<'a, Tz: TimeZone> Windows<'a, Tz> {
    /// Set up the window chain for the horizon `[start, start + total)`.
    ///
    /// `start` doubles as the first window's anchor; `tz` is the
    /// calendar timezone all time-of-day evaluation happens in.
    pub fn new(
        start: Instant,
        total: Duration,
        tz: Tz,
        config: &'a SimulationConfig,
        rng: &'a mut StdRng,
    ) -> Self {
        Windows {
            config,
            tz,
            rng,
            anchor: start,
            nominal_elapsed: 0.0,
            total,
            exhausted: false,
        }
    }

    fn next_descriptor(&self) -> Option<WindowDescriptor> {
        let remaining = self.total - self.nominal_elapsed;
        if remaining <= 0.0 {
            return None;
        }
        Some(WindowDescriptor {
            anchor: self.anchor,
            length: self.config.max_window_length.min(remaining),
        })
    }
}

impl<'a, Tz: TimeZone> Iterator for Windows<'a, Tz> {
    type Item = Result<Vec<Instant>, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let window = self.next_descriptor()?;

        // a tail shorter than two sample intervals cannot be gridded
        if window.length < 2.0 * self.config.sample_spacing {
            debug!("remaining tail of {:.0} s is below grid resolution, ending run", window.length);
            self.exhausted = true;
            return None;
        }

        info!(
            "simulating {}, {:.0}% of horizon elapsed",
            window,
            100.0 * self.nominal_elapsed / self.total
        );

        let samples = (window.length / self.config.sample_spacing) as usize;
        let model = CommitIntensity::new(window.anchor, self.tz.clone(), &self.config.intensity);
        let table = match ExpectationTable::build(&model, window.length, samples, &mut *self.rng) {
            Ok(table) => table,
            Err(e) => {
                self.exhausted = true;
                return Some(Err(e.into()));
            }
        };

        let arrivals: Vec<Instant> = draw_arrivals(&table, &mut *self.rng)
            .into_iter()
            .map(|offset| window.anchor + offset)
            .collect();

        self.nominal_elapsed += window.length;
        match arrivals.last() {
            Some(&last) => self.anchor = last,
            None => {
                // an empty window ends the run early with whatever has
                // accumulated; the requested horizon is truncated
                warn!(
                    "{} produced no events (expected {:.3}); stopping with {:.1} nominal days left",
                    window,
                    table.total_expected(),
                    (self.total - self.nominal_elapsed) / DAY
                );
                self.exhausted = true;
            }
        }
        Some(Ok(arrivals))
    }
}

/// Simulate event timestamps over `[start, end)`.
///
/// Returns the concatenated absolute arrival instants of all windows,
/// in increasing order. The run ends early if a window produces no
/// events; a table-construction failure aborts it with an error
/// instead.
pub fn simulate<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    config: &SimulationConfig,
    rng: &mut StdRng,
) -> Result<Vec<Instant>, SimulationError> {
    config.validate()?;

    let start_ts = epoch_seconds(start);
    let total = epoch_seconds(end) - start_ts;
    if total <= 0.0 {
        return Err(ConfigError::EmptyHorizon.into());
    }

    let mut events: Vec<Instant> = Vec::new();
    for window in Windows::new(start_ts, total, start.timezone(), config, rng) {
        events.extend(window?);
    }
    debug_assert!(events.iter().tuple_windows().all(|(a, b)| a <= b));
    Ok(events)
}
