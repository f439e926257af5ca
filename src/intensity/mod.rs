/*! Models of commit intensity (the instantaneous arrival rate).

This module provides a central trait, [IntensityModel], which represents
the time-varying rate λ of an inhomogeneous Poisson arrival process.
The main implementation is [CommitIntensity], which combines a
time-of-day peak profile ([DiurnalPeaks]) with a day-of-week multiplier
([WeekendModulation]) and a slow multi-day oscillation
([MotivationWave]).

Note that λ is a *stochastic* rate, not a pure function of time: the
weekend multiplier is redrawn on every evaluation. For this reason
every evaluation takes an explicit random source; there is no hidden
global generator.
*/

use auto_impl::auto_impl;
use rand::RngCore;

use crate::time::Instant;

/// The main interface for models of the instantaneous arrival rate.
#[auto_impl(&, Box, Rc)]
pub trait IntensityModel {
    /// The expected number of events per second at offset `t` from the
    /// model's anchor. Never negative.
    ///
    /// `rng` backs the stochastic components of the rate; models
    /// without any draw from it are deterministic in `t`.
    fn rate(&self, t: Instant, rng: &mut dyn RngCore) -> f64;
}

mod commit;
mod modulation;
mod peaks;

pub use commit::{CommitIntensity, IntensityConfig};
pub use modulation::{MotivationWave, WeekendModulation};
pub use peaks::{DiurnalPeaks, PeakConfig};

/// Pathological corner case: a rate that does not vary at all.
///
/// `Constant { rate: 0.0 }` models a dead interval in which no events
/// can ever be emitted.
#[derive(Copy, Clone, Debug)]
pub struct Constant {
    /// Expected events per second.
    pub rate: f64,
}

impl IntensityModel for Constant {
    fn rate(&self, _t: Instant, _rng: &mut dyn RngCore) -> f64 {
        self.rate
    }
}
