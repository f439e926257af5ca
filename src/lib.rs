/*! Synthesis of statistically realistic Git commit histories.

Event timestamps are drawn from an inhomogeneous Poisson process whose
rate varies with time of day, day of week, and a slow motivation
oscillation. The [intensity] module defines the rate model, the
[expectation] module integrates it into a cumulative-expectation table,
and the [sampler] maps a unit-rate process through the table's inverse
to obtain arrival instants. The [simulate] module chains bounded
windows over an arbitrary horizon; [report] and [repo] consume the
result.
*/

pub mod expectation;
pub mod intensity;
pub mod report;
pub mod repo;
pub mod sampler;
pub mod simulate;
pub mod time;
